//! Stack growth for the recursive evaluator.
//!
//! Evaluation recurses once per nested expression and once per user
//! function call, so deeply recursive DragonLisp programs would otherwise
//! overflow the native stack long before any configured call-depth limit
//! is reached. Every recursive entry point of the evaluator goes through
//! [`ensure_sufficient_stack`], which moves execution onto a freshly
//! allocated segment when the current one runs low.
//!
//! On `wasm32` the host owns the stack and the guard is a passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
///
/// One evaluator frame for a call (argument vector, child scope, body walk)
/// stays well below this.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment (2MB).
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining stack in bytes, if the platform can report it.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
