//! Call-frame tracking for user-function calls.
//!
//! `CallStack` enforces the optional maximum call depth and snapshots the
//! active frames into an `EvalBacktrace` when an error escapes a call.

use dragon_ir::{Name, StringLookup};
use dragon_value::{recursion_limit_exceeded, EvalBacktrace, EvalError};

/// A single active user-function call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Interned function name.
    pub name: Name,
}

/// Live call stack for the interpreter.
///
/// Each call pushes a frame before its body runs and pops it afterwards.
/// The depth check is part of `push()`.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Snapshot the active frames, innermost first.
    pub fn capture(&self, names: &impl StringLookup) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| names.lookup(f.name).to_string())
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace of the active frames to `err`.
    ///
    /// No-op outside any call, or when `err` already carries one.
    pub fn attach_backtrace(&self, err: EvalError, names: &impl StringLookup) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture(names))
    }
}
