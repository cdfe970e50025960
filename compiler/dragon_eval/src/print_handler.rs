//! Destination for `PRINT` output.
//!
//! - `Stdout`: the default for programs run by a driver
//! - `Buffer`: captures output so embedders and tests can inspect it
//! - `Silent`: discards output
//!
//! Enum dispatch keeps the per-`PRINT` call free of vtable indirection.

use parking_lot::Mutex;

/// Writes each printed line to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }
}

/// Accumulates printed lines in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Everything printed so far.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Take the captured output, leaving the buffer empty.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    /// Write one line.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Take the captured output; empty for handlers that do not capture.
    pub fn take(&self) -> String {
        match self {
            Self::Buffer(h) => h.take(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }
}

/// Print handler shared between the interpreter and whoever reads its output.
#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedPrintHandler"
)]
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

/// Handler that writes to stdout.
#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedPrintHandler"
)]
pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Handler that captures output for later inspection.
#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedPrintHandler"
)]
pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Handler that discards output.
#[expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedPrintHandler"
)]
pub fn silent_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Silent)
}
