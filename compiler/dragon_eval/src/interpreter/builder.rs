//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::{stdout_handler, Environment, SharedPrintHandler};
use dragon_ir::StringInterner;

/// Builder for creating Interpreter instances.
///
/// Defaults: output to stdout, no call-depth limit, fresh environment.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            env: None,
            print_handler: None,
            max_call_depth: None,
        }
    }

    /// Set the initial environment.
    ///
    /// Lets a driver pre-populate the root scope or function table.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Set the destination of `PRINT` output.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Limit the number of nested user-function calls.
    ///
    /// Exceeding it fails with `RecursionLimit` instead of exhausting memory.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            interner: self.interner,
            env: self.env.unwrap_or_default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
        }
    }
}
