//! Call depth tracking for the evaluator.
//!
//! Every operator invocation, builtin or closure, holds one level of the
//! [`CallStack`] while it runs. Entering a level past the configured limit
//! fails with a `StackOverflow` error, so a closure that calls itself
//! without end stops with an error instead of exhausting memory.

use jdsl_value::{errors::recursion_limit_exceeded, EvalError};

/// Number of operator invocations currently running in an
/// [`Evaluator`](crate::Evaluator).
#[derive(Clone, Copy, Debug)]
pub struct CallStack {
    depth: usize,
    limit: Option<usize>,
}

impl CallStack {
    /// An empty stack. `None` disables the depth limit.
    pub fn new(limit: Option<usize>) -> Self {
        CallStack { depth: 0, limit }
    }

    /// Enter one invocation. At the limit the depth is left unchanged.
    pub fn push(&mut self) -> Result<(), EvalError> {
        match self.limit {
            Some(limit) if self.depth >= limit => Err(recursion_limit_exceeded(limit)),
            _ => {
                self.depth += 1;
                Ok(())
            }
        }
    }

    /// Leave the innermost invocation.
    pub fn pop(&mut self) {
        debug_assert!(self.depth > 0, "pop without a matching push");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }
}
