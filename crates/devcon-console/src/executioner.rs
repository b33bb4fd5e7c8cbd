//! Alternate interpreters that take over console input.
//!
//! While the stack is non-empty, the top executioner receives every
//! submitted line verbatim and the command registry is bypassed. A modal
//! sub-prompt pushes itself, collects what it needs, then pops.

use std::cell::RefCell;
use std::rc::Rc;

use devcon_types::error::{ConsoleError, Result};

use crate::host::ConsoleHost;

/// An interpreter that can capture all console input.
pub trait CommandExecutioner {
    fn execute_command(&mut self, host: &mut dyn ConsoleHost, line: &str);
}

/// Executioner handle kept alive while it runs, even if it pops itself.
pub type SharedExecutioner = Rc<RefCell<Box<dyn CommandExecutioner>>>;

/// LIFO of active executioners.
#[derive(Default)]
pub struct ExecutionerStack {
    stack: Vec<SharedExecutioner>,
}

impl ExecutionerStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route submitted lines to `executioner` until it is popped.
    pub fn push(&mut self, executioner: Box<dyn CommandExecutioner>) {
        self.stack.push(Rc::new(RefCell::new(executioner)));
    }

    /// Drop the top executioner.
    pub fn pop(&mut self) -> Result<()> {
        self.stack
            .pop()
            .map(|_| ())
            .ok_or(ConsoleError::EmptyExecutionerStack)
    }

    /// The executioner currently receiving input.
    pub fn top(&self) -> Option<SharedExecutioner> {
        self.stack.last().map(Rc::clone)
    }

    /// Depth of the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True when commands dispatch normally.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl CommandExecutioner for Named {
        fn execute_command(&mut self, host: &mut dyn ConsoleHost, _line: &str) {
            host.echo(self.0);
        }
    }

    #[test]
    fn pop_empty_fails() {
        let mut stack = ExecutionerStack::new();
        assert!(matches!(
            stack.pop(),
            Err(ConsoleError::EmptyExecutionerStack)
        ));
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut stack = ExecutionerStack::new();
        stack.push(Box::new(Named("first")));
        stack.push(Box::new(Named("second")));
        assert_eq!(stack.len(), 2);
        let top = stack.top().unwrap();
        stack.pop().unwrap();
        let next = stack.top().unwrap();
        assert!(!Rc::ptr_eq(&top, &next));
        stack.pop().unwrap();
        assert!(stack.is_empty());
        assert!(stack.top().is_none());
    }

    #[test]
    fn popped_handle_stays_alive() {
        let mut stack = ExecutionerStack::new();
        stack.push(Box::new(Named("only")));
        let handle = stack.top().unwrap();
        stack.pop().unwrap();
        assert_eq!(Rc::strong_count(&handle), 1);
        assert!(handle.try_borrow_mut().is_ok());
    }
}
