//! Namespace prefix stack.

use crate::error::ScanError;

/// Ordered stack of raw namespace path segments for one scan.
///
/// A segment is pushed on entering a namespace block and popped on leaving
/// it, in strict push-before-descend / pop-after-descend order. Exactly one
/// stack exists per scan; nested groups share it.
#[derive(Debug, Default)]
pub struct PrefixStack {
    segments: Vec<String>,
}

impl PrefixStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: String) {
        self.segments.push(segment);
    }

    /// Popping an empty stack indicates a traversal bug and aborts the scan.
    pub fn pop(&mut self) -> Result<(), ScanError> {
        self.segments
            .pop()
            .map(|_| ())
            .ok_or(ScanError::StackDiscipline)
    }

    /// Concatenation of all pushed segments in push order, `""` when empty.
    pub fn current(&self) -> String {
        self.segments.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_prefixes_in_push_order() {
        let mut stack = PrefixStack::new();
        assert_eq!(stack.current(), "");
        stack.push("/nested".to_string());
        stack.push("/double".to_string());
        assert_eq!(stack.current(), "/nested/double");
        stack.pop().unwrap();
        assert_eq!(stack.current(), "/nested");
    }

    #[test]
    fn underflow_is_a_stack_discipline_violation() {
        let mut stack = PrefixStack::new();
        assert!(matches!(stack.pop(), Err(ScanError::StackDiscipline)));
    }
}
