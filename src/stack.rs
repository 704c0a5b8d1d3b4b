//! The operand stack

use crate::value::Value;

/// LIFO working stack. Only the top is reachable; depth is bounded by memory.
#[derive(Debug, Clone, Default)]
pub struct OperandStack {
    items: Vec<Value>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Remove the top value; `None` on an empty stack
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&Value> {
        self.items.last()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Bottom-to-top view, for display and inspection
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}
