//! Dictionaries and the dictionary stack
//!
//! A `Dictionary` is one bounded scope. `DictRef` is the shared handle that
//! stack slots, the dictionary stack and captured procedures all hold; a
//! `def` through any handle is visible through every other one.

use crate::eval::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Capacity of the permanent bottom dictionary
pub const GLOBAL_DICT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: HashMap<String, Value>,
    capacity: usize,
}

impl Dictionary {
    pub fn new(capacity: usize) -> Self {
        Dictionary {
            entries: HashMap::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert or overwrite. Capacity is not checked here; `begin` checks it.
    pub fn define(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Shared handle to a dictionary
#[derive(Clone)]
pub struct DictRef(Rc<RefCell<Dictionary>>);

impl DictRef {
    pub fn new(capacity: usize) -> Self {
        DictRef(Rc::new(RefCell::new(Dictionary::new(capacity))))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.0.borrow().capacity()
    }

    pub fn is_full(&self) -> bool {
        self.0.borrow().is_full()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn define(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().define(key, value);
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().map(str::to_string).collect()
    }

    /// True when both handles point at the same dictionary
    pub fn ptr_eq(&self, other: &DictRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Entries can hold procedures that captured this same dictionary, so the
// derived Debug would recurse forever.
impl fmt::Debug for DictRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dict = self.0.borrow();
        f.debug_struct("DictRef")
            .field("len", &dict.len())
            .field("capacity", &dict.capacity())
            .finish()
    }
}

/// The nested-scope chain. Never empty: the bottom entry is the global
/// dictionary (or, while a lexical procedure runs, its captured scope).
#[derive(Debug, Clone)]
pub struct DictStack {
    frames: Vec<DictRef>,
}

impl Default for DictStack {
    fn default() -> Self {
        Self::new()
    }
}

impl DictStack {
    /// A stack holding only a fresh global dictionary
    pub fn new() -> Self {
        DictStack {
            frames: vec![DictRef::new(GLOBAL_DICT_CAPACITY)],
        }
    }

    /// A single-scope stack, used while a lexically captured procedure runs
    pub fn scoped(dict: DictRef) -> Self {
        DictStack { frames: vec![dict] }
    }

    /// Push a scope.
    ///
    /// Fails when the *current* top dictionary is already full. The check is
    /// made against the scope being left, not the one being entered.
    pub fn begin(&mut self, dict: DictRef) -> Result<(), EvalError> {
        if self.top().is_full() {
            return Err(EvalError::DictCapacityExceeded);
        }
        self.frames.push(dict);
        Ok(())
    }

    /// Pop the innermost scope; the bottom scope is never popped
    pub fn end(&mut self) -> Result<DictRef, EvalError> {
        if self.frames.len() <= 1 {
            return Err(EvalError::DictStackUnderflow);
        }
        self.frames.pop().ok_or(EvalError::DictStackUnderflow)
    }

    pub fn top(&self) -> &DictRef {
        // frames is never empty
        &self.frames[self.frames.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Write into the innermost scope
    pub fn define(&self, key: impl Into<String>, value: Value) {
        self.top().define(key, value);
    }

    /// Search innermost to outermost
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.frames
            .iter()
            .rev()
            .find_map(|dict| dict.get(name))
            .ok_or_else(|| EvalError::NameUndefined(name.to_string()))
    }

    /// Every name visible from the top of the stack, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frames.iter().flat_map(DictRef::keys).collect();
        names.sort();
        names.dedup();
        names
    }
}
