//! Runtime values for psi
//!
//! Scalars are copied when they move between stack slots. Dictionaries and
//! procedure bodies are shared: duplicating a dictionary on the operand stack
//! yields two handles to the same scope.

use crate::dict::DictRef;
use crate::lexer::Token;
use std::rc::Rc;

/// A deferred, re-executable token body.
///
/// Nested blocks stay as raw `{ ... }` tokens inside `body`; they are only
/// turned into procedures when the outer body runs.
#[derive(Debug, Clone)]
pub struct Procedure {
    pub body: Rc<[Token]>,
    /// Scope captured at construction time (lexical mode only)
    pub captured: Option<DictRef>,
}

impl Procedure {
    pub fn new(body: Rc<[Token]>, captured: Option<DictRef>) -> Self {
        Procedure { body, captured }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl PartialEq for Procedure {
    fn eq(&self, other: &Self) -> bool {
        let same_scope = match (&self.captured, &other.captured) {
            (None, None) => true,
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        };
        same_scope && (Rc::ptr_eq(&self.body, &other.body) || self.body == other.body)
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),
    /// Literal name, as pushed by `/x`
    Name(String),
    Dict(DictRef),
    Proc(Procedure),
}

impl Value {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Real(_) => "real",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Name(_) => "name",
            Value::Dict(_) => "dict",
            Value::Proc(_) => "procedure",
        }
    }

    /// Numeric view of the value; integers widen to f64
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Real(x) => Some(*x),
            _ => None,
        }
    }

    /// Integer view of the value; reals qualify only when integral
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Real(x) if x.fract() == 0.0 && x.is_finite() => Some(*x as i64),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Name(a), Value::Name(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a.ptr_eq(b),
            (Value::Proc(a), Value::Proc(b)) => a == b,
            _ => false,
        }
    }
}
