use super::{EvalError, Interpreter};
use crate::dict::DictRef;
use crate::value::{Procedure, Value};

impl Interpreter {
    /// Fail with StackUnderflow unless at least `n` operands are present.
    /// Operators call this before popping so a failed call leaves the stack
    /// untouched.
    pub(crate) fn require(&self, n: usize, op: &str) -> Result<(), EvalError> {
        if self.stack.count() < n {
            return Err(EvalError::StackUnderflow(op.to_string()));
        }
        Ok(())
    }

    pub(crate) fn pop_any(&mut self, op: &str) -> Result<Value, EvalError> {
        self.stack
            .pop()
            .ok_or_else(|| EvalError::StackUnderflow(op.to_string()))
    }

    /// Pop a number, widened to f64
    pub(crate) fn pop_number(&mut self, op: &str) -> Result<f64, EvalError> {
        let val = self.pop_any(op)?;
        val.as_number()
            .ok_or_else(|| type_error(op, "number", &val))
    }

    /// Pop an integer; an integral real is accepted
    pub(crate) fn pop_integer(&mut self, op: &str) -> Result<i64, EvalError> {
        let val = self.pop_any(op)?;
        val.as_integer()
            .ok_or_else(|| type_error(op, "integer", &val))
    }

    pub(crate) fn pop_bool(&mut self, op: &str) -> Result<bool, EvalError> {
        match self.pop_any(op)? {
            Value::Bool(b) => Ok(b),
            _ => Err(EvalError::TypeMismatch(op.to_string())),
        }
    }

    pub(crate) fn pop_string(&mut self, op: &str) -> Result<String, EvalError> {
        match self.pop_any(op)? {
            Value::Str(s) => Ok(s),
            other => Err(type_error(op, "string", &other)),
        }
    }

    pub(crate) fn pop_proc(&mut self, op: &str) -> Result<Procedure, EvalError> {
        match self.pop_any(op)? {
            Value::Proc(p) => Ok(p),
            other => Err(type_error(op, "procedure", &other)),
        }
    }

    pub(crate) fn pop_dict(&mut self, op: &str) -> Result<DictRef, EvalError> {
        match self.pop_any(op)? {
            Value::Dict(d) => Ok(d),
            other => Err(type_error(op, "dict", &other)),
        }
    }
}

pub(crate) fn type_error(op: &str, expected: &'static str, got: &Value) -> EvalError {
    EvalError::TypeError {
        op: op.to_string(),
        expected,
        got: got.type_name(),
    }
}
