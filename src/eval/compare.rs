use super::{EvalError, Interpreter};
use crate::value::Value;
use std::cmp::Ordering;

impl Interpreter {
    // ========================================
    // Comparison
    // ========================================

    fn pop_pair(&mut self, op: &str) -> Result<(Value, Value), EvalError> {
        self.require(2, op)?;
        let y = self.pop_any(op)?;
        let x = self.pop_any(op)?;
        Ok((x, y))
    }

    /// Order two values: numerically, else as strings
    fn ordering(op: &str, x: &Value, y: &Value) -> Result<Ordering, EvalError> {
        let ord = match (x.as_number(), y.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => match (x, y) {
                (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
                _ => None,
            },
        };
        // NaN operands are unordered
        ord.ok_or_else(|| EvalError::TypeMismatch(op.to_string()))
    }

    /// Equality: numbers compare by value across int/real, strings and
    /// names by text, dictionaries and procedures by identity
    fn equal(op: &str, x: &Value, y: &Value) -> Result<bool, EvalError> {
        if let (Some(a), Some(b)) = (x.as_number(), y.as_number()) {
            return Ok(a == b);
        }
        match (x, y) {
            (Value::Str(a) | Value::Name(a), Value::Str(b) | Value::Name(b)) => Ok(a == b),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Dict(a), Value::Dict(b)) => Ok(a.ptr_eq(b)),
            (Value::Proc(a), Value::Proc(b)) => Ok(a == b),
            _ => Err(EvalError::TypeMismatch(op.to_string())),
        }
    }

    fn compare(&mut self, op: &str, test: fn(Ordering) -> bool) -> Result<(), EvalError> {
        let (x, y) = self.pop_pair(op)?;
        let ord = Self::ordering(op, &x, &y)?;
        self.stack.push(Value::Bool(test(ord)));
        Ok(())
    }

    pub(crate) fn op_eq(&mut self) -> Result<(), EvalError> {
        let (x, y) = self.pop_pair("eq")?;
        let result = Self::equal("eq", &x, &y)?;
        self.stack.push(Value::Bool(result));
        Ok(())
    }

    pub(crate) fn op_ne(&mut self) -> Result<(), EvalError> {
        let (x, y) = self.pop_pair("ne")?;
        let result = Self::equal("ne", &x, &y)?;
        self.stack.push(Value::Bool(!result));
        Ok(())
    }

    /// Usage: 5 3 gt -> true, (b) (a) gt -> true
    pub(crate) fn op_gt(&mut self) -> Result<(), EvalError> {
        self.compare("gt", Ordering::is_gt)
    }

    pub(crate) fn op_ge(&mut self) -> Result<(), EvalError> {
        self.compare("ge", Ordering::is_ge)
    }

    pub(crate) fn op_lt(&mut self) -> Result<(), EvalError> {
        self.compare("lt", Ordering::is_lt)
    }

    pub(crate) fn op_le(&mut self) -> Result<(), EvalError> {
        self.compare("le", Ordering::is_le)
    }

    // ========================================
    // Boolean
    // ========================================

    pub(crate) fn op_and(&mut self) -> Result<(), EvalError> {
        self.require(2, "and")?;
        let y = self.pop_bool("and")?;
        let x = self.pop_bool("and")?;
        self.stack.push(Value::Bool(x && y));
        Ok(())
    }

    pub(crate) fn op_or(&mut self) -> Result<(), EvalError> {
        self.require(2, "or")?;
        let y = self.pop_bool("or")?;
        let x = self.pop_bool("or")?;
        self.stack.push(Value::Bool(x || y));
        Ok(())
    }

    pub(crate) fn op_not(&mut self) -> Result<(), EvalError> {
        self.require(1, "not")?;
        let x = self.pop_bool("not")?;
        self.stack.push(Value::Bool(!x));
        Ok(())
    }

    pub(crate) fn op_true(&mut self) -> Result<(), EvalError> {
        self.stack.push(Value::Bool(true));
        Ok(())
    }

    pub(crate) fn op_false(&mut self) -> Result<(), EvalError> {
        self.stack.push(Value::Bool(false));
        Ok(())
    }
}
