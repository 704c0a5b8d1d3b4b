use super::helpers::type_error;
use super::{EvalError, Interpreter};
use crate::dict::DictRef;
use crate::value::Value;
use tracing::debug;

impl Interpreter {
    /// Usage: 10 dict -> -dict-
    pub(crate) fn op_dict(&mut self) -> Result<(), EvalError> {
        self.require(1, "dict")?;
        let capacity = self.pop_integer("dict")?;
        let capacity = usize::try_from(capacity).map_err(|_| EvalError::RangeCheck {
            op: "dict".into(),
            detail: format!("negative capacity {}", capacity),
        })?;
        self.stack.push(Value::Dict(DictRef::new(capacity)));
        Ok(())
    }

    /// Enter a scope. The capacity check runs against the scope being left.
    pub(crate) fn op_begin(&mut self) -> Result<(), EvalError> {
        self.require(1, "begin")?;
        let dict = self.pop_dict("begin")?;
        self.dict_stack.begin(dict)?;
        debug!(depth = self.dict_stack.depth(), "begin");
        Ok(())
    }

    pub(crate) fn op_end(&mut self) -> Result<(), EvalError> {
        self.dict_stack.end()?;
        debug!(depth = self.dict_stack.depth(), "end");
        Ok(())
    }

    /// Bind a key in the current scope, overwriting any earlier binding.
    /// Usage: /x 42 def
    pub(crate) fn op_def(&mut self) -> Result<(), EvalError> {
        self.require(2, "def")?;
        let value = self.pop_any("def")?;
        let key = match self.pop_any("def")? {
            Value::Name(k) | Value::Str(k) => k,
            other => return Err(type_error("def", "name", &other)),
        };
        self.dict_stack.define(key, value);
        Ok(())
    }

    /// Entry count of a dictionary, or character count of a string
    pub(crate) fn op_length(&mut self) -> Result<(), EvalError> {
        self.require(1, "length")?;
        let len = match self.pop_any("length")? {
            Value::Dict(d) => d.len(),
            Value::Str(s) => s.chars().count(),
            other => return Err(type_error("length", "dict or string", &other)),
        };
        self.stack.push(Value::Int(len as i64));
        Ok(())
    }

    pub(crate) fn op_maxlength(&mut self) -> Result<(), EvalError> {
        self.require(1, "maxlength")?;
        let dict = self.pop_dict("maxlength")?;
        self.stack.push(Value::Int(dict.capacity() as i64));
        Ok(())
    }
}
