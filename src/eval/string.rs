//! String operators. Indices count characters, not bytes.

use super::{EvalError, Interpreter};
use crate::value::Value;

fn out_of_range(op: &str, index: i64, len: usize) -> EvalError {
    EvalError::IndexOutOfRange {
        op: op.to_string(),
        index,
        len,
    }
}

impl Interpreter {
    /// Character code at an index
    /// Usage: (abc) 1 get -> 98
    pub(crate) fn op_get(&mut self) -> Result<(), EvalError> {
        self.require(2, "get")?;
        let index = self.pop_integer("get")?;
        let s = self.pop_string("get")?;
        let chars: Vec<char> = s.chars().collect();
        let c = usize::try_from(index)
            .ok()
            .and_then(|i| chars.get(i))
            .ok_or_else(|| out_of_range("get", index, chars.len()))?;
        self.stack.push(Value::Int(i64::from(u32::from(*c))));
        Ok(())
    }

    /// Substring of `count` characters starting at `index`
    /// Usage: (hello) 1 3 getinterval -> (ell)
    pub(crate) fn op_getinterval(&mut self) -> Result<(), EvalError> {
        self.require(3, "getinterval")?;
        let count = self.pop_integer("getinterval")?;
        let index = self.pop_integer("getinterval")?;
        let s = self.pop_string("getinterval")?;
        let chars: Vec<char> = s.chars().collect();
        let len = chars.len();

        if count < 0 {
            return Err(out_of_range("getinterval", count, len));
        }
        let start = usize::try_from(index)
            .ok()
            .filter(|&i| i <= len)
            .ok_or_else(|| out_of_range("getinterval", index, len))?;
        let end = start
            .checked_add(count as usize)
            .filter(|&e| e <= len)
            .ok_or_else(|| out_of_range("getinterval", index.saturating_add(count), len))?;

        self.stack.push(Value::Str(chars[start..end].iter().collect()));
        Ok(())
    }

    /// Overwrite characters starting at `index` and push the result. A
    /// replacement running past the end extends the string.
    /// Usage: (hello) 1 (EL) putinterval -> (hELlo)
    pub(crate) fn op_putinterval(&mut self) -> Result<(), EvalError> {
        self.require(3, "putinterval")?;
        let replacement = self.pop_string("putinterval")?;
        let index = self.pop_integer("putinterval")?;
        let s = self.pop_string("putinterval")?;
        let chars: Vec<char> = s.chars().collect();

        let start = usize::try_from(index)
            .ok()
            .filter(|&i| i <= chars.len())
            .ok_or_else(|| out_of_range("putinterval", index, chars.len()))?;
        let resume = start + replacement.chars().count();

        let mut result: String = chars[..start].iter().collect();
        result.push_str(&replacement);
        if resume < chars.len() {
            result.extend(&chars[resume..]);
        }
        self.stack.push(Value::Str(result));
        Ok(())
    }
}
