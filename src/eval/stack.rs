use super::{EvalError, Interpreter};
use crate::value::Value;

impl Interpreter {
    /// Duplicate the top value; does nothing on an empty stack
    pub(crate) fn op_dup(&mut self) -> Result<(), EvalError> {
        if let Some(top) = self.stack.peek().cloned() {
            self.stack.push(top);
        }
        Ok(())
    }

    /// Discard the top value; does nothing on an empty stack
    pub(crate) fn op_pop(&mut self) -> Result<(), EvalError> {
        self.stack.pop();
        Ok(())
    }

    /// Swap the top two values; does nothing with fewer than two
    /// Usage: 1 2 exch -> 2 1
    pub(crate) fn op_exch(&mut self) -> Result<(), EvalError> {
        if self.stack.count() < 2 {
            return Ok(());
        }
        let b = self.pop_any("exch")?;
        let a = self.pop_any("exch")?;
        self.stack.push(b);
        self.stack.push(a);
        Ok(())
    }

    pub(crate) fn op_clear(&mut self) -> Result<(), EvalError> {
        self.stack.clear();
        Ok(())
    }

    /// Push the number of values below the pushed count
    pub(crate) fn op_count(&mut self) -> Result<(), EvalError> {
        let depth = self.stack.count() as i64;
        self.stack.push(Value::Int(depth));
        Ok(())
    }
}
