use super::{EvalError, Interpreter};
use crate::value::Value;

impl Interpreter {
    // ========================================
    // Binary arithmetic
    // ========================================

    /// Pop `x y` (y on top) as numbers, after checking both are present
    fn pop_operands(&mut self, op: &str) -> Result<(f64, f64), EvalError> {
        self.require(2, op)?;
        let y = self.pop_number(op)?;
        let x = self.pop_number(op)?;
        Ok((x, y))
    }

    fn nonzero_divisor(op: &str, y: f64) -> Result<(), EvalError> {
        if y == 0.0 {
            return Err(EvalError::DivideByZero(op.to_string()));
        }
        Ok(())
    }

    /// Usage: 3 4 add -> 7
    pub(crate) fn op_add(&mut self) -> Result<(), EvalError> {
        let (x, y) = self.pop_operands("add")?;
        self.stack.push(Value::Real(x + y));
        Ok(())
    }

    /// Usage: 10 4 sub -> 6
    pub(crate) fn op_sub(&mut self) -> Result<(), EvalError> {
        let (x, y) = self.pop_operands("sub")?;
        self.stack.push(Value::Real(x - y));
        Ok(())
    }

    pub(crate) fn op_mul(&mut self) -> Result<(), EvalError> {
        let (x, y) = self.pop_operands("mul")?;
        self.stack.push(Value::Real(x * y));
        Ok(())
    }

    /// Usage: 7 2 div -> 3.5
    pub(crate) fn op_div(&mut self) -> Result<(), EvalError> {
        let (x, y) = self.pop_operands("div")?;
        Self::nonzero_divisor("div", y)?;
        self.stack.push(Value::Real(x / y));
        Ok(())
    }

    /// Integer quotient, truncated toward zero
    /// Usage: 7 2 idiv -> 3, -7 2 idiv -> -3
    pub(crate) fn op_idiv(&mut self) -> Result<(), EvalError> {
        let (x, y) = self.pop_operands("idiv")?;
        Self::nonzero_divisor("idiv", y)?;
        self.stack.push(Value::Int((x / y).trunc() as i64));
        Ok(())
    }

    /// Remainder with the sign of the dividend: x - (x idiv y) * y
    /// Usage: 7 3 mod -> 1, -7 3 mod -> -1
    pub(crate) fn op_mod(&mut self) -> Result<(), EvalError> {
        let (x, y) = self.pop_operands("mod")?;
        Self::nonzero_divisor("mod", y)?;
        let q = (x / y).trunc();
        self.stack.push(Value::Int((x - q * y) as i64));
        Ok(())
    }

    // ========================================
    // Unary arithmetic
    // ========================================

    fn unary(&mut self, op: &str, f: fn(f64) -> f64) -> Result<(), EvalError> {
        self.require(1, op)?;
        let x = self.pop_number(op)?;
        self.stack.push(Value::Real(f(x)));
        Ok(())
    }

    pub(crate) fn op_abs(&mut self) -> Result<(), EvalError> {
        self.unary("abs", f64::abs)
    }

    pub(crate) fn op_neg(&mut self) -> Result<(), EvalError> {
        self.unary("neg", |x| -x)
    }

    /// Usage: 16 sqrt -> 4
    pub(crate) fn op_sqrt(&mut self) -> Result<(), EvalError> {
        self.require(1, "sqrt")?;
        let x = self.pop_number("sqrt")?;
        if x < 0.0 {
            return Err(EvalError::RangeCheck {
                op: "sqrt".into(),
                detail: format!("negative operand {}", x),
            });
        }
        self.stack.push(Value::Real(x.sqrt()));
        Ok(())
    }

    /// Usage: 3.2 ceiling -> 4
    pub(crate) fn op_ceiling(&mut self) -> Result<(), EvalError> {
        self.unary("ceiling", f64::ceil)
    }

    /// Usage: 3.8 floor -> 3
    pub(crate) fn op_floor(&mut self) -> Result<(), EvalError> {
        self.unary("floor", f64::floor)
    }

    /// Halves round away from zero
    /// Usage: 3.5 round -> 4
    pub(crate) fn op_round(&mut self) -> Result<(), EvalError> {
        self.unary("round", f64::round)
    }
}
