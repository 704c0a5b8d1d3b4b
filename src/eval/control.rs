use super::helpers::type_error;
use super::{EvalError, Interpreter};
use crate::value::Value;
use tracing::debug;

impl Interpreter {
    /// Usage: bool {proc} if
    pub(crate) fn op_if(&mut self) -> Result<(), EvalError> {
        self.require(2, "if")?;
        let proc = self.pop_proc("if")?;
        let cond = self.pop_condition("if")?;
        if cond {
            self.run_procedure(&proc)?;
        }
        Ok(())
    }

    /// Usage: bool {then} {else} ifelse
    pub(crate) fn op_ifelse(&mut self) -> Result<(), EvalError> {
        self.require(3, "ifelse")?;
        let else_proc = self.pop_proc("ifelse")?;
        let then_proc = self.pop_proc("ifelse")?;
        let cond = self.pop_condition("ifelse")?;
        if cond {
            self.run_procedure(&then_proc)
        } else {
            self.run_procedure(&else_proc)
        }
    }

    fn pop_condition(&mut self, op: &str) -> Result<bool, EvalError> {
        match self.pop_any(op)? {
            Value::Bool(b) => Ok(b),
            other => Err(type_error(op, "boolean", &other)),
        }
    }

    /// Counted loop, inclusive of the limit. The counter is pushed before
    /// each run of the body; it stays an integer when start, step and limit
    /// all are. A real counter is advanced by repeated addition, so rounding
    /// can drop the final iteration: `0 0.1 0.3 {} for` runs three times.
    /// Usage: 1 1 5 {proc} for
    pub(crate) fn op_for(&mut self) -> Result<(), EvalError> {
        self.require(4, "for")?;
        let proc = self.pop_proc("for")?;
        let limit = self.pop_any("for")?;
        let step = self.pop_any("for")?;
        let start = self.pop_any("for")?;

        if let (Value::Int(start), Value::Int(step), Value::Int(limit)) = (&start, &step, &limit) {
            let (start, step, limit) = (*start, *step, *limit);
            if step == 0 {
                return Err(zero_step());
            }
            debug!(start, step, limit, "for (integer)");
            let mut counter = start;
            while (step > 0 && counter <= limit) || (step < 0 && counter >= limit) {
                self.stack.push(Value::Int(counter));
                self.run_procedure(&proc)?;
                if self.quit {
                    break;
                }
                counter = match counter.checked_add(step) {
                    Some(next) => next,
                    None => break,
                };
            }
            return Ok(());
        }

        let start = start.as_number().ok_or_else(|| type_error("for", "number", &start))?;
        let step = step.as_number().ok_or_else(|| type_error("for", "number", &step))?;
        let limit = limit.as_number().ok_or_else(|| type_error("for", "number", &limit))?;
        if step == 0.0 {
            return Err(zero_step());
        }
        debug!(start, step, limit, "for (real)");
        let mut counter = start;
        while (step > 0.0 && counter <= limit) || (step < 0.0 && counter >= limit) {
            self.stack.push(Value::Real(counter));
            self.run_procedure(&proc)?;
            if self.quit {
                break;
            }
            counter += step;
        }
        Ok(())
    }

    /// Run the body n times; a negative count runs it zero times
    /// Usage: 3 {proc} repeat
    pub(crate) fn op_repeat(&mut self) -> Result<(), EvalError> {
        self.require(2, "repeat")?;
        let proc = self.pop_proc("repeat")?;
        let n = self.pop_integer("repeat")?;
        for _ in 0..n.max(0) {
            self.run_procedure(&proc)?;
            if self.quit {
                break;
            }
        }
        Ok(())
    }

    /// Usage: {proc} exec
    pub(crate) fn op_exec(&mut self) -> Result<(), EvalError> {
        self.require(1, "exec")?;
        let proc = self.pop_proc("exec")?;
        self.run_procedure(&proc)
    }

    pub(crate) fn op_quit(&mut self) -> Result<(), EvalError> {
        debug!("quit");
        self.quit = true;
        Ok(())
    }
}

fn zero_step() -> EvalError {
    EvalError::RangeCheck {
        op: "for".into(),
        detail: "step must be non-zero".into(),
    }
}
