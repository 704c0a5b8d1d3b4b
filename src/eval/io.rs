use super::{EvalError, Interpreter};
use crate::display::{format_repr, format_value};
use std::io::Write;

impl Interpreter {
    /// Write a string's characters, no newline
    /// Usage: (hello) print
    pub(crate) fn op_print(&mut self) -> Result<(), EvalError> {
        self.require(1, "print")?;
        let s = self.pop_string("print")?;
        self.out.write_all(s.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// `=`: display form and a newline
    pub(crate) fn op_print_value(&mut self) -> Result<(), EvalError> {
        self.require(1, "=")?;
        let val = self.pop_any("=")?;
        writeln!(self.out, "{}", format_value(&val))?;
        self.out.flush()?;
        Ok(())
    }

    /// `==`: strings parenthesized, everything else as `=`
    pub(crate) fn op_print_repr(&mut self) -> Result<(), EvalError> {
        self.require(1, "==")?;
        let val = self.pop_any("==")?;
        writeln!(self.out, "{}", format_repr(&val))?;
        self.out.flush()?;
        Ok(())
    }
}
