//! Text forms of values
//!
//! `=` prints the display form, `==` the source-like form (strings in
//! parentheses). The REPL and trace output reuse the same formatting.

use crate::lexer::Token;
use crate::value::{Procedure, Value};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Display form, as written by `=`
pub fn format_value(val: &Value) -> String {
    match val {
        Value::Int(n) => n.to_string(),
        Value::Real(x) => x.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Str(s) => s.clone(),
        Value::Name(n) => n.clone(),
        Value::Dict(_) => "-dict-".to_string(),
        Value::Proc(p) => format_procedure(p),
    }
}

/// Source-like form, as written by `==`: strings parenthesized, everything
/// else as `=`
pub fn format_repr(val: &Value) -> String {
    match val {
        Value::Str(s) => format!("({})", s),
        other => format_value(other),
    }
}

/// `{1 2 add}`
pub fn format_procedure(p: &Procedure) -> String {
    format!("{{{}}}", format_tokens(&p.body))
}

pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bottom-to-top listing on one line, for trace output
pub fn format_stack_line(values: &[Value]) -> String {
    if values.is_empty() {
        return "(empty)".to_string();
    }
    values.iter().map(format_repr).collect::<Vec<_>>().join(" ")
}

/// Numbered listing, top of stack first, for the REPL `.stack` command
pub fn format_stack_listing(values: &[Value]) -> String {
    if values.is_empty() {
        return "  (empty)".to_string();
    }
    values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, v)| format!("  {}. {}  \x1b[90m{}\x1b[0m", i, format_repr(v), v.type_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// In-memory writer for capturing `print`/`=`/`==` output.
///
/// Clones share the same buffer, so one handle can be given to the
/// interpreter while another reads the text back.
#[derive(Debug, Clone, Default)]
pub struct OutputCapture(Rc<RefCell<Vec<u8>>>);

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Return the captured text and empty the buffer
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for OutputCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
