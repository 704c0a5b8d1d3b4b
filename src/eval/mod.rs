//! Execution engine for psi
//!
//! The interpreter walks a token stream against an operand stack and a stack
//! of dictionaries:
//! - Literals push themselves
//! - `/name` pushes a name without resolving it
//! - `{ ... }` is collected into a procedure and pushed, not run
//! - Any other word is looked up in the operator table first, then in the
//!   dictionary stack (innermost scope first); a dictionary hit is pushed
//!
//! # Operator Dispatch
//!
//! Operators are plain `fn(&mut Interpreter)` values registered once in
//! `OperatorTable::standard()`. Each operator group lives in its own module
//! as an `impl Interpreter` block and does its own arity and type checks.
//!
//! # Scoping
//!
//! In dynamic mode a procedure body resolves names against whatever scopes
//! are active when it runs. In lexical mode every procedure remembers the
//! dictionary that was on top when it was built, and runs with that single
//! dictionary as its whole scope chain.

mod compare;
mod control;
mod dictionary;
mod helpers;
mod io;
mod math;
mod operators;
mod stack;
mod string;
mod tests;

pub use operators::{Operator, OperatorTable};

use crate::dict::DictStack;
use crate::display;
use crate::lexer::{lex, LexError, Token};
use crate::stack::OperandStack;
use crate::value::{Procedure, Value};
use std::io::Write;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Stack underflow: {0}")]
    StackUnderflow(String),
    #[error("Type error in {op}: expected {expected}, got {got}")]
    TypeError {
        op: String,
        expected: &'static str,
        got: &'static str,
    },
    #[error("Type mismatch in {0}")]
    TypeMismatch(String),
    #[error("Divide by zero in {0}")]
    DivideByZero(String),
    #[error("Dictionary capacity exceeded")]
    DictCapacityExceeded,
    #[error("Dictionary stack underflow")]
    DictStackUnderflow,
    #[error("Undefined name: {0}")]
    NameUndefined(String),
    #[error("Unclosed procedure")]
    UnclosedProcedure,
    #[error("Index out of range in {op}: {index} (length {len})")]
    IndexOutOfRange { op: String, index: i64, len: usize },
    #[error("Range check in {op}: {detail}")]
    RangeCheck { op: String, detail: String },
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error from `Interpreter::run`, which tokenizes before executing
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// How procedure bodies resolve free names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scoping {
    /// Resolve against the scopes active at the call site
    #[default]
    Dynamic,
    /// Resolve against the scope captured when the procedure was built
    Lexical,
}

impl Scoping {
    pub fn label(self) -> &'static str {
        match self {
            Scoping::Dynamic => "dynamic",
            Scoping::Lexical => "lexical",
        }
    }
}

/// The interpreter owns all mutable state for one session
pub struct Interpreter {
    /// The operand stack
    pub(crate) stack: OperandStack,
    /// Scope chain, global dictionary at the bottom
    pub(crate) dict_stack: DictStack,
    /// Fixed for the lifetime of the interpreter
    pub(crate) scoping: Scoping,
    /// Built-in operators, populated once
    pub(crate) operators: OperatorTable,
    /// Set by `quit`; stops all further token processing
    pub(crate) quit: bool,
    /// Destination for print / = / ==
    pub(crate) out: Box<dyn Write>,
    /// Trace mode - print stack after each top-level token
    pub(crate) trace_mode: bool,
    /// Procedure nesting depth (0 = top-level batch)
    pub(crate) call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Scoping::Dynamic)
    }
}

impl Interpreter {
    pub fn new(scoping: Scoping) -> Self {
        Self::with_output(scoping, Box::new(std::io::stdout()))
    }

    /// Create an interpreter whose text output goes to `out`
    pub fn with_output(scoping: Scoping, out: Box<dyn Write>) -> Self {
        Interpreter {
            stack: OperandStack::new(),
            dict_stack: DictStack::new(),
            scoping,
            operators: OperatorTable::standard(),
            quit: false,
            out,
            trace_mode: false,
            call_depth: 0,
        }
    }

    pub fn scoping(&self) -> Scoping {
        self.scoping
    }

    /// Enable or disable trace mode
    pub fn set_trace_mode(&mut self, enabled: bool) {
        self.trace_mode = enabled;
    }

    /// Number of values on the operand stack (for the prompt)
    pub fn stack_count(&self) -> usize {
        self.stack.count()
    }

    /// Operand stack, bottom to top
    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    /// Top of the operand stack
    pub fn peek(&self) -> Option<&Value> {
        self.stack.peek()
    }

    pub fn clear_stack(&mut self) {
        self.stack.clear();
    }

    /// True once `quit` has run
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Number of dictionaries on the dictionary stack
    pub fn dict_depth(&self) -> usize {
        self.dict_stack.depth()
    }

    /// Names defined in any active scope (for tab completion)
    pub fn defined_names(&self) -> Vec<String> {
        self.dict_stack.names()
    }

    /// Names of the built-in operators (for tab completion)
    pub fn operator_names(&self) -> Vec<&'static str> {
        self.operators.names()
    }

    /// Look a name up through the dictionary stack
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.dict_stack.lookup(name)
    }

    /// Tokenize and execute source text
    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        let tokens = lex(source)?;
        self.execute(&tokens)?;
        Ok(())
    }

    /// Execute a token sequence.
    ///
    /// Stops at the first error; tokens already applied stay applied. Stops
    /// quietly once the quit flag is set.
    pub fn execute(&mut self, tokens: &[Token]) -> Result<(), EvalError> {
        if self.call_depth == 0 {
            debug!(tokens = tokens.len(), scoping = self.scoping.label(), "executing batch");
        }

        let mut pos = 0;
        while pos < tokens.len() {
            if self.quit {
                debug!("quit flag set, stopping");
                break;
            }

            let token = &tokens[pos];
            trace!(%token, depth = self.call_depth, "dispatch");

            let next = match token {
                Token::Int(n) => {
                    self.stack.push(Value::Int(*n));
                    pos + 1
                }
                Token::Float(x) => {
                    self.stack.push(Value::Real(*x));
                    pos + 1
                }
                Token::Bool(b) => {
                    self.stack.push(Value::Bool(*b));
                    pos + 1
                }
                Token::Str(s) => {
                    self.stack.push(Value::Str(s.clone()));
                    pos + 1
                }
                Token::Name(name) => {
                    self.stack.push(Value::Name(name.clone()));
                    pos + 1
                }
                Token::Operator(name) => {
                    self.dispatch(name)?;
                    pos + 1
                }
                Token::BlockStart => {
                    let (procedure, next) = self.build_procedure(tokens, pos)?;
                    self.stack.push(Value::Proc(procedure));
                    next
                }
                // Every matched `}` is consumed by build_procedure
                Token::BlockEnd => {
                    return Err(EvalError::MalformedInput("unmatched '}'".into()));
                }
            };

            if self.trace_mode && self.call_depth == 0 {
                self.print_trace(token);
            }
            pos = next;
        }

        Ok(())
    }

    /// Operator table first, then the dictionary stack
    fn dispatch(&mut self, name: &str) -> Result<(), EvalError> {
        if let Some(op) = self.operators.get(name) {
            return op(self);
        }
        let value = self.dict_stack.lookup(name)?;
        self.stack.push(value);
        Ok(())
    }

    /// Collect the procedure whose `{` sits at `start`.
    ///
    /// Returns the procedure and the index just past its matching `}`.
    /// Nested blocks are copied into the body as raw tokens.
    pub(crate) fn build_procedure(
        &self,
        tokens: &[Token],
        start: usize,
    ) -> Result<(Procedure, usize), EvalError> {
        let mut depth = 1usize;
        let mut pos = start + 1;

        while pos < tokens.len() {
            match tokens[pos] {
                Token::BlockStart => depth += 1,
                Token::BlockEnd => {
                    depth -= 1;
                    if depth == 0 {
                        let captured = match self.scoping {
                            Scoping::Lexical => Some(self.dict_stack.top().clone()),
                            Scoping::Dynamic => None,
                        };
                        let body = tokens[start + 1..pos].into();
                        return Ok((Procedure::new(body, captured), pos + 1));
                    }
                }
                _ => {}
            }
            pos += 1;
        }

        Err(EvalError::UnclosedProcedure)
    }

    /// Run a procedure body on the shared operand stack.
    ///
    /// A lexically captured procedure runs with its captured dictionary as
    /// the only scope; the caller's dictionary stack is put back afterwards,
    /// on the error path too.
    pub(crate) fn run_procedure(&mut self, procedure: &Procedure) -> Result<(), EvalError> {
        trace!(len = procedure.len(), depth = self.call_depth, "run procedure");
        self.call_depth += 1;

        let result = match (self.scoping, &procedure.captured) {
            (Scoping::Lexical, Some(captured)) => {
                let saved =
                    std::mem::replace(&mut self.dict_stack, DictStack::scoped(captured.clone()));
                let result = self.execute(&procedure.body);
                self.dict_stack = saved;
                result
            }
            _ => self.execute(&procedure.body),
        };

        self.call_depth -= 1;
        result
    }

    /// Print trace output showing the token and the stack after it
    pub(crate) fn print_trace(&self, token: &Token) {
        eprintln!(
            "\x1b[90m>>> {} │ {}\x1b[0m",
            token,
            display::format_stack_line(self.stack.as_slice())
        );
    }
}
