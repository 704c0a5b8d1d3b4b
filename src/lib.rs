//! psi - a PostScript-style stack language interpreter
//!
//! # Overview
//!
//! Source text is tokenized, then executed token by token against an
//! operand stack and a stack of dictionaries. Operators pop their operands
//! and push their results.
//!
//! # Core Concepts
//!
//! ## Postfix Evaluation
//!
//! ```text
//! 3 4 add              % Stack: [7]
//! 3 4 add 2 mul =      % prints 14
//! ```
//!
//! ## Names and Definitions
//!
//! ```text
//! /x 42 def            % bind x in the current dictionary
//! x 1 add =            % prints 43
//! 10 dict begin        % enter a new scope
//! /x 0 def             % shadows the outer x
//! end                  % leave it again
//! ```
//!
//! ## Procedures (Deferred Execution)
//!
//! ```text
//! { 1 add }            % Stack: [{1 add}] - not run yet
//! /inc { 1 add } def
//! 5 inc exec           % flow control operators run procedures
//! true { (yes) print } if
//! 1 1 5 { = } for      % prints 1 through 5
//! ```
//!
//! ## Scoping
//!
//! With dynamic scoping (the default) a procedure sees the scopes active
//! where it is called. With lexical scoping it sees only the dictionary that
//! was current where it was written.
//!
//! # Example
//!
//! ```rust
//! use psi::{Interpreter, Scoping, Value};
//!
//! let mut interp = Interpreter::new(Scoping::Dynamic);
//! interp.run("3 4 add 2 mul").unwrap();
//! assert_eq!(interp.peek(), Some(&Value::Real(14.0)));
//! ```

pub mod dict;
pub mod display;
pub mod eval;
pub mod lexer;
pub mod stack;
pub mod value;

// Re-export commonly used items
pub use dict::{DictRef, DictStack, Dictionary};
pub use eval::{EvalError, Interpreter, Operator, OperatorTable, RunError, Scoping};
pub use lexer::{lex, LexError, Token};
pub use stack::OperandStack;
pub use value::{Procedure, Value};

/// Convenience function: run source in a fresh interpreter and return the
/// final operand stack, bottom to top
pub fn run(source: &str, scoping: Scoping) -> Result<Vec<Value>, RunError> {
    let mut interp = Interpreter::new(scoping);
    interp.run(source)?;
    Ok(interp.stack().to_vec())
}
