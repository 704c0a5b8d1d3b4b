//! Common test utilities for psi integration tests

#![allow(dead_code, unused_imports)]

pub use psi::display::OutputCapture;
pub use psi::{lex, EvalError, Interpreter, RunError, Scoping, Value};

/// Interpreter whose printed output is captured
pub fn interpreter(scoping: Scoping) -> (Interpreter, OutputCapture) {
    let capture = OutputCapture::new();
    let interp = Interpreter::with_output(scoping, Box::new(capture.clone()));
    (interp, capture)
}

/// Run input in dynamic mode and return the final stack
pub fn eval(input: &str) -> Result<Vec<Value>, RunError> {
    let (mut interp, _) = interpreter(Scoping::Dynamic);
    interp.run(input)?;
    Ok(interp.stack().to_vec())
}

/// Run input and return the printed output
pub fn output(input: &str) -> Result<String, RunError> {
    output_with(Scoping::Dynamic, input)
}

pub fn output_with(scoping: Scoping, input: &str) -> Result<String, RunError> {
    let (mut interp, capture) = interpreter(scoping);
    interp.run(input)?;
    Ok(capture.contents())
}

/// Run input that must fail and return the evaluation error
pub fn eval_err(input: &str) -> EvalError {
    match eval(input) {
        Err(RunError::Eval(e)) => e,
        Err(RunError::Lex(e)) => panic!("unexpected lex error for {:?}: {}", input, e),
        Ok(stack) => panic!("expected {:?} to fail, got stack {:?}", input, stack),
    }
}

/// Top of the final stack
pub fn top(input: &str) -> Value {
    eval(input)
        .expect("eval failed")
        .pop()
        .expect("empty stack")
}
