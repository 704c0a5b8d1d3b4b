//! Integration tests for string operators

#[path = "common/mod.rs"]
mod common;
use common::{eval_err, top, EvalError, Value};

fn s(text: &str) -> Value {
    Value::Str(text.to_string())
}

#[test]
fn test_length() {
    assert_eq!(top("(hello) length"), Value::Int(5));
    assert_eq!(top("() length"), Value::Int(0));
    assert_eq!(top("(a b c) length"), Value::Int(5));
}

#[test]
fn test_length_rejects_numbers() {
    assert!(matches!(eval_err("5 length"), EvalError::TypeError { .. }));
}

#[test]
fn test_get() {
    assert_eq!(top("(hello) 0 get"), Value::Int(104));
    assert_eq!(top("(hello) 4 get"), Value::Int(111));
}

#[test]
fn test_get_out_of_range() {
    assert!(matches!(
        eval_err("(hello) 5 get"),
        EvalError::IndexOutOfRange { index: 5, len: 5, .. }
    ));
    assert!(matches!(eval_err("(hello) -1 get"), EvalError::IndexOutOfRange { .. }));
}

#[test]
fn test_getinterval() {
    assert_eq!(top("(hello) 1 3 getinterval"), s("ell"));
    assert_eq!(top("(hello) 0 5 getinterval"), s("hello"));
    assert_eq!(top("(hello) 5 0 getinterval"), s(""));
}

#[test]
fn test_getinterval_out_of_range() {
    assert!(matches!(
        eval_err("(hello) 3 5 getinterval"),
        EvalError::IndexOutOfRange { .. }
    ));
    assert!(matches!(
        eval_err("(hello) 6 0 getinterval"),
        EvalError::IndexOutOfRange { .. }
    ));
    assert!(matches!(
        eval_err("(hello) 1 -1 getinterval"),
        EvalError::IndexOutOfRange { .. }
    ));
}

#[test]
fn test_putinterval() {
    assert_eq!(top("(hello) 1 (EL) putinterval"), s("hELlo"));
    assert_eq!(top("(hello) 0 (J) putinterval"), s("Jello"));
}

#[test]
fn test_putinterval_extends() {
    assert_eq!(top("(hello) 3 (PING) putinterval"), s("helPING"));
    assert_eq!(top("(ab) 2 (cd) putinterval"), s("abcd"));
}

#[test]
fn test_putinterval_out_of_range() {
    assert!(matches!(
        eval_err("(ab) 3 (x) putinterval"),
        EvalError::IndexOutOfRange { .. }
    ));
}

#[test]
fn test_string_comparison() {
    assert_eq!(top("(abc) (abd) lt"), Value::Bool(true));
    assert_eq!(top("(b) (a) gt"), Value::Bool(true));
    assert_eq!(top("(same) (same) eq"), Value::Bool(true));
    assert_eq!(top("(x) (y) ne"), Value::Bool(true));
}
