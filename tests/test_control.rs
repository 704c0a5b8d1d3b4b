//! Integration tests for flow control and scoping

#[path = "common/mod.rs"]
mod common;
use common::{eval, eval_err, interpreter, output, output_with, top, EvalError, Scoping, Value};

#[test]
fn test_if() {
    assert_eq!(top("true { 1 } if"), Value::Int(1));
    assert_eq!(eval("false { 1 } if").unwrap(), vec![]);
    assert_eq!(output("5 3 gt { (yes) print } if").unwrap(), "yes");
}

#[test]
fn test_if_requires_boolean() {
    assert!(matches!(eval_err("1 { 2 } if"), EvalError::TypeError { .. }));
}

#[test]
fn test_if_requires_procedure() {
    assert!(matches!(eval_err("true 2 if"), EvalError::TypeError { .. }));
}

#[test]
fn test_ifelse() {
    assert_eq!(top("true { 1 } { 2 } ifelse"), Value::Int(1));
    assert_eq!(top("false { 1 } { 2 } ifelse"), Value::Int(2));
    assert_eq!(
        output("5 3 lt { (smaller) } { (bigger) } ifelse print").unwrap(),
        "bigger"
    );
}

#[test]
fn test_for_counts_up_inclusive() {
    assert_eq!(
        eval("0 1 3 { } for").unwrap(),
        vec![Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn test_for_counts_down() {
    assert_eq!(
        eval("3 -1 1 { } for").unwrap(),
        vec![Value::Int(3), Value::Int(2), Value::Int(1)]
    );
}

#[test]
fn test_for_empty_range() {
    assert_eq!(eval("5 1 1 { } for").unwrap(), vec![]);
}

#[test]
fn test_for_with_real_step() {
    assert_eq!(
        eval("0 0.5 1 { } for").unwrap(),
        vec![Value::Real(0.0), Value::Real(0.5), Value::Real(1.0)]
    );
}

#[test]
fn test_for_real_step_accumulates_rounding() {
    // 0.1 + 0.1 + 0.1 overshoots 0.3, so the limit itself is never reached
    assert_eq!(
        eval("0 0.1 0.3 { } for").unwrap(),
        vec![Value::Real(0.0), Value::Real(0.1), Value::Real(0.2)]
    );
}

#[test]
fn test_for_accumulates() {
    assert_eq!(top("0 1 1 4 { add } for"), Value::Real(10.0));
    assert_eq!(output("1 1 3 { dup mul = } for").unwrap(), "1\n4\n9\n");
}

#[test]
fn test_for_zero_step() {
    assert!(matches!(eval_err("0 0 5 { } for"), EvalError::RangeCheck { .. }));
}

#[test]
fn test_repeat() {
    assert_eq!(output("3 { (hi) print } repeat").unwrap(), "hihihi");
    assert_eq!(eval("0 { 1 } repeat").unwrap(), vec![]);
    assert_eq!(eval("-2 { 1 } repeat").unwrap(), vec![]);
}

#[test]
fn test_exec() {
    assert_eq!(top("{ 1 2 add } exec"), Value::Real(3.0));
    assert_eq!(top("/sq { dup mul } def 5 sq exec"), Value::Real(25.0));
}

#[test]
fn test_exec_requires_procedure() {
    assert!(matches!(eval_err("5 exec"), EvalError::TypeError { .. }));
}

#[test]
fn test_nested_procedures() {
    assert_eq!(top("{ { 1 2 add } exec } exec"), Value::Real(3.0));
    assert_eq!(top("true { false { 1 } { 2 } ifelse } if"), Value::Int(2));
}

#[test]
fn test_error_inside_procedure_propagates() {
    assert!(matches!(eval_err("{ 1 0 div } exec"), EvalError::DivideByZero(_)));
}

#[test]
fn test_quit() {
    let (mut interp, capture) = interpreter(Scoping::Dynamic);
    interp.run("(a) print quit (b) print").unwrap();
    assert!(interp.has_quit());
    assert_eq!(capture.contents(), "a");
    // nothing runs after quit
    interp.run("1").unwrap();
    assert_eq!(interp.stack_count(), 0);
}

#[test]
fn test_quit_stops_repeat() {
    assert_eq!(output("5 { (x) print quit } repeat").unwrap(), "x");
}

const DIVERGENCE: &str = "/x 1 def /show { x = } def 10 dict begin /x 2 def show exec end";

#[test]
fn test_dynamic_scoping() {
    assert_eq!(output_with(Scoping::Dynamic, DIVERGENCE).unwrap(), "2\n");
}

#[test]
fn test_lexical_scoping() {
    assert_eq!(output_with(Scoping::Lexical, DIVERGENCE).unwrap(), "1\n");
}

#[test]
fn test_lexical_capture_sees_later_definitions() {
    // the captured dictionary is shared, not snapshotted
    let src = "/show { z = } def /z 5 def 10 dict begin /z 6 def show exec end";
    assert_eq!(output_with(Scoping::Lexical, src).unwrap(), "5\n");
}

#[test]
fn test_procedure_built_in_inner_scope() {
    // the literal is left on the operand stack and run after `end`
    let src = "/x 1 def 10 dict begin /x 2 def { x = } end exec";
    assert_eq!(output_with(Scoping::Lexical, src).unwrap(), "2\n");
    assert_eq!(output_with(Scoping::Dynamic, src).unwrap(), "1\n");
}

#[test]
fn test_lexical_scope_restored_after_error() {
    let (mut interp, _) = interpreter(Scoping::Lexical);
    interp.run("/bad { undefinedname } def 10 dict begin").unwrap();
    assert!(interp.run("bad exec").is_err());
    assert_eq!(interp.dict_depth(), 2);
    interp.run("end").unwrap();
    assert_eq!(interp.dict_depth(), 1);
}
