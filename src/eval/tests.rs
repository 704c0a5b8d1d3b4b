#[cfg(test)]
mod tests {
    use crate::display::OutputCapture;
    use crate::eval::*;
    use crate::lexer::{lex, Token};
    use crate::value::Value;

    fn interp(scoping: Scoping) -> (Interpreter, OutputCapture) {
        let capture = OutputCapture::new();
        let interp = Interpreter::with_output(scoping, Box::new(capture.clone()));
        (interp, capture)
    }

    fn eval_str(input: &str) -> Result<Interpreter, EvalError> {
        let tokens = lex(input).expect("lex failed");
        let (mut interp, _) = interp(Scoping::Dynamic);
        interp.execute(&tokens)?;
        Ok(interp)
    }

    #[test]
    fn literals_push_themselves() {
        let interp = eval_str("1 2.5 true (s) /n").unwrap();
        assert_eq!(
            interp.stack(),
            &[
                Value::Int(1),
                Value::Real(2.5),
                Value::Bool(true),
                Value::Str("s".into()),
                Value::Name("n".into()),
            ]
        );
    }

    #[test]
    fn nested_block_is_kept_raw() {
        let tokens = lex("{ { 1 2 } 3 }").unwrap();
        assert_eq!(tokens.len(), 7);
        let (interp, _) = interp(Scoping::Dynamic);
        let (procedure, next) = interp.build_procedure(&tokens, 0).unwrap();
        assert_eq!(next, 7);
        assert_eq!(
            &*procedure.body,
            &[
                Token::BlockStart,
                Token::Int(1),
                Token::Int(2),
                Token::BlockEnd,
                Token::Int(3),
            ]
        );
        assert!(procedure.captured.is_none());
    }

    #[test]
    fn lexical_mode_captures_the_top_dictionary() {
        let tokens = lex("{ x }").unwrap();
        let (interp, _) = interp(Scoping::Lexical);
        let (procedure, _) = interp.build_procedure(&tokens, 0).unwrap();
        let captured = procedure.captured.expect("captured scope");
        assert!(captured.ptr_eq(interp.dict_stack.top()));
    }

    #[test]
    fn block_cursor_skips_past_the_close() {
        let interp = eval_str("{ 1 } 2").unwrap();
        assert_eq!(interp.stack_count(), 2);
        assert_eq!(interp.peek(), Some(&Value::Int(2)));
    }

    #[test]
    fn unclosed_block_fails() {
        let result = eval_str("{ 1 { 2 }");
        assert!(matches!(result, Err(EvalError::UnclosedProcedure)));
    }

    #[test]
    fn stray_block_end_is_malformed() {
        let result = eval_str("1 }");
        assert!(matches!(result, Err(EvalError::MalformedInput(_))));
    }

    #[test]
    fn underflow_leaves_operand_in_place() {
        let tokens = lex("5 add").unwrap();
        let (mut interp, _) = interp(Scoping::Dynamic);
        let result = interp.execute(&tokens);
        assert!(matches!(result, Err(EvalError::StackUnderflow(op)) if op == "add"));
        assert_eq!(interp.stack(), &[Value::Int(5)]);
    }

    #[test]
    fn divide_by_zero() {
        assert!(matches!(eval_str("5 0 div"), Err(EvalError::DivideByZero(_))));
    }

    #[test]
    fn arithmetic_chain() {
        let interp = eval_str("3 4 add 2 mul").unwrap();
        assert_eq!(interp.peek(), Some(&Value::Real(14.0)));
    }

    #[test]
    fn for_pushes_each_counter() {
        let interp = eval_str("0 1 3 { } for").unwrap();
        assert_eq!(
            interp.stack(),
            &[Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn names_resolve_through_dictionaries() {
        let interp = eval_str("/x 42 def x").unwrap();
        assert_eq!(interp.peek(), Some(&Value::Int(42)));
    }

    #[test]
    fn undefined_name_fails() {
        let result = eval_str("nosuchname");
        assert!(matches!(result, Err(EvalError::NameUndefined(n)) if n == "nosuchname"));
    }

    #[test]
    fn resolved_procedure_is_pushed_not_run() {
        let interp = eval_str("/p { 1 2 } def p").unwrap();
        assert_eq!(interp.stack_count(), 1);
        assert!(matches!(interp.peek(), Some(Value::Proc(p)) if p.len() == 2));
    }

    #[test]
    fn operators_take_precedence_over_definitions() {
        let interp = eval_str("/add 5 def 1 2 add").unwrap();
        assert_eq!(interp.stack(), &[Value::Real(3.0)]);
    }

    #[test]
    fn quit_stops_the_batch() {
        let interp = eval_str("1 quit 2").unwrap();
        assert!(interp.has_quit());
        assert_eq!(interp.stack(), &[Value::Int(1)]);
    }

    #[test]
    fn quit_inside_loop_stops_the_loop() {
        let interp = eval_str("0 1 10 { dup 3 eq { quit } if } for").unwrap();
        assert!(interp.has_quit());
        assert_eq!(
            interp.stack(),
            &[Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn scoping_divergence() {
        let src = "/x 1 def /show { x = } def 10 dict begin /x 2 def show exec end";

        let (mut dynamic, out) = interp(Scoping::Dynamic);
        dynamic.run(src).unwrap();
        assert_eq!(out.contents(), "2\n");

        let (mut lexical, out) = interp(Scoping::Lexical);
        lexical.run(src).unwrap();
        assert_eq!(out.contents(), "1\n");
    }

    #[test]
    fn lexical_scope_is_restored_after_error() {
        let (mut interp, _) = interp(Scoping::Lexical);
        interp.run("/p { nosuchname } def 10 dict begin").unwrap();
        assert_eq!(interp.dict_depth(), 2);

        let result = interp.run("p exec");
        assert!(matches!(result, Err(RunError::Eval(EvalError::NameUndefined(_)))));
        assert_eq!(interp.dict_depth(), 2);
    }

    #[test]
    fn lexical_definitions_land_in_the_captured_scope() {
        let (mut interp, _) = interp(Scoping::Lexical);
        interp
            .run("/setter { /y 7 def } def 10 dict begin setter exec end y")
            .unwrap();
        assert_eq!(interp.peek(), Some(&Value::Int(7)));
    }

    #[test]
    fn dynamic_definitions_land_in_the_callers_scope() {
        let (mut interp, _) = interp(Scoping::Dynamic);
        interp
            .run("/setter { /y 7 def } def 10 dict begin setter exec end")
            .unwrap();
        assert!(matches!(interp.lookup("y"), Err(EvalError::NameUndefined(_))));
    }

    #[test]
    fn state_survives_a_failed_batch() {
        let (mut interp, _) = interp(Scoping::Dynamic);
        assert!(interp.run("1 2 0 div").is_err());
        // 1 was pushed before the failure; div consumed its operands
        assert_eq!(interp.stack(), &[Value::Int(1)]);
        interp.run("3 add").unwrap();
        assert_eq!(interp.peek(), Some(&Value::Real(4.0)));
    }

    #[test]
    fn operator_table_lists_builtins() {
        let table = OperatorTable::standard();
        assert!(table.contains("add"));
        assert!(table.contains("=="));
        assert!(!table.contains("nope"));
        let names = table.names();
        assert_eq!(names.len(), table.len());
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn run_reports_lex_errors() {
        let (mut interp, _) = interp(Scoping::Dynamic);
        assert!(matches!(interp.run("(open"), Err(RunError::Lex(_))));
    }
}
