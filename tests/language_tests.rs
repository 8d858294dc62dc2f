//! End-to-end tests for both language variants and the notation translators

use minipascal::{
    execute, parse, parse_expression, to_lisp, to_rpn, tokenize, Calculator, Dialect, Error,
    Number, Program, Stage, Statement, TokenKind, TypeSpec, MAX_NESTING_DEPTH,
};

fn run_typed(source: &str) -> Result<minipascal::Scope, Error> {
    execute(source, Dialect::Typed)
}

fn run_untyped(source: &str) -> Result<minipascal::Scope, Error> {
    execute(source, Dialect::Untyped)
}

// ====================
// Typed programs
// ====================

#[test]
fn test_typed_program_with_declarations() {
    let source = r#"
PROGRAM Part10;
VAR
   number     : INTEGER;
   a, b, c, x : INTEGER;
   y          : REAL;

BEGIN {Part10}
   BEGIN
      number := 2;
      a := number;
      b := 10 * a + 10 * number DIV 4;
      c := a - - b
   END;
   x := 11;
   y := 20 / 7 + 3.14;
END.  {Part10}
"#;
    let scope = run_typed(source).unwrap();

    assert_eq!(scope.get("number"), Ok(Number::Int(2)));
    assert_eq!(scope.get("a"), Ok(Number::Int(2)));
    assert_eq!(scope.get("b"), Ok(Number::Int(25)));
    assert_eq!(scope.get("c"), Ok(Number::Int(27)));
    assert_eq!(scope.get("x"), Ok(Number::Int(11)));

    match scope.get("y").unwrap() {
        Number::Real(y) => assert!((y - (20.0 / 7.0 + 3.14)).abs() < 1e-12),
        other => panic!("expected real, got {:?}", other),
    }
}

#[test]
fn test_grammar_coverage() {
    let program = parse("PROGRAM p; VAR x: INTEGER; BEGIN x := 5 END.", Dialect::Typed).unwrap();

    assert_eq!(program.name.as_deref(), Some("p"));
    assert_eq!(program.block.declarations.len(), 1);
    assert_eq!(program.block.declarations[0].type_spec, TypeSpec::Integer);
    match &program.block.compound {
        Statement::Compound(statements) => {
            assert_eq!(statements.len(), 1);
            assert!(matches!(statements[0], Statement::Assignment { ref name, .. } if name == "x"));
        }
        other => panic!("expected compound, got {:?}", other),
    }
}

#[test]
fn test_case_insensitive_variable_identity() {
    let scope = run_typed("PROGRAM p; BEGIN a := 1; A := 2; END.").unwrap();
    assert_eq!(scope.len(), 1);
    assert_eq!(scope.get("A"), Ok(Number::Int(2)));
}

#[test]
fn test_keywords_any_case() {
    let scope = run_typed("program P; var X : integer; begin x := 7 div 2 end.").unwrap();
    assert_eq!(scope.get("X"), Ok(Number::Int(3)));
}

// ====================
// Untyped programs
// ====================

#[test]
fn test_untyped_sample_program() {
    let source = r#"
Begin
  begin
    nUmber := 2;
    a := nUmber;
    b := 10 * a + 10 * nUmber DIV 4;
    _c := a - - b
  end;
  x := 11;
  number := 3;
END.
"#;
    let scope = run_untyped(source).unwrap();

    let names: Vec<&str> = scope.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["_c", "a", "b", "nUmber", "number", "x"]);
    assert_eq!(scope.get("_c"), Ok(Number::Int(27)));
    assert_eq!(scope.get("nUmber"), Ok(Number::Int(2)));
    assert_eq!(scope.get("number"), Ok(Number::Int(3)));
}

#[test]
fn test_empty_block() {
    let program = parse("BEGIN END.", Dialect::Untyped).unwrap();
    assert_eq!(
        program.block.compound,
        Statement::Compound(vec![Statement::NoOp])
    );
    assert!(run_untyped("BEGIN END.").unwrap().is_empty());
}

#[test]
fn test_consecutive_semicolons() {
    let scope = run_untyped("BEGIN ;; a := 1;; END.").unwrap();
    assert_eq!(scope.get("a"), Ok(Number::Int(1)));
}

// ====================
// Arithmetic
// ====================

#[test]
fn test_left_associativity() {
    let scope = run_untyped("BEGIN r := 10 - 3 - 2 END.").unwrap();
    assert_eq!(scope.get("r"), Ok(Number::Int(5)));
}

#[test]
fn test_precedence() {
    let scope = run_untyped("BEGIN r := 2 + 3 * 4 END.").unwrap();
    assert_eq!(scope.get("r"), Ok(Number::Int(14)));
}

#[test]
fn test_integer_vs_float_division() {
    let scope = run_untyped("BEGIN i := 7 DIV 2; f := 7 / 2 END.").unwrap();
    assert_eq!(scope.get("i"), Ok(Number::Int(3)));
    assert_eq!(scope.get("f"), Ok(Number::Real(3.5)));
}

#[test]
fn test_division_by_zero() {
    let err = run_untyped("BEGIN z := 0; r := 1 DIV z END.").unwrap_err();
    assert_eq!(err, Error::DivisionByZero);
    assert_eq!(err.to_string(), "ArithmeticError: division by zero");
}

// ====================
// Errors
// ====================

#[test]
fn test_undefined_variable() {
    let err = run_untyped("BEGIN x := y END.").unwrap_err();
    assert_eq!(
        err,
        Error::UndefinedVariable {
            name: "y".to_string()
        }
    );
    assert_eq!(err.stage(), Stage::Eval);
}

#[test]
fn test_lex_error_stage() {
    let err = run_untyped("BEGIN x := 1 % 2 END.").unwrap_err();
    assert_eq!(err, Error::Lex { ch: '%', offset: 13 });
    assert_eq!(err.stage(), Stage::Lex);
}

#[test]
fn test_parse_error_stops_at_first_problem() {
    let err = run_untyped("BEGIN x := 1 y := 2 END.").unwrap_err();
    match err {
        Error::UnexpectedToken {
            expected, found, ..
        } => {
            assert_eq!(expected, "End");
            assert_eq!(found, "Token(Identifier, y)");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_deep_nesting_is_a_parse_error() {
    let parens = format!(
        "BEGIN x := {}1{} END.",
        "(".repeat(300),
        ")".repeat(300)
    );
    let err = run_untyped(&parens).unwrap_err();
    assert!(matches!(err, Error::NestingTooDeep { limit, .. } if limit == MAX_NESTING_DEPTH));
    assert_eq!(err.stage(), Stage::Parse);

    let signs = format!("BEGIN x := {}1 END.", "-".repeat(200_000));
    assert_eq!(run_untyped(&signs).unwrap_err().stage(), Stage::Parse);
}

#[test]
fn test_oversized_real_literal_rejected() {
    let huge = format!("{}.0", "9".repeat(400));

    let err = run_untyped(&format!("BEGIN x := {} END.", huge)).unwrap_err();
    assert!(matches!(err, Error::InvalidNumber { ref lexeme, offset: 11 } if *lexeme == huge));
    assert_eq!(err.stage(), Stage::Lex);

    assert!(to_rpn(&format!("{} + 1", huge)).is_err());
}

#[test]
fn test_failed_run_keeps_earlier_assignments() {
    let program = parse("BEGIN a := 1; b := missing; c := 3 END.", Dialect::Untyped).unwrap();
    let mut calculator = Calculator::with_dialect(Dialect::Untyped);

    assert!(calculator.run(&program).is_err());
    assert_eq!(calculator.scope().get("a"), Ok(Number::Int(1)));
    assert!(!calculator.scope().contains("c"));
}

// ====================
// Translators
// ====================

#[test]
fn test_translator_equivalence() {
    assert_eq!(to_rpn("(1 + 2) * 3").unwrap(), "1 2 + 3 *");
    assert_eq!(to_lisp("(1 + 2) * 3").unwrap(), "(* (+ 1 2) 3)");
}

#[test]
fn test_translators_reject_unary() {
    assert!(matches!(
        to_rpn("-5"),
        Err(Error::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        to_lisp("-5"),
        Err(Error::UnsupportedOperation { .. })
    ));
}

#[test]
fn test_translators_agree_with_calculator_shape() {
    let expr = parse_expression("14 + 2 * 3 - 6 / 2").unwrap();
    assert_eq!(
        minipascal::RpnTranslator::new().translate(&expr).unwrap(),
        "14 2 3 * + 6 2 / -"
    );
    assert_eq!(
        minipascal::LispTranslator::new().translate(&expr).unwrap(),
        "(- (+ 14 (* 2 3)) (/ 6 2))"
    );
    assert_eq!(
        Calculator::new().calculate(&expr).unwrap(),
        Number::Real(17.0)
    );
}

// ====================
// Re-parse and serialization
// ====================

#[test]
fn test_idempotent_reparse() {
    let source = "PROGRAM p; VAR a : REAL; BEGIN a := (1 + 2) * 3.5 END.";
    let first = parse(source, Dialect::Typed).unwrap();
    let mut second = parse(source, Dialect::Typed).unwrap();
    assert_eq!(first, second);

    // Trees share nothing: changing one leaves the other intact
    second.name = Some("q".to_string());
    assert_ne!(first, second);
    assert_eq!(first.name.as_deref(), Some("p"));
}

#[test]
fn test_ast_json_round_trip() {
    let program = parse("PROGRAM p; VAR a : INTEGER; BEGIN a := -1 END.", Dialect::Typed).unwrap();
    let json = serde_json::to_string(&program).unwrap();
    let restored: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, program);
}

#[test]
fn test_token_stream() {
    let tokens = tokenize("PROGRAM p; BEGIN a := 1.5 END.").unwrap();
    let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "Token(Program)",
            "Token(Identifier, p)",
            "Token(Semicolon)",
            "Token(Begin)",
            "Token(Identifier, a)",
            "Token(Assign)",
            "Token(RealConstant, 1.5)",
            "Token(End)",
            "Token(Dot)",
            "Token(EndOfFile)",
        ]
    );
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}
