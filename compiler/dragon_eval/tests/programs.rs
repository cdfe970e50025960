//! End-to-end tests running small DragonLisp programs.
//!
//! Programs are built with `AstFactory` and executed form by form, with
//! `PRINT` output captured in a buffer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use dragon_eval::{
    buffer_handler, EvalError, EvalErrorKind, Interpreter, SharedPrintHandler, Value,
};
use dragon_ir::{AstFactory, BinaryOp, ListOp, StringInterner, TopLevel, UnaryOp};
use pretty_assertions::assert_eq;

/// Execute every form, returning the value of the last expression.
fn run_program(interp: &mut Interpreter<'_>, forms: Vec<TopLevel>) -> Result<Value, EvalError> {
    let mut last = Value::nil();
    for form in forms {
        if let Some(value) = interp.execute(form)? {
            last = value;
        }
    }
    Ok(last)
}

fn interpreter(interner: &StringInterner) -> (Interpreter<'_>, SharedPrintHandler) {
    let handler = buffer_handler();
    let interp = Interpreter::builder(interner)
        .print_handler(handler.clone())
        .build();
    (interp, handler)
}

#[test]
fn loop_for_sums_inclusive_range() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.defvar("sum", f.int(0)).into(),
            f.loop_for(
                "i",
                f.int(1),
                f.int(3),
                vec![f.setq("sum", f.list(ListOp::Add, vec![f.ident("sum"), f.ident("i")]))],
            )
            .into(),
            f.ident("sum").into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(6));
}

#[test]
fn loop_for_counter_is_loop_local() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let value = interp
        .execute(f.loop_for("i", f.int(1), f.int(2), vec![]).into())
        .unwrap();
    assert_eq!(value, Some(Value::nil()));
    let err = interp.execute(f.ident("i").into()).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UndefinedVariable { .. }));
}

#[test]
fn loop_for_float_bounds() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, output) = interpreter(&interner);

    interp
        .execute(
            f.loop_for(
                "x",
                f.float(0.5),
                f.int(2),
                vec![f.unary(UnaryOp::Print, f.ident("x"))],
            )
            .into(),
        )
        .unwrap();
    assert_eq!(output.output(), "0.500000\n1.500000\n");

    let err = interp
        .execute(f.loop_for("x", f.string("a"), f.int(2), vec![]).into())
        .unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            operator: "LOOP FOR",
            ..
        }
    ));
}

#[test]
fn dotimes_binds_zero_based_counter() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, output) = interpreter(&interner);

    let value = interp
        .execute(
            f.dotimes("k", f.int(3), vec![f.unary(UnaryOp::Print, f.ident("k"))])
                .into(),
        )
        .unwrap();
    assert_eq!(value, Some(Value::nil()));
    assert_eq!(output.output(), "0\n1\n2\n");

    interp
        .execute(f.dotimes("k", f.int(-2), vec![f.unary(UnaryOp::Print, f.ident("k"))]).into())
        .unwrap();
    assert_eq!(output.output(), "0\n1\n2\n");
}

#[test]
fn loop_forever_ends_on_return() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.defvar("n", f.int(0)).into(),
            f.loop_forever(vec![
                f.incf(f.place("n"), f.int(1)),
                f.if_expr(
                    f.binary(BinaryOp::GtEq, f.ident("n"), f.int(5)),
                    f.return_expr(f.list(ListOp::Mul, vec![f.ident("n"), f.int(10)])),
                    None,
                ),
            ])
            .into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(50));
}

#[test]
fn function_call_binds_arguments() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.function(
                "add",
                &["a", "b"],
                vec![f.list(ListOp::Add, vec![f.ident("a"), f.ident("b")])],
            )
            .into(),
            f.call("add", vec![f.int(2), f.int(3)]).into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(5));

    let err = interp
        .execute(f.call("add", vec![f.int(2)]).into())
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TooFewArguments {
            name: "add".to_string(),
            expected: 2,
            got: 1,
        }
    );
    assert_eq!(
        interp
            .execute(f.call("add", vec![f.int(1), f.int(1), f.int(99)]).into())
            .unwrap(),
        Some(Value::int(2))
    );
}

#[test]
fn empty_function_body_yields_nil() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    interp.execute(f.function("noop", &[], vec![]).into()).unwrap();
    assert_eq!(
        interp.execute(f.call("noop", vec![]).into()).unwrap(),
        Some(Value::nil())
    );
}

#[test]
fn undefined_function_skips_argument_evaluation() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, output) = interpreter(&interner);

    let err = interp
        .execute(
            f.call("missing", vec![f.unary(UnaryOp::Print, f.string("arg"))])
                .into(),
        )
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedFunction {
            name: "missing".to_string()
        }
    );
    assert_eq!(output.output(), "");
}

#[test]
fn recursive_factorial() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let fact = f.function(
        "fact",
        &["n"],
        vec![f.if_expr(
            f.binary(BinaryOp::LtEq, f.ident("n"), f.int(1)),
            f.int(1),
            Some(f.list(
                ListOp::Mul,
                vec![
                    f.ident("n"),
                    f.call("fact", vec![f.list(ListOp::Sub, vec![f.ident("n"), f.int(1)])]),
                ],
            )),
        )],
    );
    let result = run_program(
        &mut interp,
        vec![fact.into(), f.call("fact", vec![f.int(10)]).into()],
    )
    .unwrap();
    assert_eq!(result, Value::int(3_628_800));
}

#[test]
fn function_body_sees_globals_not_caller_locals() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.defvar("x", f.int(1)).into(),
            f.function("show", &[], vec![f.ident("x")]).into(),
            f.function("caller", &["x"], vec![f.call("show", vec![])]).into(),
            f.call("caller", vec![f.int(99)]).into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(1));
}

#[test]
fn function_can_update_globals() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.defvar("count", f.int(0)).into(),
            f.function("bump", &[], vec![f.incf(f.place("count"), f.int(1))]).into(),
            f.call("bump", vec![]).into(),
            f.call("bump", vec![]).into(),
            f.ident("count").into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(2));
}

#[test]
fn return_through_nested_ifs() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, output) = interpreter(&interner);

    // (defun classify (n)
    //   (if (< n 100) (if (< n 0) (return "negative")))
    //   (print "after")
    //   "other")
    let classify = f.function(
        "classify",
        &["n"],
        vec![
            f.if_expr(
                f.binary(BinaryOp::Lt, f.ident("n"), f.int(100)),
                f.if_expr(
                    f.binary(BinaryOp::Lt, f.ident("n"), f.int(0)),
                    f.return_expr(f.string("negative")),
                    None,
                ),
                None,
            ),
            f.unary(UnaryOp::Print, f.string("after")),
            f.string("other"),
        ],
    );
    interp.execute(classify.into()).unwrap();

    assert_eq!(
        interp.execute(f.call("classify", vec![f.int(-5)]).into()).unwrap(),
        Some(Value::string("negative"))
    );
    assert_eq!(output.output(), "");
    assert_eq!(
        interp.execute(f.call("classify", vec![f.int(5)]).into()).unwrap(),
        Some(Value::string("other"))
    );
    assert_eq!(output.output(), "after\n");
}

#[test]
fn unselected_if_keeps_previous_statement_value() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.function("g", &[], vec![f.int(1), f.if_expr(f.nil(), f.int(2), None)]).into(),
            f.call("g", vec![]).into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(1));

    let only_skipped = f.function("h", &[], vec![f.if_expr(f.nil(), f.int(2), None)]);
    interp.execute(only_skipped.into()).unwrap();
    assert_eq!(
        interp.execute(f.call("h", vec![]).into()).unwrap(),
        Some(Value::nil())
    );
}

#[test]
fn redefinition_replaces_function() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.function("g", &[], vec![f.int(1)]).into(),
            f.function("g", &[], vec![f.int(2)]).into(),
            f.call("g", vec![]).into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(2));
}

#[test]
fn call_depth_limit_reports_backtrace() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let mut interp = Interpreter::builder(&interner)
        .print_handler(buffer_handler())
        .max_call_depth(3)
        .build();

    interp
        .execute(f.function("forever", &[], vec![f.call("forever", vec![])]).into())
        .unwrap();
    let err = interp
        .execute(f.call("forever", vec![]).into())
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 3 });
    assert_eq!(
        err.backtrace.unwrap().frames(),
        ["forever", "forever", "forever"]
    );

    // The stack unwinds fully; later calls work again
    interp.execute(f.function("one", &[], vec![f.int(1)]).into()).unwrap();
    assert_eq!(
        interp.execute(f.call("one", vec![]).into()).unwrap(),
        Some(Value::int(1))
    );
}

#[test]
fn backtrace_lists_frames_innermost_first() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    run_program(
        &mut interp,
        vec![
            f.function(
                "inner",
                &[],
                vec![f.list(ListOp::Div, vec![f.int(1), f.int(0)])],
            )
            .into(),
            f.function("outer", &[], vec![f.call("inner", vec![])]).into(),
        ],
    )
    .unwrap();

    let err = interp.execute(f.call("outer", vec![]).into()).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    let backtrace = err.backtrace.unwrap();
    assert_eq!(backtrace.frames(), ["inner", "outer"]);
    assert_eq!(
        backtrace.to_string(),
        "call backtrace:\n  0: inner\n  1: outer\n"
    );

    let top_level = interp
        .execute(f.list(ListOp::Div, vec![f.int(1), f.int(0)]).into())
        .unwrap_err();
    assert_eq!(top_level.backtrace, None);
}

#[test]
fn and_or_evaluate_every_operand() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, output) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.defvar("c", f.int(0)).into(),
            f.list(ListOp::And, vec![f.nil(), f.incf(f.place("c"), f.int(1))]).into(),
            f.list(
                ListOp::Or,
                vec![f.int(1), f.unary(UnaryOp::Print, f.string("evaluated"))],
            )
            .into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(1));
    assert_eq!(output.output(), "evaluated\n");
    assert_eq!(
        interp.execute(f.ident("c").into()).unwrap(),
        Some(Value::int(1))
    );
}

#[test]
fn array_arguments_are_copies() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    let result = run_program(
        &mut interp,
        vec![
            f.defvar("arr", f.unary(UnaryOp::MakeArray, f.int(2))).into(),
            f.function(
                "poke",
                &["a"],
                vec![
                    f.setf(f.array_place("a", f.int(0)), f.int(9)),
                    f.aref("a", f.int(0)),
                ],
            )
            .into(),
            f.call("poke", vec![f.ident("arr")]).into(),
        ],
    )
    .unwrap();
    assert_eq!(result, Value::int(9));
    assert_eq!(
        interp.execute(f.ident("arr").into()).unwrap().unwrap().to_string(),
        "[NIL, NIL]"
    );
}

#[test]
fn global_array_mutation_in_loop() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, output) = interpreter(&interner);

    run_program(
        &mut interp,
        vec![
            f.defvar("squares", f.unary(UnaryOp::MakeArray, f.int(4))).into(),
            f.dotimes(
                "i",
                f.int(4),
                vec![f.setf(
                    f.array_place("squares", f.ident("i")),
                    f.list(ListOp::Mul, vec![f.ident("i"), f.ident("i")]),
                )],
            )
            .into(),
            f.unary(UnaryOp::Print, f.ident("squares")).into(),
        ],
    )
    .unwrap();
    assert_eq!(output.output(), "[0, 1, 4, 9]\n");
}

#[test]
fn error_aborts_only_the_failing_form() {
    let interner = StringInterner::new();
    let f = AstFactory::new(&interner);
    let (mut interp, _) = interpreter(&interner);

    interp.execute(f.defvar("x", f.int(1)).into()).unwrap();
    assert!(interp.execute(f.ident("nope").into()).is_err());
    assert_eq!(
        interp.execute(f.ident("x").into()).unwrap(),
        Some(Value::int(1))
    );
}
