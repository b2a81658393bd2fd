//! The concrete end-to-end input/output pairs used as the interpreter's
//! acceptance scenarios.

use elf_lang::evaluate_program;

#[test]
fn scenario_puts_hello() {
    assert_eq!(evaluate_program(r#"puts("hello")"#), "\"hello\" \nnil");
}

#[test]
fn scenario_integer_division() {
    assert_eq!(evaluate_program("let x = 10; let y = 3; x / y"), "3");
}

#[test]
fn scenario_decimal_promotion() {
    assert_eq!(evaluate_program("let a = 1.5; a + 2"), "3.5");
}

#[test]
fn scenario_fold_with_plus() {
    assert_eq!(evaluate_program("let xs = [1,2,3]; fold(0, +, xs)"), "6");
}

#[test]
fn scenario_currying() {
    assert_eq!(
        evaluate_program("let add = |a, b| a + b; let inc = add(1); inc(4)"),
        "5"
    );
}

#[test]
fn scenario_threading_filter_map() {
    assert_eq!(
        evaluate_program("let nums = [1,2,3,4]; nums |> filter(|n| n > 2) |> map(|n| n * 10)"),
        "[30, 40]"
    );
}

#[test]
fn scenario_dictionary_sorted_printing() {
    assert_eq!(evaluate_program(r#"#{ "b": 2, "a": 1 }"#), "#{\"a\": 1, \"b\": 2}");
}

#[test]
fn scenario_set_sorted_dedup_printing() {
    assert_eq!(evaluate_program("{ 3, 1, 2, 1 }"), "{1, 2, 3}");
}

#[test]
fn scenario_mutable_reassignment() {
    assert_eq!(
        evaluate_program("let mut c = 0; c = c + 1; c = c + 1; c"),
        "2"
    );
}

#[test]
fn scenario_division_by_zero_error() {
    assert_eq!(evaluate_program("1 / 0"), "[Error] Division by zero");
}

#[test]
fn structural_equality_holds_across_distinct_expressions() {
    assert_eq!(evaluate_program("[1, 2] == [1, 2]"), "true");
    assert_eq!(evaluate_program("{1, 2} == {2, 1}"), "true");
    assert_eq!(
        evaluate_program(r#"#{"a": 1, "b": 2} == #{"b": 2, "a": 1}"#),
        "true"
    );
    assert_eq!(evaluate_program("1 == 1.0"), "false");
}

#[test]
fn comments_are_ignored_and_do_not_become_the_result() {
    assert_eq!(evaluate_program("// just a comment\n42"), "42");
    assert_eq!(evaluate_program("42\n// trailing comment"), "42");
}

#[test]
fn parser_failure_reports_a_syntax_error() {
    let output = evaluate_program("let x = ");
    assert!(output.starts_with("[Error] "));
}

#[test]
fn output_buffered_before_the_failure_is_retained() {
    let output = evaluate_program(r#"puts("before"); 1 / 0"#);
    assert_eq!(output, "\"before\" \n[Error] Division by zero");
}
