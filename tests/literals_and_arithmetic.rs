use elf_lang::evaluate_program;

#[test]
fn integer_literal_prints_canonically() {
    assert_eq!(evaluate_program("let x = 10; x"), "10");
}

#[test]
fn decimal_addition_promotes_to_decimal() {
    assert_eq!(evaluate_program("let a = 1.5; a + 2"), "3.5");
}

#[test]
fn integer_division_truncates_toward_zero() {
    assert_eq!(evaluate_program("let x = 10; let y = 3; x / y"), "3");
}

#[test]
fn integer_arithmetic_stays_integer() {
    assert_eq!(evaluate_program("1 + 2 * 3 - 4"), "3");
}

#[test]
fn decimal_printing_strips_trailing_zeros() {
    assert_eq!(evaluate_program("1.25 + 1.25"), "2.5");
    assert_eq!(evaluate_program("2.0 + 2.0"), "4");
}

#[test]
fn division_by_zero_is_an_error() {
    assert_eq!(evaluate_program("1 / 0"), "[Error] Division by zero");
}

#[test]
fn negative_string_repeat_is_an_error() {
    assert_eq!(
        evaluate_program(r#""x" * -1"#),
        "[Error] Unsupported operation: String * Integer (< 0)"
    );
}

#[test]
fn string_repeat() {
    assert_eq!(evaluate_program(r#""ab" * 3"#), "\"ababab\"");
}

#[test]
fn string_concatenation_with_non_string_uses_printed_form() {
    assert_eq!(evaluate_program(r#""count: " + 3"#), "\"count: 3\"");
}

#[test]
fn unsupported_operation_names_both_kinds() {
    assert_eq!(
        evaluate_program("true + nil"),
        "[Error] Unsupported operation: Boolean + Nil"
    );
}

#[test]
fn underscored_integer_literal() {
    assert_eq!(evaluate_program("1_000_000"), "1000000");
}
