use elf_lang::evaluate_program;

#[test]
fn prefix_negate_on_non_numeric_is_an_error() {
    assert_eq!(
        evaluate_program(r#"-"x""#),
        "[Error] Unsupported operation: -String"
    );
}

#[test]
fn prefix_negate_numeric() {
    assert_eq!(evaluate_program("-5"), "-5");
    assert_eq!(evaluate_program("-2.5"), "-2.5");
}

#[test]
fn comparing_incomparable_kinds_is_an_error() {
    assert_eq!(
        evaluate_program("true > false"),
        "[Error] Cannot compare Boolean with Boolean"
    );
    assert_eq!(
        evaluate_program(r#""a" > 1"#),
        "[Error] Cannot compare String with Integer"
    );
}

#[test]
fn cross_numeric_comparison_is_allowed() {
    assert_eq!(evaluate_program("1 < 1.5"), "true");
    assert_eq!(evaluate_program("2 >= 2.0"), "true");
}

#[test]
fn assoc_onto_a_non_dictionary_is_an_error() {
    assert_eq!(
        evaluate_program(r#"assoc("a", 1, [1])"#),
        "[Error] Cannot assoc to List"
    );
}

#[test]
fn string_comparison_is_lexicographic() {
    assert_eq!(evaluate_program(r#""apple" < "banana""#), "true");
}

#[test]
fn logical_operators_use_truthiness() {
    assert_eq!(evaluate_program("0 && true"), "false");
    assert_eq!(evaluate_program("nil || \"x\""), "true");
}
