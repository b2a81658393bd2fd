use elf_lang::evaluate_program;

#[test]
fn threading_applies_functions_left_to_right() {
    assert_eq!(
        evaluate_program("let nums = [1, 2, 3, 4]; nums |> filter(|n| n > 2) |> map(|n| n * 10)"),
        "[30, 40]"
    );
}

#[test]
fn threading_equals_nested_application() {
    let threaded = evaluate_program("let double = |x| x * 2; let inc = |x| x + 1; 3 |> double |> inc");
    let nested = evaluate_program("let double = |x| x * 2; let inc = |x| x + 1; inc(double(3))");
    assert_eq!(threaded, nested);
}

#[test]
fn composition_chains_at_least_two_functions() {
    assert_eq!(
        evaluate_program("let double = |x| x * 2; let inc = |x| x + 1; let f = double >> inc; f(3)"),
        "7"
    );
}

#[test]
fn composition_is_associative() {
    let source = |expr: &str| {
        format!(
            "let f = |x| x + 1; let g = |x| x * 2; let h = |x| x - 3; let composed = {expr}; composed(5)"
        )
    };
    let left_assoc = evaluate_program(&source("(f >> g) >> h"));
    let right_assoc = evaluate_program(&source("f >> (g >> h)"));
    let flat = evaluate_program(&source("f >> g >> h"));
    assert_eq!(left_assoc, right_assoc);
    assert_eq!(left_assoc, flat);
}

#[test]
fn composition_binds_tighter_than_threading() {
    // `a >> b |> c` parses as `(a >> b) |> c`.
    assert_eq!(
        evaluate_program("let inc = |x| x + 1; let double = |x| x * 2; 3 |> inc >> double"),
        "8"
    );
}

#[test]
fn composing_a_non_function_is_an_error() {
    assert_eq!(
        evaluate_program("let inc = |x| x + 1; 1 >> inc"),
        "[Error] Cannot compose non-function: Integer"
    );
}

#[test]
fn threading_into_a_non_function_is_an_error() {
    assert_eq!(evaluate_program("1 |> 2"), "[Error] Cannot thread into non-function: Integer");
}

#[test]
fn fold_with_the_plus_builtin() {
    assert_eq!(evaluate_program("let xs = [1, 2, 3]; fold(0, +, xs)"), "6");
}

#[test]
fn map_and_filter_argument_kind_errors() {
    assert_eq!(
        evaluate_program("map(1, [1])"),
        "[Error] Unexpected argument: map(Integer, List)"
    );
    assert_eq!(
        evaluate_program("filter(|x| x, 1)"),
        "[Error] Unexpected argument: filter(Function, Integer)"
    );
}
