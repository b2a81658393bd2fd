use elf_lang::evaluate_program;

#[test]
fn list_literal_prints_in_order() {
    assert_eq!(evaluate_program("[1, 2, 3]"), "[1, 2, 3]");
}

#[test]
fn set_literal_dedupes_and_sorts_for_printing() {
    assert_eq!(evaluate_program("{ 3, 1, 2, 1 }"), "{1, 2, 3}");
}

#[test]
fn set_printed_form_is_independent_of_insertion_order() {
    let a = evaluate_program("{ 3, 1, 2 }");
    let b = evaluate_program("{ 1, 2, 3 }");
    assert_eq!(a, b);
}

#[test]
fn dictionary_literal_prints_sorted_by_key() {
    assert_eq!(evaluate_program(r#"#{ "b": 2, "a": 1 }"#), "#{\"a\": 1, \"b\": 2}");
}

#[test]
fn duplicate_dictionary_keys_keep_last_write() {
    assert_eq!(evaluate_program(r#"#{ "a": 1, "a": 2 }"#), "#{\"a\": 2}");
}

#[test]
fn dictionary_rejects_dictionary_key() {
    assert_eq!(
        evaluate_program(r#"#{ #{"a": 1}: 2 }"#),
        "[Error] Unable to use a Dictionary as a Dictionary key"
    );
}

#[test]
fn set_rejects_dictionary_element() {
    assert_eq!(
        evaluate_program(r#"{ #{"a": 1} }"#),
        "[Error] Unable to include a Dictionary within a Set"
    );
}

#[test]
fn push_does_not_mutate_the_original_list() {
    assert_eq!(
        evaluate_program("let xs = [1, 2]; push(3, xs); xs"),
        "[1, 2]"
    );
}

#[test]
fn push_onto_list_and_set() {
    assert_eq!(evaluate_program("push(3, [1, 2])"), "[1, 2, 3]");
    assert_eq!(evaluate_program("size(push(1, { 1, 2 }))"), "2");
}

#[test]
fn push_onto_unsupported_kind_is_an_error() {
    assert_eq!(evaluate_program("push(1, 2)"), "[Error] Cannot push to Integer");
}

#[test]
fn assoc_updates_or_inserts_a_key() {
    assert_eq!(
        evaluate_program(r#"assoc("a", 9, #{"a": 1, "b": 2})"#),
        "#{\"a\": 9, \"b\": 2}"
    );
}

#[test]
fn first_and_rest_of_a_list() {
    assert_eq!(evaluate_program("first([1, 2, 3])"), "1");
    assert_eq!(evaluate_program("rest([1, 2, 3])"), "[2, 3]");
}

#[test]
fn first_and_rest_of_empty_preserve_kind() {
    assert_eq!(evaluate_program("first([])"), "nil");
    assert_eq!(evaluate_program("rest([])"), "[]");
    assert_eq!(evaluate_program("rest(\"\")"), "\"\"");
}

#[test]
fn size_of_list_set_dictionary_and_string() {
    assert_eq!(evaluate_program("size([1, 2, 3])"), "3");
    assert_eq!(evaluate_program("size({1, 2})"), "2");
    assert_eq!(evaluate_program(r#"size(#{"a": 1})"#), "1");
    assert_eq!(evaluate_program(r#"size("hello")"#), "5");
}

#[test]
fn size_of_unsupported_kind_is_nil() {
    assert_eq!(evaluate_program("size(1)"), "nil");
}

#[test]
fn list_plus_list_concatenates() {
    assert_eq!(evaluate_program("[1, 2] + [3]"), "[1, 2, 3]");
}

#[test]
fn set_plus_set_is_left_biased_union() {
    assert_eq!(evaluate_program("{1, 2} + {2, 3}"), "{1, 2, 3}");
}

#[test]
fn dictionary_plus_dictionary_is_right_biased_merge() {
    assert_eq!(
        evaluate_program(r#"#{"a": 1} + #{"a": 2, "b": 3}"#),
        "#{\"a\": 2, \"b\": 3}"
    );
}

#[test]
fn string_indexing_by_code_point_with_negative_and_oob() {
    assert_eq!(evaluate_program(r#""hello"[0]"#), "\"h\"");
    assert_eq!(evaluate_program(r#""hello"[-1]"#), "\"o\"");
    assert_eq!(evaluate_program(r#""hello"[99]"#), "nil");
}

#[test]
fn indexing_with_non_integer_is_an_error() {
    assert_eq!(
        evaluate_program(r#""hello"[true]"#),
        "[Error] Unable to perform index operation, found: String[Boolean]"
    );
}

#[test]
fn dictionary_indexing_by_structural_key() {
    assert_eq!(evaluate_program(r#"#{"a": 1}["a"]"#), "1");
    assert_eq!(evaluate_program(r#"#{"a": 1}["b"]"#), "nil");
}

#[test]
fn indexing_unsupported_kind_is_an_error() {
    assert_eq!(evaluate_program("1[0]"), "[Error] Cannot index into Integer");
}
