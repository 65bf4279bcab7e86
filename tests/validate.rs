//! End-to-end coverage for `validate`: formatting, statistics, and
//! error localization against the original input text.

use garnet_json::{validate, IndentWidth, ValidationResult};

fn expect_valid(input: &str, indent: IndentWidth) -> (String, garnet_json::Stats) {
    match validate(input, indent) {
        ValidationResult::Valid { formatted, stats } => (formatted, stats),
        ValidationResult::Invalid { message, .. } => {
            panic!("expected valid JSON, got: {message}")
        }
    }
}

fn expect_invalid(input: &str) -> (String, Option<usize>, Option<usize>) {
    match validate(input, IndentWidth::Two) {
        ValidationResult::Invalid {
            message,
            line,
            column,
        } => (message, line, column),
        ValidationResult::Valid { .. } => panic!("expected invalid JSON"),
    }
}

#[test]
fn formatting_round_trips_the_value() {
    let input = r#"{"name":"Alice","scores":[95,87,92],"active":true,"note":null}"#;
    let original: serde_json::Value = serde_json::from_str(input).unwrap();
    for indent in [IndentWidth::Two, IndentWidth::Four, IndentWidth::Eight] {
        let (formatted, _) = expect_valid(input, indent);
        let reparsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(reparsed, original);
    }
}

#[test]
fn formatting_is_idempotent() {
    let input = r#"{"b":[1,2,{"c":3}],"a":"x"}"#;
    let (once, _) = expect_valid(input, IndentWidth::Four);
    let (twice, _) = expect_valid(&once, IndentWidth::Four);
    assert_eq!(once, twice);
}

#[test]
fn indent_width_shapes_the_output() {
    for indent in [IndentWidth::Two, IndentWidth::Four, IndentWidth::Eight] {
        let (formatted, _) = expect_valid(r#"{"a":1}"#, indent);
        let expected = format!("{{\n{}\"a\": 1\n}}", " ".repeat(indent.spaces()));
        assert_eq!(formatted, expected);
    }
}

#[test]
fn blank_input_is_reported_without_a_position() {
    for input in ["", "   ", "\n\t \n"] {
        let (message, line, column) = expect_invalid(input);
        assert!(message.contains("provide"), "unexpected message: {message}");
        assert_eq!(line, None);
        assert_eq!(column, None);
    }
}

#[test]
fn type_description_covers_every_shape() {
    let cases = [
        (r#"{"a":1,"b":2}"#, "Object (2 keys)"),
        ("[1,2,3]", "Array (3 items)"),
        (r#""hi""#, "String"),
        ("42", "Number"),
        ("true", "Boolean"),
        ("null", "Null"),
    ];
    for (input, expected) in cases {
        let (_, stats) = expect_valid(input, IndentWidth::Two);
        assert_eq!(stats.type_description, expected, "for input {input}");
    }
}

#[test]
fn trailing_comma_is_rejected_with_a_message() {
    let (message, line, _) = expect_invalid(r#"{"a":1,}"#);
    assert!(!message.is_empty());
    assert_eq!(line, Some(1));
}

#[test]
fn mismatched_closer_is_localized() {
    // The `}` closes while the `[` is still open; the location must be
    // at or past the offending character on the same line.
    let (_, line, column) = expect_invalid(r#"{"a": [1,2}"#);
    assert_eq!(line, Some(1));
    assert!(column.is_some_and(|c| c >= 11), "column was {column:?}");
}

#[test]
fn stats_agree_with_the_formatted_text() {
    let (formatted, stats) = expect_valid(
        r#"{"users":[{"id":1},{"id":2}],"total":2}"#,
        IndentWidth::Two,
    );
    assert_eq!(stats.lines, formatted.split('\n').count());
    assert_eq!(stats.size_bytes, formatted.len());
}

#[test]
fn size_bytes_counts_utf8_bytes() {
    let (formatted, stats) = expect_valid(r#""héllo""#, IndentWidth::Two);
    assert_eq!(stats.size_bytes, formatted.len());
    assert!(stats.size_bytes > formatted.chars().count());
}

#[test]
fn missing_comma_is_pinned_to_its_line() {
    let input = "{\n  \"a\": 1,\n  \"b\": 2\n  \"c\": 3\n}";
    let (message, line, _) = expect_invalid(input);
    assert_eq!(line, Some(4));
    assert!(message.starts_with("Parse error on line 4:"));
}

#[test]
fn error_excerpt_shows_the_offending_line() {
    let (message, _, _) = expect_invalid("{\n  \"a\": oops\n}");
    assert!(message.contains("\"a\": oops"), "message was: {message}");
}

#[test]
fn long_error_lines_are_truncated_in_the_message() {
    let long_value = "x".repeat(300);
    let input = format!("{{\"key\": \"{long_value} }}");
    let (message, line, _) = expect_invalid(&input);
    assert_eq!(line, Some(1));
    let excerpt = message.lines().nth(1).unwrap_or("");
    assert!(excerpt.chars().count() < input.chars().count());
    assert!(excerpt.contains("..."));
}
