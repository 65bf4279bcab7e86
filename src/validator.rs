use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::locate;

/// Number of spaces per indentation level in the formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentWidth {
    #[default]
    Two,
    Four,
    Eight,
}

impl IndentWidth {
    pub fn spaces(self) -> usize {
        match self {
            IndentWidth::Two => 2,
            IndentWidth::Four => 4,
            IndentWidth::Eight => 8,
        }
    }

    fn unit(self) -> &'static [u8] {
        match self {
            IndentWidth::Two => b"  ",
            IndentWidth::Four => b"    ",
            IndentWidth::Eight => b"        ",
        }
    }
}

/// Summary of a successfully formatted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Number of `\n`-delimited lines in the formatted text.
    pub lines: usize,
    /// UTF-8 byte length of the formatted text.
    pub size_bytes: usize,
    /// Human description of the top-level value, e.g. `Object (3 keys)`.
    pub type_description: String,
}

/// What [`validate`] hands back: either the formatted document with its
/// stats, or a message with the best position we could pin down.
///
/// `line` and `column` are 1-based and refer to the *original* input,
/// not the formatted output.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid {
        formatted: String,
        stats: Stats,
    },
    Invalid {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
}

/// Validates `input` as JSON and pretty-prints it with `indent` spaces.
///
/// Pure and total: the input is never mutated, every call builds a
/// fresh result, and no failure escapes as an error. Blank input gets
/// its own message rather than a parser error, since "you gave me
/// nothing" is not a syntax problem.
pub fn validate(input: &str, indent: IndentWidth) -> ValidationResult {
    if input.trim().is_empty() {
        return ValidationResult::Invalid {
            message: "please provide some JSON to validate".to_string(),
            line: None,
            column: None,
        };
    }
    match serde_json::from_str::<Value>(input) {
        Ok(value) => {
            let formatted = format_value(&value, indent);
            let stats = Stats {
                lines: formatted.split('\n').count(),
                size_bytes: formatted.len(),
                type_description: type_description(&value),
            };
            ValidationResult::Valid { formatted, stats }
        }
        Err(err) => invalid_from(input, &err),
    }
}

fn invalid_from(input: &str, err: &serde_json::Error) -> ValidationResult {
    let loc = locate::locate(input, err);
    let line_text = input.lines().nth(loc.line - 1).unwrap_or("");
    let message = format!(
        "Parse error on line {}:\n{}",
        loc.line,
        locate::excerpt(line_text, loc.column)
    );
    ValidationResult::Invalid {
        message,
        line: Some(loc.line),
        column: loc.column,
    }
}

fn format_value(value: &Value, indent: IndentWidth) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.unit());
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    match value.serialize(&mut serializer) {
        // Writing into a Vec cannot fail and a Value always serializes.
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => String::new(),
    }
}

fn type_description(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("Array ({} items)", items.len()),
        Value::Object(map) => format!("Object ({} keys)", map.len()),
        Value::String(_) => "String".to_string(),
        Value::Number(_) => "Number".to_string(),
        Value::Bool(_) => "Boolean".to_string(),
        Value::Null => "Null".to_string(),
    }
}
