//! Rich terminal diagnostics for parse failures.
//!
//! [`validate`](crate::validate) turns failures into plain data; this
//! module is the CLI-facing layer that turns the same failure into a
//! miette report with a labeled span and a concrete fix hint.

use miette::{Diagnostic, SourceSpan};
use serde_json::error::Category;
use thiserror::Error;

use crate::locate::{self, Location};

#[derive(Error, Debug, Diagnostic)]
pub enum JsonError {
    #[error("trailing comma")]
    #[diagnostic(code(garnet::trailing_comma))]
    TrailingComma {
        #[source_code]
        src: String,
        #[label("remove this comma")]
        span: SourceSpan,
        #[help]
        hint: String,
    },
    #[error("expected `,` between items")]
    #[diagnostic(code(garnet::missing_comma))]
    MissingComma {
        #[source_code]
        src: String,
        #[label("add a comma here")]
        span: SourceSpan,
        #[help]
        hint: String,
    },
    #[error("object keys must be quoted strings")]
    #[diagnostic(code(garnet::unquoted_key))]
    UnquotedKey {
        #[source_code]
        src: String,
        #[label("quote this key")]
        span: SourceSpan,
        #[help]
        hint: String,
    },
    #[error("unexpected end of input")]
    #[diagnostic(code(garnet::unexpected_eof))]
    UnexpectedEof {
        #[source_code]
        src: String,
        #[label("input ended here")]
        span: SourceSpan,
        #[help]
        hint: String,
    },
    #[error("{message}")]
    #[diagnostic(code(garnet::syntax_error))]
    Syntax {
        message: String,
        #[source_code]
        src: String,
        #[label("error here")]
        span: SourceSpan,
    },
}

/// Re-parses `input` and maps the failure to a [`JsonError`].
///
/// Returns `None` when the input parses cleanly or is blank (blank
/// input is a usage problem, not a syntax one).
pub fn explain(input: &str) -> Option<JsonError> {
    if input.trim().is_empty() {
        return None;
    }
    let err = serde_json::from_str::<serde_json::Value>(input).err()?;
    Some(classify(input, &err))
}

fn classify(input: &str, err: &serde_json::Error) -> JsonError {
    let loc = locate::locate(input, err);
    let span = span_at(input, loc);
    let src = input.to_owned();
    let lower = err.to_string().to_ascii_lowercase();

    if lower.contains("trailing comma") {
        JsonError::TrailingComma {
            src,
            span,
            hint: trailing_comma_hint(input, loc),
        }
    } else if err.classify() == Category::Eof {
        JsonError::UnexpectedEof {
            src,
            span,
            hint: eof_hint(input),
        }
    } else if lower.contains("expected `,`") {
        JsonError::MissingComma {
            src,
            span,
            hint: missing_comma_hint(input, loc),
        }
    } else if lower.contains("key must be a string") {
        JsonError::UnquotedKey {
            src,
            span,
            hint: unquoted_key_hint(input, loc),
        }
    } else if comma_precedes(input, loc) {
        // Some failures after a stray comma surface as "expected value";
        // the line text tells the real story.
        JsonError::TrailingComma {
            src,
            span,
            hint: trailing_comma_hint(input, loc),
        }
    } else {
        JsonError::Syntax {
            message: err.to_string(),
            src,
            span,
        }
    }
}

fn span_at(input: &str, loc: Location) -> SourceSpan {
    let offset = locate::offset_at(input, loc.line, loc.column.unwrap_or(1));
    SourceSpan::new(offset.into(), 1)
}

fn line_at(input: &str, loc: Location) -> &str {
    input.lines().nth(loc.line - 1).unwrap_or("")
}

/// True when everything on the error line before the reported column
/// trims down to a comma, i.e. the parser stumbled right after one.
fn comma_precedes(input: &str, loc: Location) -> bool {
    let line = line_at(input, loc);
    let cut = loc
        .column
        .map(|col| locate::byte_index(line, col))
        .unwrap_or(line.len());
    line[..cut.min(line.len())].trim_end().ends_with(',')
}

fn trailing_comma_hint(input: &str, loc: Location) -> String {
    let trimmed = line_at(input, loc).trim();
    if let Some(prefix) = trimmed.strip_suffix(",]").or_else(|| trimmed.strip_suffix(",}")) {
        let closer = &trimmed[trimmed.len() - 1..];
        return format!("change `{}` to `{}{}`", trimmed, prefix.trim_end(), closer);
    }
    if let Some(kept) = trimmed.strip_suffix(',') {
        return format!("change `{}` to `{}`", trimmed, kept);
    }
    "remove the extra comma".to_string()
}

fn missing_comma_hint(input: &str, loc: Location) -> String {
    if loc.line >= 2 {
        let previous = input.lines().nth(loc.line - 2).unwrap_or("").trim();
        if !previous.is_empty()
            && !previous.ends_with(',')
            && !previous.ends_with('{')
            && !previous.ends_with('[')
        {
            let shown: String = previous.chars().take(32).collect();
            return format!("add `,` after `{}`", shown);
        }
    }
    "add a comma between items".to_string()
}

fn unquoted_key_hint(input: &str, loc: Location) -> String {
    let line = line_at(input, loc);
    let cut = loc
        .column
        .map(|col| locate::byte_index(line, col))
        .unwrap_or(line.len());
    let key = line[cut.min(line.len())..]
        .split([':', ',', '}'])
        .next()
        .unwrap_or("")
        .trim();
    if key.is_empty() {
        "wrap the key in double quotes".to_string()
    } else {
        format!("change `{}` to `\"{}\"`", key, key)
    }
}

/// Counts what is still open when the input runs out, using the same
/// scanner that powers the structural fallback tier.
fn eof_hint(input: &str) -> String {
    let balance = locate::balance_scan(input);
    let mut parts = Vec::new();
    if balance.unclosed_braces > 0 {
        parts.push(format!("{} unclosed `{{`", balance.unclosed_braces));
    }
    if balance.unclosed_brackets > 0 {
        parts.push(format!("{} unclosed `[`", balance.unclosed_brackets));
    }
    if parts.is_empty() {
        "the document ends mid-value".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_comma_is_recognized() {
        let err = explain(r#"{"a": 1,}"#).unwrap();
        assert!(matches!(err, JsonError::TrailingComma { .. }));
    }

    #[test]
    fn trailing_comma_hint_rewrites_the_line() {
        let err = explain(r#"[1, 2, 3,]"#).unwrap();
        let JsonError::TrailingComma { hint, .. } = err else {
            panic!("expected a trailing comma diagnostic");
        };
        assert_eq!(hint, "change `[1, 2, 3,]` to `[1, 2, 3]`");
    }

    #[test]
    fn missing_comma_points_at_previous_line() {
        let err = explain("{\n  \"a\": 1\n  \"b\": 2\n}").unwrap();
        let JsonError::MissingComma { hint, .. } = err else {
            panic!("expected a missing comma diagnostic");
        };
        assert_eq!(hint, "add `,` after `\"a\": 1`");
    }

    #[test]
    fn unquoted_key_suggests_the_quoted_form() {
        let err = explain("{name: 1}").unwrap();
        assert!(matches!(err, JsonError::UnquotedKey { .. }));
    }

    #[test]
    fn eof_hint_counts_unclosed_openers() {
        let err = explain(r#"{"a": [1, 2"#).unwrap();
        let JsonError::UnexpectedEof { hint, .. } = err else {
            panic!("expected an eof diagnostic");
        };
        assert_eq!(hint, "1 unclosed `{`, 1 unclosed `[`");
    }

    #[test]
    fn blank_and_valid_inputs_have_nothing_to_explain() {
        assert!(explain("").is_none());
        assert!(explain("  \n ").is_none());
        assert!(explain(r#"{"fine": true}"#).is_none());
    }
}
