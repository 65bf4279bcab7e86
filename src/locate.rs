//! Best-effort localization of JSON parse errors.
//!
//! serde_json reports a line/column for most syntax errors, but not for
//! every failure, and never for structural problems it only notices at
//! end of input. [`locate`] layers three fallbacks so that a caller
//! always gets *some* position to point at:
//!
//! 1. the parser's own reported position, clamped into the input,
//! 2. a progressive prefix probe (parse the first `i` lines and look
//!    for the valid-to-invalid transition),
//! 3. a bracket/quote balance scan that finds the first closing `}` or
//!    `]` with no matching opener.

/// A 1-based position within the original input text.
///
/// `column` is a character offset within the line, not a byte offset.
/// It is absent when only the line could be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: Option<usize>,
}

/// Outcome of [`balance_scan`]: the first structural mismatch, if any,
/// plus the openers still unclosed when the scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub mismatch: Option<Location>,
    pub unclosed_braces: usize,
    pub unclosed_brackets: usize,
}

/// Resolves a parse failure to a position in `input`.
///
/// Never fails: when every tier comes up empty the location degrades to
/// line 1 with no column.
pub fn locate(input: &str, err: &serde_json::Error) -> Location {
    if err.line() > 0 {
        return clamp(input, err.line(), err.column());
    }
    if let Some(line) = probe_lines(input) {
        return Location { line, column: None };
    }
    if let Some(loc) = balance_scan(input).mismatch {
        return loc;
    }
    Location { line: 1, column: None }
}

/// Pins a parser-reported position inside the actual text. A position
/// past the last line collapses to the end of the last line.
fn clamp(input: &str, line: usize, column: usize) -> Location {
    let lines: Vec<&str> = input.lines().collect();
    if lines.is_empty() {
        return Location { line: 1, column: None };
    }
    if line > lines.len() {
        let last = lines[lines.len() - 1];
        return Location {
            line: lines.len(),
            column: Some(last.chars().count().max(1)),
        };
    }
    let width = lines[line - 1].chars().count();
    let column = match column {
        0 => None,
        c => Some(c.min(width.max(1))),
    };
    Location { line, column }
}

/// Parses ever-longer prefixes of `input`, one line at a time, and
/// reports the line where a previously-valid prefix turns invalid.
///
/// Valid JSON prefixes rarely parse on their own (`{"a": 1` never
/// will), so this tier mostly fires for inputs whose first lines form a
/// complete document, e.g. a scalar followed by trailing garbage.
pub fn probe_lines(input: &str) -> Option<usize> {
    let lines: Vec<&str> = input.lines().collect();
    let mut prev_ok = false;
    for i in 1..=lines.len() {
        let prefix = lines[..i].join("\n");
        let ok = serde_json::from_str::<serde_json::Value>(&prefix).is_ok();
        if !ok && prev_ok {
            return Some(i);
        }
        prev_ok = ok;
    }
    None
}

/// Walks `input` tracking string state and a stack of open brackets.
///
/// Braces and brackets inside string literals (and escaped quotes) are
/// ignored. The scan stops at the first closer that does not match the
/// innermost opener; `unclosed_*` then reflect the stack at that point,
/// or the whole input when no mismatch was found.
pub fn balance_scan(input: &str) -> Balance {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escape_next = false;
    let mut line = 1usize;
    let mut column = 0usize;
    let mut mismatch = None;

    for ch in input.chars() {
        if ch == '\n' {
            line += 1;
            column = 0;
            continue;
        }
        column += 1;
        if escape_next {
            escape_next = false;
            continue;
        }
        if in_string {
            match ch {
                '\\' => escape_next = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' | '[' => stack.push(ch),
            '}' | ']' => {
                let wanted = if ch == '}' { '{' } else { '[' };
                if stack.last() == Some(&wanted) {
                    stack.pop();
                } else {
                    mismatch = Some(Location {
                        line,
                        column: Some(column),
                    });
                    break;
                }
            }
            _ => {}
        }
    }

    Balance {
        mismatch,
        unclosed_braces: stack.iter().filter(|&&c| c == '{').count(),
        unclosed_brackets: stack.iter().filter(|&&c| c == '[').count(),
    }
}

const EXCERPT_WIDTH: usize = 60;

/// Cuts a readable window out of `line`, centered on `column` when one
/// is known, with `...` markers on whichever sides were truncated.
pub fn excerpt(line: &str, column: Option<usize>) -> String {
    let total = line.chars().count();
    if total <= EXCERPT_WIDTH {
        return line.to_string();
    }
    let start = match column {
        Some(col) => col
            .saturating_sub(1)
            .saturating_sub(EXCERPT_WIDTH / 2)
            .min(total - EXCERPT_WIDTH),
        None => 0,
    };
    let window: String = line.chars().skip(start).take(EXCERPT_WIDTH).collect();
    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.push_str(&window);
    if start + EXCERPT_WIDTH < total {
        out.push_str("...");
    }
    out
}

/// Byte offset of a 1-based (line, column) position, for building spans
/// over the original source.
pub fn offset_at(input: &str, line: usize, column: usize) -> usize {
    let mut offset = 0usize;
    for (idx, text) in input.lines().enumerate() {
        if idx + 1 == line {
            return offset + byte_index(text, column);
        }
        offset += text.len() + 1;
    }
    offset
}

/// Byte index of the 1-based character `column` within `text`.
pub fn byte_index(text: &str, column: usize) -> usize {
    if column == 0 {
        return 0;
    }
    text.char_indices()
        .map(|(i, _)| i)
        .nth(column - 1)
        .unwrap_or(text.len())
}
