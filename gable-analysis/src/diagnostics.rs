//! Lexical validators: unclosed strings, invalid escapes, brace balance.
//!
//! These are deliberately heuristic scans over the raw text rather than a
//! grammar-driven parse. Each validator is documented with the imprecision
//! it accepts; findings are the output of the system, not failures of it.

use lsp_types::{Diagnostic, DiagnosticSeverity, Range};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::LineIndex;

pub const SOURCE: &str = "gable";

/// Matches one string literal: an optional raw prefix (`r` plus zero or
/// more `#` fence characters) and a quoted body. The body may span lines
/// and an escaped quote does not terminate it. Fence counts are not
/// matched pairwise; this is a scan, not a parse.
static STRING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)(r#*)?"(?:\\.|[^"\\])*""#).unwrap());

/// Runs every validator in discovery order and truncates to `max_problems`.
pub fn validate(index: &LineIndex, max_problems: usize) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    unclosed_strings(index, &mut diagnostics);
    invalid_escapes(index, &mut diagnostics);
    brace_balance(index, &mut diagnostics);
    diagnostics.truncate(max_problems);
    diagnostics
}

/// Per-line unclosed quote check.
///
/// Comment lines are skipped. A line with an odd number of unescaped
/// double quotes is reported unless it contains a `"""` marker, which
/// signals a multi-line string boundary. Interior lines of a multi-line
/// string can still misreport; that tradeoff buys a stateless per-line
/// scan.
fn unclosed_strings(index: &LineIndex, diagnostics: &mut Vec<Diagnostic>) {
    for line in 0..index.line_count() {
        let text = index.line_text(line);
        let trimmed = text.trim_start();
        if trimmed.starts_with("//") || trimmed.starts_with("/*") {
            continue;
        }

        let mut quotes = 0usize;
        let mut prev = None;
        for ch in text.chars() {
            if ch == '"' && prev != Some('\\') {
                quotes += 1;
            }
            prev = Some(ch);
        }

        if quotes % 2 == 1 && !text.contains("\"\"\"") {
            diagnostics.push(diagnostic(
                index.line_range(line),
                DiagnosticSeverity::ERROR,
                "Unclosed string literal".to_string(),
            ));
        }
    }
}

/// Reports escape sequences outside the allow-list inside non-raw string
/// literals. Offsets are tracked during the scan itself, so repeated escape
/// text within one literal is located exactly.
fn invalid_escapes(index: &LineIndex, diagnostics: &mut Vec<Diagnostic>) {
    let text = index.text();
    for captures in STRING_LITERAL.captures_iter(text) {
        if captures.get(1).is_some() {
            // Raw strings never process escapes.
            continue;
        }
        let span = captures.get(0).unwrap();
        let body_start = span.start() + 1;
        let body_end = span.end() - 1;

        let mut i = body_start;
        while i < body_end {
            // 0x5C never occurs inside a multi-byte UTF-8 sequence.
            if text.as_bytes()[i] != b'\\' {
                i += 1;
                continue;
            }
            match escape_len(&text[i + 1..body_end]) {
                Some(len) => i += 1 + len,
                None => {
                    let next = text[i + 1..body_end]
                        .chars()
                        .next()
                        .map_or(0, char::len_utf8);
                    let end = i + 1 + next;
                    diagnostics.push(diagnostic(
                        Range::new(index.position_at(i), index.position_at(end)),
                        DiagnosticSeverity::ERROR,
                        format!("Invalid escape sequence `{}`", &text[i..end]),
                    ));
                    i = end;
                }
            }
        }
    }
}

/// Byte length of an allow-listed escape at the start of `rest` (the text
/// immediately after a backslash), or `None` when the escape is invalid.
fn escape_len(rest: &str) -> Option<usize> {
    match rest.chars().next()? {
        'n' | 'r' | 't' | 'b' | 'f' | '"' | '\\' => Some(1),
        'u' if hex_digits(rest, 1, 4) => Some(5),
        'U' if hex_digits(rest, 1, 8) => Some(9),
        _ => None,
    }
}

fn hex_digits(rest: &str, start: usize, count: usize) -> bool {
    rest.as_bytes()
        .get(start..start + count)
        .is_some_and(|bytes| bytes.iter().all(u8::is_ascii_hexdigit))
}

/// Whole-document brace count. A brace inside a string or comment still
/// counts; the warning trades precision for a cheap global signal.
fn brace_balance(index: &LineIndex, diagnostics: &mut Vec<Diagnostic>) {
    let opens = index.text().bytes().filter(|&b| b == b'{').count();
    let closes = index.text().bytes().filter(|&b| b == b'}').count();
    if opens != closes {
        diagnostics.push(diagnostic(
            index.full_range(),
            DiagnosticSeverity::WARNING,
            format!(
                "Unbalanced braces: {} opening '{{' and {} closing '}}'",
                opens, closes
            ),
        ));
    }
}

fn diagnostic(range: Range, severity: DiagnosticSeverity, message: String) -> Diagnostic {
    Diagnostic {
        range,
        severity: Some(severity),
        code: None,
        code_description: None,
        source: Some(SOURCE.to_string()),
        message,
        related_information: None,
        tags: None,
        data: None,
    }
}
