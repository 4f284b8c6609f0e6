//! Documentation lookup for the token under the cursor.

use lsp_types::{Position, Range};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::LineIndex;

static UNIVERSAL_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(true|false|null|nan|inf|-inf)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverResult {
    /// Markdown contents.
    pub contents: String,
    /// Range of the token the documentation applies to.
    pub range: Range,
}

/// Look up documentation for the token under `position`.
///
/// The token pattern is word characters plus `-` and the `#` tag marker.
/// A leading `#` is stripped for lookup but the original spelling is kept
/// for display. Lookup order: property, node, flag, universal literal;
/// first match wins. `None` means nothing to show, not an error.
pub fn hover(index: &LineIndex, position: Position) -> Option<HoverResult> {
    let offset = index.offset_at(position);
    let (token, start, end) = token_at(index.text(), offset)?;
    let stripped = token.strip_prefix('#').unwrap_or(token);

    let contents = if let Some(def) = gable_reference::property(stripped) {
        section(token, &format!("property ({})", def.kind.describe()), def.doc, def.example)
    } else if let Some(def) = gable_reference::node(stripped) {
        section(token, "section", def.doc, def.example)
    } else if let Some(def) = gable_reference::flag(stripped) {
        section(token, "flag", def.doc, None)
    } else if UNIVERSAL_LITERAL.is_match(stripped) {
        let doc = gable_reference::literal_doc(stripped)?;
        section(token, "literal", doc, None)
    } else {
        return None;
    };

    Some(HoverResult {
        contents,
        range: Range::new(index.position_at(start), index.position_at(end)),
    })
}

fn section(token: &str, category: &str, doc: &str, example: Option<&str>) -> String {
    let mut contents = format!("**`{}`** ({})\n\n{}", token, category, doc);
    if let Some(example) = example {
        contents.push_str(&format!("\n\n```gable\n{}\n```", example));
    }
    contents
}

fn is_token_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '#')
}

/// Token spanning `offset`, with its byte range. When the cursor sits just
/// past the last character of a token, that token is still used.
fn token_at(text: &str, offset: usize) -> Option<(&str, usize, usize)> {
    let offset = offset.min(text.len());
    let anchored = text[..offset]
        .chars()
        .next_back()
        .filter(|ch| is_token_char(*ch))
        .is_some();
    let at_token = text[offset..].chars().next().is_some_and(is_token_char);
    if !anchored && !at_token {
        return None;
    }

    let start = text[..offset]
        .rfind(|ch| !is_token_char(ch))
        .map(|idx| idx + text[idx..].chars().next().unwrap().len_utf8())
        .unwrap_or(0);
    let end = text[offset..]
        .find(|ch| !is_token_char(ch))
        .map(|idx| offset + idx)
        .unwrap_or(text.len());
    if start == end {
        return None;
    }
    Some((&text[start..end], start, end))
}
