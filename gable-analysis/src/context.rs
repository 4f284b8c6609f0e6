//! Block containment oracle and cursor context classification.

use std::collections::HashMap;

use lsp_types::Position;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::LineIndex;
use gable_reference::RECOGNIZED_BLOCKS;

static LINE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*$").unwrap());
static AFTER_OPEN_BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\s*$").unwrap());
static PROPERTY_ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_-]*)=\s*$").unwrap());
static BARE_NODE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[A-Za-z_][A-Za-z0-9_-]*\s+$").unwrap());

/// Opener patterns for the recognized blocks, compiled once.
static BLOCK_OPENERS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    RECOGNIZED_BLOCKS
        .iter()
        .map(|name| (*name, block_opener(name)))
        .collect()
});

fn block_opener(name: &str) -> Regex {
    Regex::new(&format!(r"\b{}\s*\{{", regex::escape(name))).unwrap()
}

/// Whether `offset` lies inside the most recent unclosed `block { … }`.
///
/// Anchors to the last `block {` opener before the offset and compares
/// brace counts between the two. This is a heuristic, not a stack-based
/// parse: a block name occurring inside a string literal is treated like a
/// real opener.
pub fn is_inside_block(text: &str, offset: usize, block: &str) -> bool {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let prefix = &text[..offset];

    let owned;
    let opener = match BLOCK_OPENERS.get(block) {
        Some(re) => re,
        None => {
            owned = block_opener(block);
            &owned
        }
    };

    let Some(last) = opener.find_iter(prefix).last() else {
        return false;
    };
    let span = &prefix[last.start()..];
    let opens = span.bytes().filter(|&b| b == b'{').count();
    let closes = span.bytes().filter(|&b| b == b'}').count();
    opens > closes
}

/// Context flags derived from the cursor position. The flags are not
/// mutually exclusive; the synthesizer unions categories over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorContext {
    pub at_line_start: bool,
    pub after_open_brace: bool,
    /// Property name captured from a `name=` prefix.
    pub property_assignment: Option<String>,
    pub after_node_name: bool,
    /// Recognized blocks enclosing the cursor.
    pub enclosing_blocks: Vec<&'static str>,
}

impl CursorContext {
    pub fn classify(index: &LineIndex, position: Position) -> Self {
        let offset = index.offset_at(position);
        let line = index.position_at(offset).line;
        let prefix = &index.text()[index.line_start(line)..offset];

        let enclosing_blocks = RECOGNIZED_BLOCKS
            .iter()
            .copied()
            .filter(|block| is_inside_block(index.text(), offset, block))
            .collect();

        Self {
            at_line_start: LINE_START.is_match(prefix),
            after_open_brace: AFTER_OPEN_BRACE.is_match(prefix),
            property_assignment: PROPERTY_ASSIGNMENT
                .captures(prefix)
                .map(|captures| captures[1].to_string()),
            after_node_name: BARE_NODE_NAME.is_match(prefix),
            enclosing_blocks,
        }
    }

    pub fn in_block(&self, name: &str) -> bool {
        self.enclosing_blocks.contains(&name)
    }
}
