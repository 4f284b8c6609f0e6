//! Document analysis core for the gable configuration language.
//!
//! This crate answers two questions about a document: what is wrong with it
//! (diagnostics) and what could go here (completions). It also resolves the
//! token under the cursor for hover. It deliberately builds no syntax tree: every answer comes from
//! substring scans over the raw text and a brace-depth heuristic for block
//! containment, which keeps each request O(document size) and good enough
//! for per-keystroke use.
//!
//! Components, leaves first:
//!
//! - [`text::LineIndex`]: UTF-16 position math over an immutable snapshot.
//! - [`diagnostics::validate`]: unclosed strings per line, invalid escapes
//!   inside string literals, document-wide brace balance.
//! - [`context`]: the block containment oracle and the cursor context
//!   classifier.
//! - [`completion`]: turns a classified context plus the static reference
//!   tables into a candidate list.
//! - [`hover`]: token-under-cursor documentation lookup.
//!
//! All functions are pure with respect to the snapshot they are given;
//! calling them twice with the same input yields the same output.

pub mod completion;
pub mod context;
pub mod diagnostics;
pub mod hover;
pub mod text;

pub use completion::{completion_items, resolve_documentation, CompletionCandidate};
pub use context::{is_inside_block, CursorContext};
pub use diagnostics::validate;
pub use hover::{hover, HoverResult};
pub use text::LineIndex;
