//! Language mode registry.
//!
//! Maps a document's language tag to the analysis capabilities available
//! for it. The registry is built once at server construction and never
//! mutated; a missing tag or a missing capability is a normal
//! "unsupported" outcome, not an error.

use std::collections::HashMap;

use gable_analysis::completion::CompletionCandidate;
use gable_analysis::hover::HoverResult;
use gable_analysis::text::LineIndex;
use tower_lsp::lsp_types::{Diagnostic, Position};

type ValidateFn = fn(&LineIndex, usize) -> Vec<Diagnostic>;
type CompleteFn = fn(&LineIndex, Position) -> Vec<CompletionCandidate>;
type HoverFn = fn(&LineIndex, Position) -> Option<HoverResult>;

pub struct ModeCapabilities {
    pub validate: Option<ValidateFn>,
    pub complete: Option<CompleteFn>,
    pub hover: Option<HoverFn>,
}

pub struct ModeRegistry {
    modes: HashMap<&'static str, ModeCapabilities>,
}

impl ModeRegistry {
    /// The built-in registry: full capabilities for gable documents, under
    /// both the dedicated tag and the generic `kdl` tag editors fall back
    /// to.
    pub fn builtin() -> Self {
        let full = || ModeCapabilities {
            validate: Some(gable_analysis::diagnostics::validate as ValidateFn),
            complete: Some(gable_analysis::completion::completion_items as CompleteFn),
            hover: Some(gable_analysis::hover::hover as HoverFn),
        };
        let mut modes = HashMap::new();
        modes.insert("gable", full());
        modes.insert("kdl", full());
        Self { modes }
    }

    pub fn get(&self, language_id: &str) -> Option<&ModeCapabilities> {
        self.modes.get(language_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tags_have_full_capabilities() {
        let registry = ModeRegistry::builtin();
        for tag in ["gable", "kdl"] {
            let mode = registry.get(tag).expect(tag);
            assert!(mode.validate.is_some());
            assert!(mode.complete.is_some());
            assert!(mode.hover.is_some());
        }
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        assert!(ModeRegistry::builtin().get("toml").is_none());
    }
}
