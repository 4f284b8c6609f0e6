//! Completion candidate synthesis from cursor context and reference tables.

use lsp_types::{CompletionItemKind, Position};

use crate::context::CursorContext;
use crate::text::LineIndex;
use gable_reference::{
    literal_doc, properties_for_block, ValueKind, ACTIONS, FLAGS, KEY_MODIFIERS, LITERALS, NODES,
    PROPERTIES, SPECIAL_KEYS,
};

/// A semantic completion candidate, translated into a protocol item by the
/// server layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub label: String,
    pub detail: Option<String>,
    pub kind: CompletionItemKind,
    pub insert_text: Option<String>,
    /// Insertion text uses snippet placeholder syntax.
    pub is_snippet: bool,
    pub sort_text: Option<String>,
    /// Opaque tag resolved later into documentation, e.g. `prop:gaps`.
    pub data: Option<String>,
}

impl CompletionCandidate {
    fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            detail: None,
            kind,
            insert_text: None,
            is_snippet: false,
            sort_text: None,
            data: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    fn with_snippet_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = Some(text.into());
        self.is_snippet = true;
        self
    }

    fn with_sort_text(mut self, sort: impl Into<String>) -> Self {
        self.sort_text = Some(sort.into());
        self
    }

    fn with_data(mut self, tag: impl Into<String>) -> Self {
        self.data = Some(tag.into());
        self
    }
}

/// Specificity order for property scoping: decoration blocks nest inside
/// layout and window-rule, so they are probed first.
const PROPERTY_SCOPE_ORDER: &[&str] = &[
    "focus-ring",
    "border",
    "shadow",
    "input",
    "output",
    "layout",
    "window-rule",
];

const COLOR_EXAMPLES: &[&str] = &["#7fc8ff", "#00000070", "rgb(127, 200, 255)", "rgba(127, 200, 255, 0.9)"];

/// Produce completion candidates for the document at the given position.
///
/// A `name=` prefix whose name is a known property is exclusive: only value
/// candidates are offered. Every other context unions its applicable
/// categories; a name present in two tables yields two entries on purpose,
/// each with its own kind and detail.
pub fn completion_items(index: &LineIndex, position: Position) -> Vec<CompletionCandidate> {
    let ctx = CursorContext::classify(index, position);

    if let Some(name) = &ctx.property_assignment {
        if let Some(def) = gable_reference::property(name) {
            return value_completions(def);
        }
    }

    let in_binds = ctx.in_block("binds");
    let mut items = Vec::new();

    if in_binds && ctx.at_line_start {
        items.extend(key_modifier_completions());
        items.extend(special_key_completions());
    }

    if (ctx.at_line_start || ctx.after_open_brace) && !in_binds {
        items.extend(node_completions());
        items.extend(flag_completions());
        items.extend(property_completions(&ctx));
    }

    if ctx.after_node_name || in_binds {
        items.extend(action_completions(in_binds));
    }

    items
}

fn value_completions(def: &'static gable_reference::PropertyDef) -> Vec<CompletionCandidate> {
    let mut items = Vec::new();
    match def.kind {
        ValueKind::Bool => {
            for literal in ["true", "false"] {
                items.push(
                    CompletionCandidate::new(literal, CompletionItemKind::VALUE)
                        .with_detail("boolean")
                        .with_data(format!("value:{}", literal)),
                );
            }
            for literal in ["#true", "#false"] {
                items.push(
                    CompletionCandidate::new(literal, CompletionItemKind::VALUE)
                        .with_detail("tagged boolean")
                        .with_data(format!("value:{}", &literal[1..])),
                );
            }
        }
        ValueKind::Enum(members) => {
            for member in members {
                items.push(
                    CompletionCandidate::new(format!("\"{}\"", member), CompletionItemKind::ENUM_MEMBER)
                        .with_detail(format!("{} value", def.name)),
                );
            }
        }
        ValueKind::Number => {
            items.push(
                CompletionCandidate::new("0", CompletionItemKind::VALUE).with_detail("number"),
            );
        }
        ValueKind::Color => {
            for example in COLOR_EXAMPLES {
                items.push(
                    CompletionCandidate::new(format!("\"{}\"", example), CompletionItemKind::COLOR)
                        .with_detail("color"),
                );
            }
        }
        ValueKind::Position => {
            items.push(
                CompletionCandidate::new("x= y=", CompletionItemKind::SNIPPET)
                    .with_snippet_text("x=${1:0} y=${2:0}")
                    .with_detail("position"),
            );
        }
        ValueKind::String => {
            if let Some(example) = def.example {
                items.push(
                    CompletionCandidate::new(example, CompletionItemKind::TEXT)
                        .with_detail("example"),
                );
            }
        }
    }
    items.extend(universal_literal_completions());
    items
}

/// Bare and tagged spellings are both legal; both are offered.
fn universal_literal_completions() -> Vec<CompletionCandidate> {
    let mut items = Vec::new();
    for literal in LITERALS {
        items.push(
            CompletionCandidate::new(*literal, CompletionItemKind::CONSTANT)
                .with_detail("literal")
                .with_data(format!("value:{}", literal)),
        );
        items.push(
            CompletionCandidate::new(format!("#{}", literal), CompletionItemKind::CONSTANT)
                .with_detail("tagged literal")
                .with_data(format!("value:{}", literal)),
        );
    }
    items
}

fn node_completions() -> impl Iterator<Item = CompletionCandidate> {
    NODES.iter().map(|def| {
        CompletionCandidate::new(def.name, CompletionItemKind::MODULE)
            .with_detail("section")
            .with_data(format!("node:{}", def.name))
    })
}

fn flag_completions() -> impl Iterator<Item = CompletionCandidate> {
    FLAGS.iter().map(|def| {
        CompletionCandidate::new(def.name, CompletionItemKind::FIELD)
            .with_detail("flag")
            .with_data(format!("flag:{}", def.name))
    })
}

/// Property items scoped to the innermost recognized enclosing block, with
/// the full table as fallback. Inserting `name=` invites immediate value
/// entry.
fn property_completions(ctx: &CursorContext) -> Vec<CompletionCandidate> {
    let scoped = PROPERTY_SCOPE_ORDER
        .iter()
        .find(|block| ctx.in_block(block))
        .and_then(|block| properties_for_block(block));
    let defs = scoped.unwrap_or_else(|| PROPERTIES.iter().collect());

    defs.into_iter()
        .map(|def| {
            CompletionCandidate::new(format!("{}=", def.name), CompletionItemKind::PROPERTY)
                .with_detail(def.kind.describe())
                .with_insert_text(format!("{}=", def.name))
                .with_data(format!("prop:{}", def.name))
        })
        .collect()
}

/// Modifiers insert `Name+` to invite chaining, and sort before special
/// keys and actions inside the binds block.
fn key_modifier_completions() -> impl Iterator<Item = CompletionCandidate> {
    KEY_MODIFIERS.iter().map(|def| {
        CompletionCandidate::new(format!("{}+", def.name), CompletionItemKind::KEYWORD)
            .with_detail("key modifier")
            .with_insert_text(format!("{}+", def.name))
            .with_sort_text(format!("0{}", def.name))
            .with_data(format!("mod:{}", def.name))
    })
}

fn special_key_completions() -> impl Iterator<Item = CompletionCandidate> {
    SPECIAL_KEYS.iter().map(|def| {
        CompletionCandidate::new(def.name, CompletionItemKind::CONSTANT)
            .with_detail("key")
            .with_sort_text(format!("1{}", def.name))
            .with_data(format!("key:{}", def.name))
    })
}

fn action_completions(in_binds: bool) -> impl Iterator<Item = CompletionCandidate> {
    ACTIONS.iter().map(move |def| {
        let item = CompletionCandidate::new(def.name, CompletionItemKind::FUNCTION)
            .with_detail("action")
            .with_data(format!("action:{}", def.name));
        if in_binds {
            item.with_sort_text(format!("2{}", def.name))
        } else {
            item
        }
    })
}

/// Resolve an opaque candidate tag into Markdown documentation. Pure
/// lookup; the cursor context is not re-derived.
pub fn resolve_documentation(tag: &str) -> Option<String> {
    let (category, name) = tag.split_once(':')?;
    match category {
        "node" => gable_reference::node(name).map(|def| document(def.doc, def.example)),
        "flag" => gable_reference::flag(name).map(|def| document(def.doc, None)),
        "prop" => gable_reference::property(name).map(|def| {
            let heading = format!("{}\n\nValue: {}.", def.doc, def.kind.describe());
            document(&heading, def.example)
        }),
        "action" => gable_reference::action(name).map(|def| document(def.doc, def.example)),
        "mod" => gable_reference::key_modifier(name).map(|def| document(def.doc, None)),
        "key" => gable_reference::special_key(name).map(|def| document(def.doc, None)),
        "value" => literal_doc(name).map(|doc| doc.to_string()),
        _ => None,
    }
}

fn document(doc: &str, example: Option<&str>) -> String {
    match example {
        Some(example) => format!("{}\n\n```gable\n{}\n```", doc, example),
        None => doc.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(text: &str, line: u32, character: u32) -> Vec<CompletionCandidate> {
        completion_items(&LineIndex::new(text), Position::new(line, character))
    }

    fn labels(items: &[CompletionCandidate]) -> Vec<&str> {
        items.iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn input_block_scopes_properties() {
        let items = complete("input {\n  \n}\n", 1, 2);
        let labels = labels(&items);
        assert!(labels.contains(&"accel-speed="));
        assert!(labels.contains(&"scroll-method="));
        assert!(!labels.contains(&"mode="));
    }

    #[test]
    fn binds_block_offers_keys_not_nodes() {
        let items = complete("binds {\n  \n}\n", 1, 2);
        let labels = labels(&items);
        assert!(labels.contains(&"Mod+"));
        assert!(labels.contains(&"Super+"));
        assert!(labels.contains(&"Return"));
        assert!(labels.contains(&"spawn"));
        assert!(!labels.contains(&"input"));
        assert!(!labels.contains(&"gaps="));
    }

    #[test]
    fn binds_sort_keys_rank_modifiers_first() {
        let items = complete("binds {\n  \n}\n", 1, 2);
        let sort_of = |label: &str| {
            items
                .iter()
                .find(|item| item.label == label)
                .and_then(|item| item.sort_text.clone())
                .unwrap()
        };
        assert!(sort_of("Mod+") < sort_of("Return"));
        assert!(sort_of("Return") < sort_of("spawn"));
    }

    #[test]
    fn boolean_property_value_path_is_exclusive() {
        let items = complete("allow-inhibiting=", 0, 17);
        let labels = labels(&items);
        assert_eq!(&labels[..4], &["true", "false", "#true", "#false"]);
        assert!(labels.contains(&"#null"));
        assert!(labels.contains(&"-inf"));
        // No other category leaks in, and no unrelated enum values.
        assert!(!labels.contains(&"input"));
        assert!(!labels.contains(&"\"two-finger\""));
    }

    #[test]
    fn enum_property_offers_quoted_members() {
        let items = complete("scroll-method=", 0, 14);
        let labels = labels(&items);
        assert!(labels.contains(&"\"two-finger\""));
        assert!(labels.contains(&"\"edge\""));
        assert!(labels.contains(&"#true"), "universal set still appended");
    }

    #[test]
    fn position_property_offers_a_two_field_template() {
        let items = complete("position=", 0, 9);
        let template = items
            .iter()
            .find(|item| item.kind == CompletionItemKind::SNIPPET)
            .expect("snippet candidate");
        assert_eq!(template.insert_text.as_deref(), Some("x=${1:0} y=${2:0}"));
        assert!(template.is_snippet);
    }

    #[test]
    fn color_property_offers_example_literals() {
        let items = complete("active-color=", 0, 13);
        let labels = labels(&items);
        assert!(labels.contains(&"\"#7fc8ff\""));
        assert!(labels.contains(&"\"rgb(127, 200, 255)\""));
    }

    #[test]
    fn unknown_property_name_falls_back_to_union() {
        let items = complete("frobnicate=", 0, 11);
        // Not at line start, not after a brace, not a bare name: nothing.
        assert!(items.is_empty());
    }

    #[test]
    fn top_level_line_start_offers_nodes_flags_and_all_properties() {
        let items = complete("", 0, 0);
        let labels = labels(&items);
        assert!(labels.contains(&"input"));
        assert!(labels.contains(&"tap"));
        assert!(labels.contains(&"mode="));
        assert!(labels.contains(&"gaps="));
        assert!(!labels.contains(&"Mod+"));
    }

    #[test]
    fn after_open_brace_behaves_like_line_start() {
        let items = complete("layout { ", 0, 9);
        assert!(labels(&items).contains(&"gaps="));
    }

    #[test]
    fn bare_node_name_triggers_actions() {
        let items = complete("spawn ", 0, 6);
        let labels = labels(&items);
        assert!(labels.contains(&"close-window"));
        assert!(!labels.contains(&"input"));
    }

    #[test]
    fn inner_decoration_block_wins_over_layout() {
        let items = complete("layout {\n  border {\n    \n  }\n}\n", 2, 4);
        let labels = labels(&items);
        assert!(labels.contains(&"active-color="));
        assert!(!labels.contains(&"gaps="));
    }

    #[test]
    fn property_labels_match_their_insert_text() {
        let items = complete("input {\n  \n}\n", 1, 2);
        for item in items.iter().filter(|i| i.kind == CompletionItemKind::PROPERTY) {
            assert_eq!(Some(item.label.as_str()), item.insert_text.as_deref());
        }
    }

    #[test]
    fn same_snapshot_yields_identical_lists() {
        let index = LineIndex::new("binds {\n  \n}\n");
        let position = Position::new(1, 2);
        assert_eq!(
            completion_items(&index, position),
            completion_items(&index, position)
        );
    }

    #[test]
    fn resolve_documentation_by_category() {
        assert!(resolve_documentation("node:input").unwrap().contains("Input device"));
        assert!(resolve_documentation("prop:gaps").unwrap().contains("Value: number."));
        assert!(resolve_documentation("action:spawn").unwrap().contains("```gable"));
        assert!(resolve_documentation("value:nan").is_some());
        assert!(resolve_documentation("prop:nope").is_none());
        assert!(resolve_documentation("garbage").is_none());
    }
}
