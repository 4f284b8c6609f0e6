//! Property definitions, value kinds and per-block scoping.

/// Declared value kind of a property, used to tailor value completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Number,
    String,
    Color,
    Position,
    Enum(&'static [&'static str]),
}

impl ValueKind {
    /// Short human-readable description for hover and completion detail.
    pub fn describe(&self) -> String {
        match self {
            ValueKind::Bool => "boolean".to_string(),
            ValueKind::Number => "number".to_string(),
            ValueKind::String => "string".to_string(),
            ValueKind::Color => "color".to_string(),
            ValueKind::Position => "position".to_string(),
            ValueKind::Enum(members) => {
                let quoted: Vec<String> = members.iter().map(|m| format!("\"{}\"", m)).collect();
                format!("one of {}", quoted.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: &'static str,
    pub kind: ValueKind,
    pub doc: &'static str,
    pub example: Option<&'static str>,
}

/// Literals accepted everywhere a value is expected, in bare or `#`-tagged
/// spelling.
pub const LITERALS: &[&str] = &["true", "false", "null", "nan", "inf", "-inf"];

pub const PROPERTIES: &[PropertyDef] = &[
    // input
    PropertyDef {
        name: "accel-speed",
        kind: ValueKind::Number,
        doc: "Pointer acceleration speed, from -1.0 (slowest) to 1.0 (fastest).",
        example: Some("accel-speed=0.2"),
    },
    PropertyDef {
        name: "accel-profile",
        kind: ValueKind::Enum(&["adaptive", "flat"]),
        doc: "Pointer acceleration profile.",
        example: Some("accel-profile=\"flat\""),
    },
    PropertyDef {
        name: "scroll-method",
        kind: ValueKind::Enum(&["no-scroll", "two-finger", "edge", "on-button-down"]),
        doc: "How scrolling is triggered on this device.",
        example: Some("scroll-method=\"two-finger\""),
    },
    PropertyDef {
        name: "scroll-factor",
        kind: ValueKind::Number,
        doc: "Multiplier applied to scroll distance.",
        example: None,
    },
    PropertyDef {
        name: "click-method",
        kind: ValueKind::Enum(&["button-areas", "clickfinger"]),
        doc: "How physical touchpad clicks map to buttons.",
        example: None,
    },
    PropertyDef {
        name: "repeat-delay",
        kind: ValueKind::Number,
        doc: "Milliseconds a key must be held before it starts repeating.",
        example: Some("repeat-delay=600"),
    },
    PropertyDef {
        name: "repeat-rate",
        kind: ValueKind::Number,
        doc: "Key repeats per second once repeating has started.",
        example: None,
    },
    PropertyDef {
        name: "track-layout",
        kind: ValueKind::Enum(&["global", "window"]),
        doc: "Whether the keyboard layout is tracked globally or per window.",
        example: None,
    },
    PropertyDef {
        name: "warp-mouse-to-focus",
        kind: ValueKind::Bool,
        doc: "Warps the mouse pointer to newly focused windows.",
        example: None,
    },
    PropertyDef {
        name: "workspace-auto-back-and-forth",
        kind: ValueKind::Bool,
        doc: "Switching to the current workspace switches back to the previous one.",
        example: None,
    },
    // output
    PropertyDef {
        name: "mode",
        kind: ValueKind::String,
        doc: "Output resolution and refresh rate.",
        example: Some("mode=\"1920x1080@59.951\""),
    },
    PropertyDef {
        name: "scale",
        kind: ValueKind::Number,
        doc: "Output scale factor; fractional values are allowed.",
        example: Some("scale=1.5"),
    },
    PropertyDef {
        name: "transform",
        kind: ValueKind::Enum(&[
            "normal",
            "90",
            "180",
            "270",
            "flipped",
            "flipped-90",
            "flipped-180",
            "flipped-270",
        ]),
        doc: "Output rotation and flipping, counter-clockwise.",
        example: None,
    },
    PropertyDef {
        name: "position",
        kind: ValueKind::Position,
        doc: "Logical position of the output in the global coordinate space.",
        example: Some("position x=1280 y=0"),
    },
    PropertyDef {
        name: "variable-refresh-rate",
        kind: ValueKind::Bool,
        doc: "Enables variable refresh rate when the output supports it.",
        example: None,
    },
    // layout
    PropertyDef {
        name: "gaps",
        kind: ValueKind::Number,
        doc: "Gap between windows and around the screen edges, in logical pixels.",
        example: Some("gaps=16"),
    },
    PropertyDef {
        name: "center-focused-column",
        kind: ValueKind::Enum(&["never", "always", "on-overflow"]),
        doc: "When the focused column is centered on screen.",
        example: None,
    },
    PropertyDef {
        name: "always-center-single-column",
        kind: ValueKind::Bool,
        doc: "Centers a lone column regardless of center-focused-column.",
        example: None,
    },
    // focus-ring / border
    PropertyDef {
        name: "width",
        kind: ValueKind::Number,
        doc: "Decoration thickness in logical pixels.",
        example: Some("width=4"),
    },
    PropertyDef {
        name: "active-color",
        kind: ValueKind::Color,
        doc: "Color used for the focused window.",
        example: Some("active-color=\"#7fc8ff\""),
    },
    PropertyDef {
        name: "inactive-color",
        kind: ValueKind::Color,
        doc: "Color used for unfocused windows.",
        example: None,
    },
    PropertyDef {
        name: "urgent-color",
        kind: ValueKind::Color,
        doc: "Color used for windows requesting attention.",
        example: None,
    },
    // shadow
    PropertyDef {
        name: "softness",
        kind: ValueKind::Number,
        doc: "Shadow blur radius in logical pixels.",
        example: None,
    },
    PropertyDef {
        name: "spread",
        kind: ValueKind::Number,
        doc: "How far the shadow extends past the window edge.",
        example: None,
    },
    PropertyDef {
        name: "offset",
        kind: ValueKind::Position,
        doc: "Shadow offset from the window position.",
        example: Some("offset x=0 y=5"),
    },
    PropertyDef {
        name: "color",
        kind: ValueKind::Color,
        doc: "Shadow color, usually with an alpha component.",
        example: Some("color=\"#00000070\""),
    },
    PropertyDef {
        name: "draw-behind-window",
        kind: ValueKind::Bool,
        doc: "Draws the shadow behind translucent windows too.",
        example: None,
    },
    // window-rule
    PropertyDef {
        name: "open-maximized",
        kind: ValueKind::Bool,
        doc: "Opens matching windows as maximized columns.",
        example: None,
    },
    PropertyDef {
        name: "open-fullscreen",
        kind: ValueKind::Bool,
        doc: "Opens matching windows fullscreen.",
        example: None,
    },
    PropertyDef {
        name: "open-floating",
        kind: ValueKind::Bool,
        doc: "Opens matching windows as floating.",
        example: None,
    },
    PropertyDef {
        name: "opacity",
        kind: ValueKind::Number,
        doc: "Opacity applied to matching windows, from 0.0 to 1.0.",
        example: Some("opacity=0.95"),
    },
    PropertyDef {
        name: "clip-to-geometry",
        kind: ValueKind::Bool,
        doc: "Clips matching windows to their visual geometry, rounding included.",
        example: None,
    },
    PropertyDef {
        name: "block-out-from",
        kind: ValueKind::Enum(&["screen-capture", "screencast"]),
        doc: "Blocks matching windows out of screen captures.",
        example: None,
    },
    PropertyDef {
        name: "draw-border-with-background",
        kind: ValueKind::Bool,
        doc: "Draws the border over the window background color.",
        example: None,
    },
    // binds
    PropertyDef {
        name: "allow-inhibiting",
        kind: ValueKind::Bool,
        doc: "Lets clients with a shortcuts inhibitor swallow this bind.",
        example: Some("Mod+Q allow-inhibiting=#false { close-window; }"),
    },
    PropertyDef {
        name: "repeat",
        kind: ValueKind::Bool,
        doc: "Repeats the action while the key combination is held.",
        example: None,
    },
    PropertyDef {
        name: "cooldown-ms",
        kind: ValueKind::Number,
        doc: "Minimum milliseconds between repeated triggers of this bind.",
        example: None,
    },
    PropertyDef {
        name: "hotkey-overlay-title",
        kind: ValueKind::String,
        doc: "Title shown for this bind in the hotkey overlay.",
        example: None,
    },
];

/// Property subsets offered inside the corresponding block. Properties not
/// listed for any block still resolve through [`property`].
const BLOCK_SCOPES: &[(&str, &[&str])] = &[
    (
        "input",
        &[
            "accel-speed",
            "accel-profile",
            "scroll-method",
            "scroll-factor",
            "click-method",
            "repeat-delay",
            "repeat-rate",
            "track-layout",
            "warp-mouse-to-focus",
            "workspace-auto-back-and-forth",
        ],
    ),
    (
        "output",
        &["mode", "scale", "transform", "position", "variable-refresh-rate"],
    ),
    (
        "layout",
        &["gaps", "center-focused-column", "always-center-single-column"],
    ),
    (
        "focus-ring",
        &["width", "active-color", "inactive-color", "urgent-color"],
    ),
    (
        "border",
        &["width", "active-color", "inactive-color", "urgent-color"],
    ),
    (
        "shadow",
        &["softness", "spread", "offset", "color", "draw-behind-window"],
    ),
    (
        "window-rule",
        &[
            "open-maximized",
            "open-fullscreen",
            "open-floating",
            "opacity",
            "clip-to-geometry",
            "block-out-from",
            "draw-border-with-background",
        ],
    ),
];

pub fn property(name: &str) -> Option<&'static PropertyDef> {
    PROPERTIES.iter().find(|def| def.name == name)
}

/// Properties relevant inside the given block, or `None` when the block has
/// no dedicated subset.
pub fn properties_for_block(block: &str) -> Option<Vec<&'static PropertyDef>> {
    let (_, names) = BLOCK_SCOPES.iter().find(|(name, _)| *name == block)?;
    Some(names.iter().filter_map(|name| property(name)).collect())
}

/// Documentation for one of the universal literals, looked up by bare
/// spelling.
pub fn literal_doc(bare: &str) -> Option<&'static str> {
    match bare {
        "true" | "false" => Some(
            "Boolean literal. May be written bare (`true`) or tagged (`#true`); \
             both spellings are accepted.",
        ),
        "null" => Some("Null literal, bare (`null`) or tagged (`#null`)."),
        "nan" => Some("Floating-point not-a-number, bare (`nan`) or tagged (`#nan`)."),
        "inf" | "-inf" => Some("Floating-point infinity, bare (`inf`, `-inf`) or tagged."),
        _ => None,
    }
}
