//! Section (node) and flag name tables.

/// A named configuration section or standalone node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDef {
    pub name: &'static str,
    pub doc: &'static str,
    pub example: Option<&'static str>,
}

/// A bare flag node: present means enabled, no value attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDef {
    pub name: &'static str,
    pub doc: &'static str,
}

/// Block names the completion classifier probes with the containment oracle.
/// Order matters for nothing here; the classifier checks every entry.
pub const RECOGNIZED_BLOCKS: &[&str] = &[
    "binds",
    "input",
    "output",
    "layout",
    "focus-ring",
    "border",
    "shadow",
    "window-rule",
];

pub const NODES: &[NodeDef] = &[
    NodeDef {
        name: "input",
        doc: "Input device configuration: keyboard, touchpad, mouse and trackpoint sections.",
        example: Some("input {\n    touchpad {\n        tap\n    }\n}"),
    },
    NodeDef {
        name: "output",
        doc: "Settings for one monitor, matched by connector name or by make and model.",
        example: Some("output \"DP-1\" {\n    mode \"2560x1440@143.912\"\n}"),
    },
    NodeDef {
        name: "layout",
        doc: "Column layout options: gaps, centering, preset widths and window decorations.",
        example: Some("layout {\n    gaps 16\n}"),
    },
    NodeDef {
        name: "binds",
        doc: "Key bindings. Each child is a key combination followed by an action.",
        example: Some("binds {\n    Mod+Return { spawn \"alacritty\"; }\n}"),
    },
    NodeDef {
        name: "keyboard",
        doc: "Keyboard layout and key repeat settings.",
        example: None,
    },
    NodeDef {
        name: "touchpad",
        doc: "Touchpad behaviour: tapping, scrolling, acceleration.",
        example: None,
    },
    NodeDef {
        name: "mouse",
        doc: "Mouse behaviour: acceleration and scrolling.",
        example: None,
    },
    NodeDef {
        name: "focus-ring",
        doc: "Highlight drawn around the focused window.",
        example: Some("focus-ring {\n    width 4\n    active-color \"#7fc8ff\"\n}"),
    },
    NodeDef {
        name: "border",
        doc: "Solid border drawn around every window, inside the window geometry.",
        example: None,
    },
    NodeDef {
        name: "shadow",
        doc: "Drop shadow rendered behind windows.",
        example: None,
    },
    NodeDef {
        name: "struts",
        doc: "Extra space reserved at the edges of every output.",
        example: None,
    },
    NodeDef {
        name: "cursor",
        doc: "Xcursor theme and size used by the compositor.",
        example: Some("cursor {\n    xcursor-theme \"breeze_cursors\"\n}"),
    },
    NodeDef {
        name: "environment",
        doc: "Environment variables set for every spawned process.",
        example: Some("environment {\n    DISPLAY \":0\"\n}"),
    },
    NodeDef {
        name: "window-rule",
        doc: "Per-window overrides matched by app id or title.",
        example: Some("window-rule {\n    match app-id=\"firefox\"\n    open-maximized #true\n}"),
    },
    NodeDef {
        name: "workspace",
        doc: "Declares a named workspace that always exists.",
        example: Some("workspace \"chat\""),
    },
    NodeDef {
        name: "animations",
        doc: "Animation tuning: global slowdown and per-animation curves.",
        example: None,
    },
    NodeDef {
        name: "gestures",
        doc: "Touchpad swipe and hot-corner gestures.",
        example: None,
    },
    NodeDef {
        name: "hotkey-overlay",
        doc: "The keyboard shortcut help overlay shown at startup.",
        example: None,
    },
    NodeDef {
        name: "overview",
        doc: "The zoomed-out overview of workspaces and windows.",
        example: None,
    },
    NodeDef {
        name: "spawn-at-startup",
        doc: "Runs a command when the compositor starts.",
        example: Some("spawn-at-startup \"waybar\""),
    },
    NodeDef {
        name: "prefer-no-csd",
        doc: "Asks clients to omit their client-side decorations.",
        example: None,
    },
    NodeDef {
        name: "screenshot-path",
        doc: "Save location for screenshots; strftime-style escapes are expanded.",
        example: Some("screenshot-path \"~/Pictures/Screenshots/%Y-%m-%d %H-%M-%S.png\""),
    },
];

pub const FLAGS: &[FlagDef] = &[
    FlagDef {
        name: "tap",
        doc: "Enables tap-to-click on the touchpad.",
    },
    FlagDef {
        name: "natural-scroll",
        doc: "Inverts the scrolling direction.",
    },
    FlagDef {
        name: "dwt",
        doc: "Disables the touchpad while typing.",
    },
    FlagDef {
        name: "dwtp",
        doc: "Disables the touchpad while the trackpoint is in use.",
    },
    FlagDef {
        name: "tap-and-drag",
        doc: "A tap immediately followed by a finger down starts a drag.",
    },
    FlagDef {
        name: "drag-lock",
        doc: "Keeps a tap-and-drag alive over short finger lifts.",
    },
    FlagDef {
        name: "middle-emulation",
        doc: "Emulates a middle click from a simultaneous left and right click.",
    },
    FlagDef {
        name: "disable-on-external-mouse",
        doc: "Disables the touchpad while an external mouse is plugged in.",
    },
    FlagDef {
        name: "hide-when-typing",
        doc: "Hides the cursor while typing.",
    },
    FlagDef {
        name: "off",
        doc: "Disables the containing section entirely.",
    },
];

pub fn node(name: &str) -> Option<&'static NodeDef> {
    NODES.iter().find(|def| def.name == name)
}

pub fn is_node(name: &str) -> bool {
    node(name).is_some()
}

pub fn flag(name: &str) -> Option<&'static FlagDef> {
    FLAGS.iter().find(|def| def.name == name)
}

pub fn is_flag(name: &str) -> bool {
    flag(name).is_some()
}
