//! Key modifier and special key name tables for the binds block.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDef {
    pub name: &'static str,
    pub doc: &'static str,
}

pub const KEY_MODIFIERS: &[KeyDef] = &[
    KeyDef {
        name: "Mod",
        doc: "The compositor's main modifier: Super normally, Alt when nested.",
    },
    KeyDef {
        name: "Super",
        doc: "The Super (logo) key.",
    },
    KeyDef {
        name: "Ctrl",
        doc: "The Control key.",
    },
    KeyDef {
        name: "Alt",
        doc: "The Alt key.",
    },
    KeyDef {
        name: "Shift",
        doc: "The Shift key.",
    },
    KeyDef {
        name: "ISO_Level3_Shift",
        doc: "AltGr on most layouts.",
    },
    KeyDef {
        name: "ISO_Level5_Shift",
        doc: "Fifth-level chooser, present on some layouts.",
    },
];

pub const SPECIAL_KEYS: &[KeyDef] = &[
    KeyDef {
        name: "Return",
        doc: "The Enter key.",
    },
    KeyDef {
        name: "Escape",
        doc: "The Escape key.",
    },
    KeyDef {
        name: "Space",
        doc: "The space bar.",
    },
    KeyDef {
        name: "Tab",
        doc: "The Tab key.",
    },
    KeyDef {
        name: "BackSpace",
        doc: "The Backspace key.",
    },
    KeyDef {
        name: "Delete",
        doc: "The Delete key.",
    },
    KeyDef {
        name: "Insert",
        doc: "The Insert key.",
    },
    KeyDef {
        name: "Home",
        doc: "The Home key.",
    },
    KeyDef {
        name: "End",
        doc: "The End key.",
    },
    KeyDef {
        name: "Page_Up",
        doc: "The Page Up key.",
    },
    KeyDef {
        name: "Page_Down",
        doc: "The Page Down key.",
    },
    KeyDef {
        name: "Left",
        doc: "The left arrow key.",
    },
    KeyDef {
        name: "Right",
        doc: "The right arrow key.",
    },
    KeyDef {
        name: "Up",
        doc: "The up arrow key.",
    },
    KeyDef {
        name: "Down",
        doc: "The down arrow key.",
    },
    KeyDef {
        name: "Print",
        doc: "The Print Screen key.",
    },
    KeyDef {
        name: "Menu",
        doc: "The Menu key.",
    },
    KeyDef {
        name: "XF86AudioRaiseVolume",
        doc: "Volume up media key.",
    },
    KeyDef {
        name: "XF86AudioLowerVolume",
        doc: "Volume down media key.",
    },
    KeyDef {
        name: "XF86AudioMute",
        doc: "Mute media key.",
    },
    KeyDef {
        name: "XF86AudioMicMute",
        doc: "Microphone mute media key.",
    },
    KeyDef {
        name: "XF86AudioPlay",
        doc: "Play/pause media key.",
    },
    KeyDef {
        name: "XF86AudioNext",
        doc: "Next track media key.",
    },
    KeyDef {
        name: "XF86AudioPrev",
        doc: "Previous track media key.",
    },
    KeyDef {
        name: "XF86MonBrightnessUp",
        doc: "Screen brightness up key.",
    },
    KeyDef {
        name: "XF86MonBrightnessDown",
        doc: "Screen brightness down key.",
    },
];

pub fn key_modifier(name: &str) -> Option<&'static KeyDef> {
    KEY_MODIFIERS.iter().find(|def| def.name == name)
}

pub fn special_key(name: &str) -> Option<&'static KeyDef> {
    SPECIAL_KEYS.iter().find(|def| def.name == name)
}
