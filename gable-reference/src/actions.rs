//! Bind action table.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDef {
    pub name: &'static str,
    pub doc: &'static str,
    pub example: Option<&'static str>,
}

pub const ACTIONS: &[ActionDef] = &[
    ActionDef {
        name: "spawn",
        doc: "Runs a command. Arguments are passed directly, without a shell.",
        example: Some("Mod+Return { spawn \"alacritty\"; }"),
    },
    ActionDef {
        name: "close-window",
        doc: "Asks the focused window to close.",
        example: None,
    },
    ActionDef {
        name: "quit",
        doc: "Exits the compositor after a confirmation dialog.",
        example: None,
    },
    ActionDef {
        name: "fullscreen-window",
        doc: "Toggles fullscreen on the focused window.",
        example: None,
    },
    ActionDef {
        name: "maximize-column",
        doc: "Toggles the focused column between its width and the full screen width.",
        example: None,
    },
    ActionDef {
        name: "center-column",
        doc: "Centers the focused column on screen.",
        example: None,
    },
    ActionDef {
        name: "focus-column-left",
        doc: "Moves focus to the column on the left.",
        example: None,
    },
    ActionDef {
        name: "focus-column-right",
        doc: "Moves focus to the column on the right.",
        example: None,
    },
    ActionDef {
        name: "focus-window-up",
        doc: "Moves focus up within the column.",
        example: None,
    },
    ActionDef {
        name: "focus-window-down",
        doc: "Moves focus down within the column.",
        example: None,
    },
    ActionDef {
        name: "move-column-left",
        doc: "Swaps the focused column with the one on the left.",
        example: None,
    },
    ActionDef {
        name: "move-column-right",
        doc: "Swaps the focused column with the one on the right.",
        example: None,
    },
    ActionDef {
        name: "move-window-up",
        doc: "Moves the focused window up within the column.",
        example: None,
    },
    ActionDef {
        name: "move-window-down",
        doc: "Moves the focused window down within the column.",
        example: None,
    },
    ActionDef {
        name: "focus-workspace-up",
        doc: "Moves focus to the workspace above.",
        example: None,
    },
    ActionDef {
        name: "focus-workspace-down",
        doc: "Moves focus to the workspace below.",
        example: None,
    },
    ActionDef {
        name: "move-column-to-workspace-up",
        doc: "Moves the focused column to the workspace above.",
        example: None,
    },
    ActionDef {
        name: "move-column-to-workspace-down",
        doc: "Moves the focused column to the workspace below.",
        example: None,
    },
    ActionDef {
        name: "consume-window-into-column",
        doc: "Pulls the window on the right into the focused column.",
        example: None,
    },
    ActionDef {
        name: "expel-window-from-column",
        doc: "Pushes the focused window out into its own column.",
        example: None,
    },
    ActionDef {
        name: "switch-preset-column-width",
        doc: "Cycles the focused column through the preset widths.",
        example: None,
    },
    ActionDef {
        name: "toggle-window-floating",
        doc: "Moves the focused window between the tiled and floating layers.",
        example: None,
    },
    ActionDef {
        name: "toggle-overview",
        doc: "Opens or closes the workspace overview.",
        example: None,
    },
    ActionDef {
        name: "screenshot",
        doc: "Opens the interactive screenshot UI.",
        example: None,
    },
    ActionDef {
        name: "screenshot-screen",
        doc: "Screenshots the focused output.",
        example: None,
    },
    ActionDef {
        name: "screenshot-window",
        doc: "Screenshots the focused window.",
        example: None,
    },
    ActionDef {
        name: "power-off-monitors",
        doc: "Powers off all outputs until the next input event.",
        example: None,
    },
    ActionDef {
        name: "show-hotkey-overlay",
        doc: "Shows the keyboard shortcut help overlay.",
        example: None,
    },
];

pub fn action(name: &str) -> Option<&'static ActionDef> {
    ACTIONS.iter().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        assert!(action("spawn").is_some());
        assert!(action("spawn-at-login").is_none());
    }
}
