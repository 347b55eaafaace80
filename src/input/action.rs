//! Viewer actions
//!
//! Actions are what key presses translate to. The viewer and the host
//! dispatch on them; nothing below this layer knows about keys.

use std::fmt;

/// A user-triggered viewer operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    /// Leave fullscreen, close help, or quit when nothing is open
    Escape,
    ToggleRenderMode,
    ToggleFullscreen,
    SwapSides,
    ToggleTheme,
    Export,
    NextChange,
    PrevChange,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
    ScrollLeft,
    ScrollRight,
    /// Fold or unfold the region at the top visible line of the focused pane
    ToggleFold,
    FocusNextPane,
    ToggleHelp,
}

impl Action {
    /// Short description shown in the help overlay
    pub fn description(&self) -> &'static str {
        match self {
            Action::Quit => "Quit",
            Action::Escape => "Leave fullscreen / close help / quit",
            Action::ToggleRenderMode => "Toggle side-by-side / inline",
            Action::ToggleFullscreen => "Toggle fullscreen",
            Action::SwapSides => "Swap original and modified",
            Action::ToggleTheme => "Toggle dark / light theme",
            Action::Export => "Export both documents to a file",
            Action::NextChange => "Jump to next change",
            Action::PrevChange => "Jump to previous change",
            Action::ScrollUp => "Scroll up",
            Action::ScrollDown => "Scroll down",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::ScrollToTop => "Go to top",
            Action::ScrollToBottom => "Go to bottom",
            Action::ScrollLeft => "Scroll left",
            Action::ScrollRight => "Scroll right",
            Action::ToggleFold => "Fold / unfold block at top line",
            Action::FocusNextPane => "Focus other pane",
            Action::ToggleHelp => "Toggle this help",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Key labels for the default bindings, in help order
pub const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    ("m", Action::ToggleRenderMode),
    ("f", Action::ToggleFullscreen),
    ("s", Action::SwapSides),
    ("t", Action::ToggleTheme),
    ("d", Action::Export),
    ("n", Action::NextChange),
    ("N", Action::PrevChange),
    ("Up / k", Action::ScrollUp),
    ("Down / j", Action::ScrollDown),
    ("PageUp", Action::PageUp),
    ("PageDown / Space", Action::PageDown),
    ("Home / g", Action::ScrollToTop),
    ("End / G", Action::ScrollToBottom),
    ("Left / h", Action::ScrollLeft),
    ("Right / l", Action::ScrollRight),
    ("z", Action::ToggleFold),
    ("Tab", Action::FocusNextPane),
    ("?", Action::ToggleHelp),
    ("Esc", Action::Escape),
    ("q / Ctrl+C", Action::Quit),
];
