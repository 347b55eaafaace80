//! Key event translation
//!
//! Maps crossterm key events to viewer actions using the default bindings
//! listed in [`DEFAULT_BINDINGS`](super::action::DEFAULT_BINDINGS).

use super::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translate a key press into an action, if it is bound
pub fn action_for_key(key: &KeyEvent) -> Option<Action> {
    // Some terminals report key releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::Escape,
        KeyCode::Char('m') => Action::ToggleRenderMode,
        KeyCode::Char('f') => Action::ToggleFullscreen,
        KeyCode::Char('s') => Action::SwapSides,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('d') => Action::Export,
        KeyCode::Char('n') => Action::NextChange,
        KeyCode::Char('N') => Action::PrevChange,
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::ScrollToTop,
        KeyCode::End | KeyCode::Char('G') => Action::ScrollToBottom,
        KeyCode::Left | KeyCode::Char('h') => Action::ScrollLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::ScrollRight,
        KeyCode::Char('z') => Action::ToggleFold,
        KeyCode::Tab | KeyCode::BackTab => Action::FocusNextPane,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => return None,
    };

    Some(action)
}
