//! Terminal key handling
//!
//! Keys are translated to their DOM key names and resolved through
//! [`KeypadAction::from_key`], so the terminal accepts exactly the browser's
//! key set. `q` and Ctrl+`q` quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::KeypadAction;

/// What a terminal key event asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermAction {
    /// A keypad action for the engine
    Keypad(KeypadAction),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Maps crossterm key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> TermAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return TermAction::None;
        }
        if code == KeyCode::Char('q') {
            return TermAction::Quit;
        }

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        key_name(code)
            .and_then(|name| KeypadAction::from_key(&name, ctrl))
            .map_or(TermAction::None, TermAction::Keypad)
    }
}

/// DOM-style name of a key code
#[must_use]
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Enter => Some("Enter".to_string()),
        KeyCode::Backspace => Some("Backspace".to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        KeyCode::Tab => Some("Tab".to_string()),
        _ => None,
    }
}
