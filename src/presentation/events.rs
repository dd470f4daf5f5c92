//! Event handling: intents carried by the UI tree and key classification.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::entities::EventId;

/// Message bound to a UI-tree behavior.
///
/// The runtime dispatches the intent when the corresponding interaction
/// lands on the node that carries it (a row activation, a form submit, the
/// delete control).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Select an event and fetch its detail.
    Select(EventId),
    /// Submit the creation form.
    SubmitForm,
    /// Ask for confirmation before deleting the selection.
    RequestDelete,
}

/// Result of handling one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit the application.
    Exit,
}

/// Checks if key is a quit event. `q` is only a quit key outside of text
/// entry; the caller decides whether typing is in progress.
#[must_use]
pub fn is_quit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            ..
        }
    )
}

/// Checks if key is the unconditional interrupt (Ctrl+C).
#[must_use]
pub fn is_interrupt_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(is_quit_event(&make_key_event(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_quit_event(&make_key_event(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_interrupt_event() {
        assert!(is_interrupt_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_interrupt_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }
}
