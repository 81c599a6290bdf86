use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextLink,
    PrevLink,
    FollowLink,
    ToggleMenu,
    SubmitForm,
    BackToTop,
    DismissPopup,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if let Mode::Alert(_) = app.mode {
        return handle_alert_mode(key);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::ScrollPageUp,

        // gg requires double press
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) | (KeyCode::Char('G'), KeyModifiers::NONE) => {
            Action::JumpToBottom
        }

        (KeyCode::Tab, _) => Action::NextLink,
        (KeyCode::BackTab, _) => Action::PrevLink,
        (KeyCode::Enter, _) => Action::FollowLink,

        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::ToggleMenu,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::SubmitForm,
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::BackToTop,

        _ => Action::None,
    }
}

/// While an alert is shown only dismissal and quit are accepted
fn handle_alert_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) | (KeyCode::Esc, _) | (KeyCode::Char(' '), _) => Action::DismissPopup,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_bindings() {
        let app = test_app();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app), Action::NextLink);
        assert_eq!(handle_key_event(key(KeyCode::Char('m')), &app), Action::ToggleMenu);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), &app),
            Action::ScrollHalfPageDown
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app), Action::None);
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = test_app();
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);
    }

    #[test]
    fn test_alert_mode_swallows_keys() {
        let mut app = test_app();
        app.mode = Mode::Alert("hello".into());
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::DismissPopup);
    }
}
