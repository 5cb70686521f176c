//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Map a key press to a game action.
pub fn action_for_key(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SoftDrop),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Esc => Some(GameAction::Pause),
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Start),
        _ => None,
    }
}

/// Whether the key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Whether the key toggles the mute flag.
pub fn is_mute_toggle(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('m') | KeyCode::Char('M'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn arrows_map_to_movement() {
        assert_eq!(action_for_key(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(action_for_key(key(KeyCode::Right)), Some(GameAction::MoveRight));
        assert_eq!(action_for_key(key(KeyCode::Down)), Some(GameAction::SoftDrop));
        assert_eq!(action_for_key(key(KeyCode::Up)), Some(GameAction::Rotate));
    }

    #[test]
    fn space_hard_drops_and_escape_pauses() {
        assert_eq!(action_for_key(key(KeyCode::Char(' '))), Some(GameAction::HardDrop));
        assert_eq!(action_for_key(key(KeyCode::Esc)), Some(GameAction::Pause));
    }

    #[test]
    fn enter_and_r_start() {
        assert_eq!(action_for_key(key(KeyCode::Enter)), Some(GameAction::Start));
        assert_eq!(action_for_key(key(KeyCode::Char('r'))), Some(GameAction::Start));
    }

    #[test]
    fn quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(!should_quit(key(KeyCode::Char('x'))));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_quit(ctrl_c));
    }

    #[test]
    fn mute_key() {
        assert!(is_mute_toggle(key(KeyCode::Char('m'))));
        assert!(!is_mute_toggle(key(KeyCode::Char('n'))));
    }
}
