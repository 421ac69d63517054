use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Restart,
    Quit,
    None,
}

/// Maps raw key presses to game requests.
///
/// Raw mode keeps the terminal from echoing or scrolling on the navigation
/// keys consumed here.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => steer(Direction::Up),
            KeyCode::Down => steer(Direction::Down),
            KeyCode::Left => steer(Direction::Left),
            KeyCode::Right => steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => steer(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::GameAction(Action::TogglePause)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn steer(direction: Direction) -> KeyAction {
    KeyAction::GameAction(Action::Steer(direction))
}
