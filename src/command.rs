use crate::game::{Direction, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    P,
    M,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (KeyModifiers::NONE, KeyCode::Char('p')) => Some(Command::P),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Command::M),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            _ => None,
        }
    }

    /// The gameplay intent that this command expresses, if any.  Quitting is
    /// handled by the app and is not an intent.
    pub(crate) fn intent(self) -> Option<Intent> {
        match self {
            Command::Space | Command::Enter => Some(Intent::Start),
            Command::P | Command::Esc => Some(Intent::PauseToggle),
            Command::M => Some(Intent::WrapToggle),
            Command::Up => Some(Intent::Turn(Direction::Up)),
            Command::Down => Some(Intent::Turn(Direction::Down)),
            Command::Left => Some(Intent::Turn(Direction::Left)),
            Command::Right => Some(Intent::Turn(Direction::Right)),
            Command::Quit | Command::Q => None,
        }
    }

    pub(crate) fn is_quit(self) -> bool {
        matches!(self, Command::Quit | Command::Q)
    }
}
