//! Terminal-independent key input
//!
//! The TUI converts crossterm key events into [`InputKey`] so the app crate
//! never depends on a terminal library.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character pressed with Ctrl
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// Vim-style aliases used by the tables.
    pub fn is_down(&self) -> bool {
        matches!(self, InputKey::Down | InputKey::Char('j'))
    }

    pub fn is_up(&self) -> bool {
        matches!(self, InputKey::Up | InputKey::Char('k'))
    }
}
