//! Keyboard shortcuts.
//!
//! A thin adapter: each binding maps onto a [`WizardCommand`] and carries no
//! state of its own.

use super::command::WizardCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Enter,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
        }
    }
}

/// Command bound to `press`, if any.
///
/// | key        | command            |
/// |------------|--------------------|
/// | → / Enter  | next step          |
/// | ←          | previous step      |
/// | Esc        | skip current step  |
/// | Ctrl+S     | save draft         |
/// | Ctrl+R     | reset              |
pub fn command_for(press: KeyPress) -> Option<WizardCommand> {
    match (press.key, press.ctrl) {
        (Key::Right | Key::Enter, false) => Some(WizardCommand::Next),
        (Key::Left, false) => Some(WizardCommand::Previous),
        (Key::Escape, false) => Some(WizardCommand::Skip(None)),
        (Key::Char(c), true) => match c.to_ascii_lowercase() {
            's' => Some(WizardCommand::SaveDraft),
            'r' => Some(WizardCommand::Reset),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_enter_navigate() {
        assert_eq!(command_for(KeyPress::plain(Key::Right)), Some(WizardCommand::Next));
        assert_eq!(command_for(KeyPress::plain(Key::Enter)), Some(WizardCommand::Next));
        assert_eq!(
            command_for(KeyPress::plain(Key::Left)),
            Some(WizardCommand::Previous)
        );
    }

    #[test]
    fn escape_skips_current_step() {
        assert_eq!(
            command_for(KeyPress::plain(Key::Escape)),
            Some(WizardCommand::Skip(None))
        );
    }

    #[test]
    fn ctrl_shortcuts_ignore_case() {
        assert_eq!(command_for(KeyPress::ctrl('S')), Some(WizardCommand::SaveDraft));
        assert_eq!(command_for(KeyPress::ctrl('r')), Some(WizardCommand::Reset));
        assert_eq!(command_for(KeyPress::ctrl('x')), None);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(command_for(KeyPress::plain(Key::Char('s'))), None);
        assert_eq!(
            command_for(KeyPress {
                key: Key::Right,
                ctrl: true
            }),
            None
        );
    }
}
