//! Keyboard shortcuts.

use slidedesk_core::input::KeyCommand;
use winit::keyboard::{Key, NamedKey};

/// A keyboard shortcut shown in the help text.
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
}

pub const SHORTCUTS: [Shortcut; 3] = [
    Shortcut {
        key: "Delete",
        description: "Delete selected object",
    },
    Shortcut {
        key: "Backspace",
        description: "Delete selected object",
    },
    Shortcut {
        key: "Escape",
        description: "Cancel object placement",
    },
];

/// Map a pressed key to an editor command.
pub fn key_command(key: &Key) -> Option<KeyCommand> {
    match key {
        Key::Named(NamedKey::Escape) => Some(KeyCommand::Cancel),
        Key::Named(NamedKey::Delete) | Key::Named(NamedKey::Backspace) => {
            Some(KeyCommand::Delete)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_command() {
        assert_eq!(
            key_command(&Key::Named(NamedKey::Escape)),
            Some(KeyCommand::Cancel)
        );
        assert_eq!(
            key_command(&Key::Named(NamedKey::Backspace)),
            Some(KeyCommand::Delete)
        );
        assert_eq!(key_command(&Key::Character("d".into())), None);
    }
}
