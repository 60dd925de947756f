use crate::palette::PaletteCommand;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, PaletteCommand>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: PaletteCommand) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    /// Bound command for `event`; otherwise printable characters typed
    /// without Ctrl/Alt go into the query.
    pub fn resolve(&self, event: KeyEvent) -> Option<PaletteCommand> {
        if let Some(command) = self.bindings.get(&KeyBinding::from_event(event)) {
            return Some(*command);
        }
        match event.code {
            KeyCode::Char(ch)
                if !ch.is_control()
                    && !event.modifiers.contains(KeyModifiers::CONTROL)
                    && !event.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(PaletteCommand::InsertChar(ch))
            }
            _ => None,
        }
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::key(KeyCode::Up), PaletteCommand::SelectPrevious);
        self.bind(KeyBinding::key(KeyCode::Down), PaletteCommand::SelectNext);
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('p')),
            PaletteCommand::SelectPrevious,
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('n')),
            PaletteCommand::SelectNext,
        );
        self.bind(KeyBinding::key(KeyCode::Enter), PaletteCommand::Confirm);
        self.bind(KeyBinding::key(KeyCode::Esc), PaletteCommand::Dismiss);
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('c')),
            PaletteCommand::Dismiss,
        );

        self.bind(KeyBinding::key(KeyCode::Backspace), PaletteCommand::Backspace);
        self.bind(KeyBinding::key(KeyCode::Delete), PaletteCommand::Delete);
        self.bind(KeyBinding::key(KeyCode::Left), PaletteCommand::MoveLeft);
        self.bind(KeyBinding::key(KeyCode::Right), PaletteCommand::MoveRight);
        self.bind(KeyBinding::key(KeyCode::Home), PaletteCommand::MoveHome);
        self.bind(KeyBinding::key(KeyCode::End), PaletteCommand::MoveEnd);
        self.bind(
            KeyBinding::ctrl(KeyCode::Backspace),
            PaletteCommand::DeleteWord,
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('w')),
            PaletteCommand::DeleteWord,
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('u')),
            PaletteCommand::ClearQuery,
        );
    }
}
