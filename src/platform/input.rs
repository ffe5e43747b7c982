//! Key identifiers, named actions and per-scene binding tables

use std::collections::HashMap;

/// Keys the core reacts to. Host key codes map onto these via `Key::from_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    W,
    S,
    L,
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    OpenBracket,
    CloseBracket,
    /// Anything else, carrying the raw host code
    Other(u32),
}

impl Key {
    /// Map a DOM-style key code to a key
    pub fn from_code(code: u32) -> Self {
        match code {
            65 => Key::A,
            68 => Key::D,
            87 => Key::W,
            83 => Key::S,
            76 => Key::L,
            37 => Key::Left,
            39 => Key::Right,
            38 => Key::Up,
            40 => Key::Down,
            32 => Key::Space,
            27 => Key::Escape,
            219 => Key::OpenBracket,
            221 => Key::CloseBracket,
            other => Key::Other(other),
        }
    }
}

/// Named boolean actions held in a scene's input map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    FireLeft,
    FireRight,
    FireUp,
    FireDown,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::FireLeft,
        Action::FireRight,
        Action::FireUp,
        Action::FireDown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::MoveUp => "moveUp",
            Action::MoveDown => "moveDown",
            Action::FireLeft => "fireLeft",
            Action::FireRight => "fireRight",
            Action::FireUp => "fireUp",
            Action::FireDown => "fireDown",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held state of every action; persists until the matching key-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 8],
}

impl InputState {
    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    pub fn set(&mut self, action: Action, held: bool) {
        self.held[action.index()] = held;
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.held = [false; 8];
    }

    /// -1, 0 or 1 along x from a negative/positive action pair
    pub fn axis(&self, negative: Action, positive: Action) -> f32 {
        f32::from(i8::from(self.is_held(positive)) - i8::from(self.is_held(negative)))
    }
}

/// Key -> action table owned by a scene
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    table: HashMap<Key, Action>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// WASD to move, arrow keys to fire
    pub fn arena_defaults() -> Self {
        let mut b = Self::new();
        b.bind(Key::A, Action::MoveLeft);
        b.bind(Key::D, Action::MoveRight);
        b.bind(Key::W, Action::MoveUp);
        b.bind(Key::S, Action::MoveDown);
        b.bind(Key::Left, Action::FireLeft);
        b.bind(Key::Right, Action::FireRight);
        b.bind(Key::Up, Action::FireUp);
        b.bind(Key::Down, Action::FireDown);
        b
    }

    pub fn bind(&mut self, key: Key, action: Action) {
        self.table.insert(key, action);
    }

    pub fn get(&self, key: Key) -> Option<Action> {
        self.table.get(&key).copied()
    }
}

/// What a scene did with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Consumed by the scene
    Handled,
    /// Scene-global pause toggle requested
    Pause,
    /// Unbound; silently dropped
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Key::from_code(65), Key::A);
        assert_eq!(Key::from_code(38), Key::Up);
        assert_eq!(Key::from_code(999), Key::Other(999));
    }

    #[test]
    fn test_defaults_bind_movement_and_fire() {
        let b = Bindings::arena_defaults();
        assert_eq!(b.get(Key::W), Some(Action::MoveUp));
        assert_eq!(b.get(Key::Right), Some(Action::FireRight));
        assert_eq!(b.get(Key::Space), None);
    }

    #[test]
    fn test_input_state_axis() {
        let mut input = InputState::default();
        assert_eq!(input.axis(Action::MoveLeft, Action::MoveRight), 0.0);
        input.set(Action::MoveLeft, true);
        assert_eq!(input.axis(Action::MoveLeft, Action::MoveRight), -1.0);
        input.set(Action::MoveRight, true);
        assert_eq!(input.axis(Action::MoveLeft, Action::MoveRight), 0.0);
        input.clear();
        assert!(Action::ALL.iter().all(|a| !input.is_held(*a)));
    }
}
