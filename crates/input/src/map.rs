//! Key mapping from terminal events to game input.
//!
//! Bindings are a six-character string in the order left, rotate, right, drop, pause,
//! quit (default `"jkl pq"`). Matching is exact, so `J` and `j` are different keys.
//! Ctrl-C is always an interrupt, whatever the bindings.

use std::fmt;

use arrayvec::ArrayVec;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{GameAction, Input, DEFAULT_KEYS};

const KEY_COUNT: usize = GameAction::ALL.len();

/// Why a key map string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMapError {
    /// Not exactly one character per action.
    WrongLength(usize),
    /// The same character is bound twice.
    Duplicate(char),
}

impl fmt::Display for KeyMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMapError::WrongLength(n) => {
                write!(f, "expected {} keys, got {}", KEY_COUNT, n)
            }
            KeyMapError::Duplicate(c) => write!(f, "key {:?} bound twice", c),
        }
    }
}

impl std::error::Error for KeyMapError {}

/// Key bindings, one character per [`GameAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    keys: [char; KEY_COUNT],
}

impl KeyMap {
    /// Parse a binding string such as `"jkl pq"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use micro_tetris_input::KeyMap;
    /// use micro_tetris_input::types::GameAction;
    ///
    /// let keys = KeyMap::parse("asd wx").unwrap();
    /// assert_eq!(keys.key_for(GameAction::HardDrop), ' ');
    /// assert!(KeyMap::parse("aad wx").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, KeyMapError> {
        let count = s.chars().count();
        if count != KEY_COUNT {
            return Err(KeyMapError::WrongLength(count));
        }

        let mut keys: ArrayVec<char, KEY_COUNT> = ArrayVec::new();
        for c in s.chars() {
            if keys.contains(&c) {
                return Err(KeyMapError::Duplicate(c));
            }
            keys.push(c);
        }

        match keys.into_inner() {
            Ok(keys) => Ok(Self { keys }),
            Err(partial) => Err(KeyMapError::WrongLength(partial.len())),
        }
    }

    /// Character bound to `action`.
    pub fn key_for(&self, action: GameAction) -> char {
        self.keys[action as usize]
    }

    /// Action bound to `c`, if any.
    pub fn action_for(&self, c: char) -> Option<GameAction> {
        self.keys
            .iter()
            .position(|&k| k == c)
            .and_then(GameAction::from_index)
    }

    /// Map a key event to game input.
    pub fn map_key(&self, key: KeyEvent) -> Option<Input> {
        if is_interrupt(key) {
            return Some(Input::Interrupt);
        }
        match key.code {
            KeyCode::Char(c) => self.action_for(c).map(Input::Action),
            _ => None,
        }
    }

    /// Map any terminal event to game input. Key releases and non-key events map to
    /// nothing.
    pub fn map_event(&self, event: &Event) -> Option<Input> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.map_key(*key),
            _ => None,
        }
    }

    /// Help lines for the on-screen key legend, e.g. `"space - drop"`.
    pub fn help_lines(&self) -> ArrayVec<String, KEY_COUNT> {
        GameAction::ALL
            .iter()
            .map(|&action| format!("{:<5} - {}", key_label(self.key_for(action)), action.label()))
            .collect()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        // DEFAULT_KEYS is six distinct characters.
        Self::parse(DEFAULT_KEYS).unwrap_or(Self {
            keys: ['j', 'k', 'l', ' ', 'p', 'q'],
        })
    }
}

/// Check if key is the hard interrupt (Ctrl-C).
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn key_label(c: char) -> String {
    match c {
        ' ' => "space".to_string(),
        c => c.to_string(),
    }
}
