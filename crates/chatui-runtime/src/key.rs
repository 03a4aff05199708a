//! Keyboard input handling.
//!
//! A [`KeyMsg`] is a key chord: one key plus a set of modifiers. Chords are
//! kept in a normalized form so that two chords describing the same physical
//! input compare equal, whether they came from the terminal or were parsed
//! from configuration text like `"shift+tab"` or `"ctrl+n"`.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Modifier keys held while a key was pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Control.
        const CTRL = 1;
        /// Alt / Option / Meta.
        const ALT = 1 << 1;
        /// Shift. Dropped for printable characters, which carry their case.
        const SHIFT = 1 << 2;
    }
}

/// The key part of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, including space.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Insert.
    Insert,
    /// Escape.
    Esc,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Function key F1..F20.
    F(u8),
}

impl KeyCode {
    fn name(self) -> Option<&'static str> {
        let name = match self {
            KeyCode::Char(' ') => "space",
            KeyCode::Char(_) | KeyCode::F(_) => return None,
            KeyCode::Enter => "enter",
            KeyCode::Tab => "tab",
            KeyCode::BackTab => "shift+tab",
            KeyCode::Backspace => "backspace",
            KeyCode::Delete => "delete",
            KeyCode::Insert => "insert",
            KeyCode::Esc => "esc",
            KeyCode::Up => "up",
            KeyCode::Down => "down",
            KeyCode::Left => "left",
            KeyCode::Right => "right",
            KeyCode::Home => "home",
            KeyCode::End => "end",
            KeyCode::PageUp => "pgup",
            KeyCode::PageDown => "pgdown",
        };
        Some(name)
    }

    fn from_name(name: &str) -> Option<Self> {
        let code = match name {
            "space" => KeyCode::Char(' '),
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "insert" => KeyCode::Insert,
            "esc" | "escape" => KeyCode::Esc,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" | "pageup" => KeyCode::PageUp,
            "pgdown" | "pagedown" => KeyCode::PageDown,
            _ => {
                let n = name.strip_prefix('f')?.parse::<u8>().ok()?;
                if (1..=20).contains(&n) {
                    KeyCode::F(n)
                } else {
                    return None;
                }
            }
        };
        Some(code)
    }
}

/// Keyboard key event message.
///
/// # Example
///
/// ```rust
/// use chatui_runtime::{KeyCode, KeyMsg, Modifiers};
///
/// let chord: KeyMsg = "shift+tab".parse().unwrap();
/// assert_eq!(chord, KeyMsg::new(KeyCode::Tab, Modifiers::SHIFT));
/// assert_eq!(chord.to_string(), "shift+tab");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyMsg {
    /// The key pressed.
    pub code: KeyCode,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyMsg {
    /// Create a normalized chord.
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        let mut code = code;
        let mut modifiers = modifiers;
        match code {
            KeyCode::Tab if modifiers.contains(Modifiers::SHIFT) => {
                code = KeyCode::BackTab;
                modifiers.remove(Modifiers::SHIFT);
            }
            KeyCode::BackTab => modifiers.remove(Modifiers::SHIFT),
            KeyCode::Char(c) => {
                modifiers.remove(Modifiers::SHIFT);
                if modifiers.contains(Modifiers::CTRL) && c.is_ascii_alphabetic() {
                    code = KeyCode::Char(c.to_ascii_lowercase());
                }
            }
            _ => {}
        }
        Self { code, modifiers }
    }

    /// Create an unmodified key.
    pub fn from_code(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Create a key message for a typed character.
    pub fn from_char(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::empty())
    }

    /// Returns the chord with Ctrl added.
    #[must_use]
    pub fn with_ctrl(self) -> Self {
        Self::new(self.code, self.modifiers | Modifiers::CTRL)
    }

    /// Returns the chord with Alt added.
    #[must_use]
    pub fn with_alt(self) -> Self {
        Self::new(self.code, self.modifiers | Modifiers::ALT)
    }

    /// The character this key would insert into a text buffer, if any.
    ///
    /// Chords holding Ctrl or Alt never insert text.
    pub fn text(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// Translate a crossterm key event.
    ///
    /// Key releases and keys without a chord representation (media keys,
    /// lone modifiers, caps lock) yield `None`.
    pub fn from_crossterm(event: &crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::{KeyCode as Ct, KeyEventKind, KeyModifiers};

        if event.kind == KeyEventKind::Release {
            return None;
        }

        let code = match event.code {
            Ct::Char(c) => KeyCode::Char(c),
            Ct::Enter => KeyCode::Enter,
            Ct::Tab => KeyCode::Tab,
            Ct::BackTab => KeyCode::BackTab,
            Ct::Backspace => KeyCode::Backspace,
            Ct::Delete => KeyCode::Delete,
            Ct::Insert => KeyCode::Insert,
            Ct::Esc => KeyCode::Esc,
            Ct::Up => KeyCode::Up,
            Ct::Down => KeyCode::Down,
            Ct::Left => KeyCode::Left,
            Ct::Right => KeyCode::Right,
            Ct::Home => KeyCode::Home,
            Ct::End => KeyCode::End,
            Ct::PageUp => KeyCode::PageUp,
            Ct::PageDown => KeyCode::PageDown,
            Ct::F(n) if (1..=20).contains(&n) => KeyCode::F(n),
            _ => return None,
        };

        let mut modifiers = Modifiers::empty();
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            modifiers |= Modifiers::CTRL;
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            modifiers |= Modifiers::ALT;
        }
        if event.modifiers.contains(KeyModifiers::SHIFT) {
            modifiers |= Modifiers::SHIFT;
        }

        Some(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::CTRL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            write!(f, "shift+")?;
        }
        match (self.code, self.code.name()) {
            (_, Some(name)) => write!(f, "{name}"),
            (KeyCode::F(n), None) => write!(f, "f{n}"),
            (KeyCode::Char(c), None) => write!(f, "{c}"),
            _ => Ok(()),
        }
    }
}

/// Errors from parsing chord text such as `"ctrl+k"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordParseError {
    /// The chord text was empty.
    #[error("empty key chord")]
    Empty,
    /// A modifier name was not recognized.
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    /// The key name was not recognized.
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

impl FromStr for KeyMsg {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChordParseError::Empty);
        }

        // A literal '+' key is written as "+" or "<mods>++".
        let (mods, key) = if s == "+" {
            ("", "+")
        } else if let Some(mods) = s.strip_suffix("++") {
            (mods, "+")
        } else if let Some((mods, key)) = s.rsplit_once('+') {
            (mods, key)
        } else {
            ("", s)
        };

        if key.is_empty() {
            return Err(ChordParseError::Empty);
        }

        let mut modifiers = Modifiers::empty();
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= Modifiers::CTRL,
                "alt" | "meta" | "option" => modifiers |= Modifiers::ALT,
                "shift" => modifiers |= Modifiers::SHIFT,
                other => return Err(ChordParseError::UnknownModifier(other.to_string())),
            }
        }

        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            _ => KeyCode::from_name(&key.to_ascii_lowercase())
                .ok_or_else(|| ChordParseError::UnknownKey(key.to_string()))?,
        };

        Ok(Self::new(code, modifiers))
    }
}
