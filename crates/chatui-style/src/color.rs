//! Terminal colors.
//!
//! Colors are written the way users put them in config files: a 256-color
//! palette index (`"212"`), a hex triplet (`"#ff5f87"` or `"#f58"`), or one of
//! the sixteen basic ANSI names (`"red"`, `"bright-blue"`).

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

const NAMES: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "bright-black",
    "bright-red",
    "bright-green",
    "bright-yellow",
    "bright-blue",
    "bright-magenta",
    "bright-cyan",
    "bright-white",
];

/// A foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Color {
    /// Index into the 256-color palette.
    Ansi(u8),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// SGR sequence selecting this color as foreground.
    pub fn fg_sequence(&self) -> String {
        match self {
            Color::Ansi(n) => format!("\x1b[38;5;{n}m"),
            Color::Rgb(r, g, b) => format!("\x1b[38;2;{r};{g};{b}m"),
        }
    }
}

impl From<u8> for Color {
    fn from(n: u8) -> Self {
        Color::Ansi(n)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi(n) => write!(f, "{n}"),
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// Error returned for unparseable color text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color `{0}`: expected 0-255, #rgb, #rrggbb or an ANSI color name")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ColorParseError(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(err());
            }
            let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| err());
            return match hex.len() {
                6 => Ok(Color::Rgb(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )),
                3 => {
                    let expand = |h: &str| channel(h).map(|v| v * 17);
                    Ok(Color::Rgb(
                        expand(&hex[0..1])?,
                        expand(&hex[1..2])?,
                        expand(&hex[2..3])?,
                    ))
                }
                _ => Err(err()),
            };
        }

        if let Ok(n) = s.parse::<u8>() {
            return Ok(Color::Ansi(n));
        }

        let lower = s.to_ascii_lowercase().replace('_', "-");
        NAMES
            .iter()
            .position(|name| *name == lower)
            .and_then(|i| u8::try_from(i).ok())
            .map(Color::Ansi)
            .ok_or_else(err)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
