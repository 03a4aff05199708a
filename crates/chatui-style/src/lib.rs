#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics and terminal UI code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

//! # chatui-style
//!
//! Declarative terminal styling for the chatui widgets:
//! - **Colors**: 256-color palette, true color, ANSI names
//! - **Attributes**: bold, faint, underline, reverse
//! - **Box model**: padding, fixed width, alignment, borders
//! - **Layout**: joining blocks and placing a block inside a viewport
//!
//! Everything renders to a `String` containing ANSI escapes, ready for any
//! terminal renderer.
//!
//! ```rust
//! use chatui_style::{Position, Style, join_horizontal, width};
//!
//! let active = Style::new().bold().padding((0, 1));
//! let inactive = Style::new().faint().padding((0, 1));
//! let strip = join_horizontal(
//!     Position::Top,
//!     &[&active.render("general"), &inactive.render("random")],
//! );
//! assert_eq!(width(&strip), 17);
//! ```

pub mod border;
pub mod color;
pub mod position;
pub mod style;

pub use border::Border;
pub use color::{Color, ColorParseError};
pub use position::{Position, Sides};
pub use style::Style;

use unicode_width::UnicodeWidthChar;

const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, PartialEq)]
enum Scan {
    Normal,
    Esc,
    Csi,
    Osc,
}

/// Feed one char through the escape-sequence scanner.
///
/// Returns whether `c` is visible text.
fn scan(state: &mut Scan, c: char) -> bool {
    match *state {
        Scan::Normal => {
            if c == '\x1b' {
                *state = Scan::Esc;
                false
            } else {
                true
            }
        }
        Scan::Esc => {
            *state = match c {
                '[' => Scan::Csi,
                ']' => Scan::Osc,
                _ => Scan::Normal,
            };
            false
        }
        Scan::Csi => {
            if ('@'..='~').contains(&c) {
                *state = Scan::Normal;
            }
            false
        }
        Scan::Osc => {
            if c == '\x07' {
                *state = Scan::Normal;
            } else if c == '\x1b' {
                *state = Scan::Esc;
            }
            false
        }
    }
}

/// Display width of a single line, ignoring ANSI escapes.
pub fn visible_width(s: &str) -> usize {
    let mut state = Scan::Normal;
    s.chars()
        .filter(|&c| scan(&mut state, c))
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

/// Remove ANSI escape sequences.
pub fn strip_ansi(s: &str) -> String {
    let mut state = Scan::Normal;
    s.chars().filter(|&c| scan(&mut state, c)).collect()
}

/// Shorten a single line to at most `max` columns, ending in `…`.
///
/// Escape sequences are preserved; if any were present the result ends with
/// a reset so styling never leaks past the cut.
pub fn truncate(s: &str, max: usize) -> String {
    if visible_width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let mut out = String::with_capacity(s.len());
    let mut used = 0;
    let mut styled = false;
    let mut state = Scan::Normal;

    for c in s.chars() {
        if !scan(&mut state, c) {
            styled = true;
            out.push(c);
            continue;
        }
        let cw = c.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(c);
    }

    out.push('…');
    if styled {
        out.push_str(RESET);
    }
    out
}

/// Get the width of the widest line in a string.
pub fn width(s: &str) -> usize {
    s.lines().map(visible_width).max().unwrap_or(0)
}

/// Get the number of lines in a string.
pub fn height(s: &str) -> usize {
    s.lines().count().max(1)
}

/// Place blocks side by side, aligned vertically by `pos`.
///
/// Every block is padded to its own width so columns stay straight.
pub fn join_horizontal(pos: Position, blocks: &[&str]) -> String {
    match blocks {
        [] => return String::new(),
        [only] => return (*only).to_string(),
        _ => {}
    }

    let split: Vec<Vec<&str>> = blocks.iter().map(|b| b.lines().collect()).collect();
    let widths: Vec<usize> = split
        .iter()
        .map(|lines| lines.iter().map(|l| visible_width(l)).max().unwrap_or(0))
        .collect();
    let rows = split.iter().map(Vec::len).max().unwrap_or(0);
    let offsets: Vec<usize> = split
        .iter()
        .map(|lines| pos.split(rows - lines.len()).0)
        .collect();

    let mut out = String::new();
    for row in 0..rows {
        if row > 0 {
            out.push('\n');
        }
        for (i, lines) in split.iter().enumerate() {
            let line = row
                .checked_sub(offsets[i])
                .and_then(|r| lines.get(r).copied())
                .unwrap_or("");
            out.push_str(line);
            out.push_str(&" ".repeat(widths[i].saturating_sub(visible_width(line))));
        }
    }
    out
}

/// Stack blocks vertically, aligning each line horizontally by `pos`.
pub fn join_vertical(pos: Position, blocks: &[&str]) -> String {
    match blocks {
        [] => return String::new(),
        [only] => return (*only).to_string(),
        _ => {}
    }

    let max = blocks.iter().map(|b| width(b)).max().unwrap_or(0);
    let mut lines = Vec::new();
    for block in blocks {
        for line in block.lines() {
            let (before, after) = pos.split(max.saturating_sub(visible_width(line)));
            lines.push(format!("{}{line}{}", " ".repeat(before), " ".repeat(after)));
        }
    }
    lines.join("\n")
}

/// Place a block inside a `width` x `height` area.
///
/// Content larger than the area is left untouched on that axis.
///
/// ```rust
/// use chatui_style::{Position, place};
///
/// let placed = place(7, 3, Position::Center, Position::Center, "hi");
/// assert_eq!(placed, "       \n  hi   \n       ");
/// ```
pub fn place(width: usize, height: usize, h_pos: Position, v_pos: Position, s: &str) -> String {
    let content_height = self::height(s);
    let (top, bottom) = v_pos.split(height.saturating_sub(content_height));
    let blank = " ".repeat(width);

    let mut lines: Vec<String> = Vec::with_capacity(height.max(content_height));
    lines.extend(std::iter::repeat_n(blank.clone(), top));
    let content: Vec<&str> = if s.is_empty() { vec![""] } else { s.lines().collect() };
    for line in content {
        let (left, right) = h_pos.split(width.saturating_sub(visible_width(line)));
        lines.push(format!("{}{line}{}", " ".repeat(left), " ".repeat(right)));
    }
    lines.extend(std::iter::repeat_n(blank, bottom));
    lines.join("\n")
}
