//! Style definitions and rendering.
//!
//! A [`Style`] is built with chained setters and applied with
//! [`Style::render`]. Rendering happens in a fixed order: content is
//! truncated and aligned to the inner width, SGR attributes and colors are
//! applied per line, then padding and finally the border are added.

use bitflags::bitflags;

use crate::border::Border;
use crate::color::Color;
use crate::position::{Position, Sides};
use crate::{truncate, visible_width};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct Attrs: u8 {
        const BOLD = 1;
        const FAINT = 1 << 1;
        const UNDERLINE = 1 << 2;
        const REVERSE = 1 << 3;
    }
}

const RESET: &str = "\x1b[0m";

/// A terminal style definition.
///
/// # Example
///
/// ```rust
/// use chatui_style::{Border, Color, Style};
///
/// let tab = Style::new()
///     .bold()
///     .foreground(Color::Ansi(212))
///     .padding((0, 1))
///     .border(Border::rounded());
/// let out = tab.render("general");
/// assert_eq!(out.lines().count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    attrs: Attrs,
    fg: Option<Color>,
    width: Option<u16>,
    align: Position,
    padding: Sides,
    border: Option<Border>,
    border_fg: Option<Color>,
}

impl Style {
    /// Creates a new empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bold text.
    pub fn bold(mut self) -> Self {
        self.attrs |= Attrs::BOLD;
        self
    }

    /// Dim text.
    pub fn faint(mut self) -> Self {
        self.attrs |= Attrs::FAINT;
        self
    }

    /// Underlined text.
    pub fn underline(mut self) -> Self {
        self.attrs |= Attrs::UNDERLINE;
        self
    }

    /// Swap foreground and background.
    pub fn reverse(mut self) -> Self {
        self.attrs |= Attrs::REVERSE;
        self
    }

    /// Foreground color.
    pub fn foreground(mut self, color: impl Into<Color>) -> Self {
        self.fg = Some(color.into());
        self
    }

    /// Total rendered width including padding, excluding the border.
    ///
    /// Shorter content is aligned within it, longer content is truncated.
    pub fn width(mut self, w: u16) -> Self {
        self.width = Some(w);
        self
    }

    /// Horizontal alignment of content inside `width`.
    pub fn align(mut self, p: Position) -> Self {
        self.align = p;
        self
    }

    /// Padding inside the border.
    pub fn padding(mut self, sides: impl Into<Sides>) -> Self {
        self.padding = sides.into();
        self
    }

    /// Draw a border around the block.
    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Border color.
    pub fn border_foreground(mut self, color: impl Into<Color>) -> Self {
        self.border_fg = Some(color.into());
        self
    }

    /// Returns the foreground color, if set.
    pub fn get_foreground(&self) -> Option<Color> {
        self.fg
    }

    fn sgr(&self) -> String {
        let mut seq = String::new();
        for (flag, code) in [
            (Attrs::BOLD, "1"),
            (Attrs::FAINT, "2"),
            (Attrs::UNDERLINE, "4"),
            (Attrs::REVERSE, "7"),
        ] {
            if self.attrs.contains(flag) {
                seq.push_str("\x1b[");
                seq.push_str(code);
                seq.push('m');
            }
        }
        if let Some(fg) = self.fg {
            seq.push_str(&fg.fg_sequence());
        }
        seq
    }

    fn paint(seq: &str, text: &str) -> String {
        if seq.is_empty() || text.is_empty() {
            text.to_string()
        } else {
            format!("{seq}{text}{RESET}")
        }
    }

    /// Render the given text with this style applied.
    pub fn render(&self, text: &str) -> String {
        let sgr = self.sgr();

        let text = text.replace("\r\n", "\n");
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

        let pad_h = self.padding.horizontal();
        if let Some(limit) = self.width.map(|w| usize::from(w).saturating_sub(pad_h)) {
            for line in &mut lines {
                if visible_width(line) > limit {
                    *line = truncate(line, limit);
                }
            }
        }

        let content_width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
        let inner = match self.width {
            Some(w) => usize::from(w).saturating_sub(pad_h),
            None => content_width,
        };

        let left_pad = " ".repeat(usize::from(self.padding.left));
        let right_pad = " ".repeat(usize::from(self.padding.right));
        let full_width = inner + pad_h;
        let blank = " ".repeat(full_width);

        let mut block: Vec<String> = Vec::with_capacity(lines.len() + 2);
        for _ in 0..self.padding.top {
            block.push(blank.clone());
        }
        for line in &lines {
            let (before, after) = self.align.split(inner.saturating_sub(visible_width(line)));
            let body = format!("{}{}{}", " ".repeat(before), line, " ".repeat(after));
            block.push(format!("{left_pad}{}{right_pad}", Self::paint(&sgr, &body)));
        }
        for _ in 0..self.padding.bottom {
            block.push(blank.clone());
        }

        if let Some(border) = self.border {
            block = self.apply_border(border, block, full_width);
        }

        block.join("\n")
    }

    fn apply_border(&self, border: Border, block: Vec<String>, width: usize) -> Vec<String> {
        let seq = self.border_fg.map(|c| c.fg_sequence()).unwrap_or_default();
        let edge = |s: &str| Self::paint(&seq, s);

        let top = format!(
            "{}{}{}",
            border.top_left,
            border.top.repeat(width),
            border.top_right
        );
        let bottom = format!(
            "{}{}{}",
            border.bottom_left,
            border.bottom.repeat(width),
            border.bottom_right
        );

        let mut out = Vec::with_capacity(block.len() + 2);
        out.push(edge(&top));
        for line in block {
            out.push(format!("{}{line}{}", edge(border.left), edge(border.right)));
        }
        out.push(edge(&bottom));
        out
    }
}
