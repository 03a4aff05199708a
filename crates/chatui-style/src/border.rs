//! Box-drawing border sets.
//!
//! ```rust
//! use chatui_style::Border;
//!
//! assert_eq!(Border::rounded().top_left, "╭");
//! ```

/// Characters for the four edges and four corners of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    /// Top edge.
    pub top: &'static str,
    /// Bottom edge.
    pub bottom: &'static str,
    /// Left edge.
    pub left: &'static str,
    /// Right edge.
    pub right: &'static str,
    /// Top-left corner.
    pub top_left: &'static str,
    /// Top-right corner.
    pub top_right: &'static str,
    /// Bottom-left corner.
    pub bottom_left: &'static str,
    /// Bottom-right corner.
    pub bottom_right: &'static str,
}

impl Border {
    /// Square corners: `┌─┐`.
    pub const fn normal() -> Self {
        Self {
            top: "─",
            bottom: "─",
            left: "│",
            right: "│",
            top_left: "┌",
            top_right: "┐",
            bottom_left: "└",
            bottom_right: "┘",
        }
    }

    /// Rounded corners: `╭─╮`.
    pub const fn rounded() -> Self {
        Self {
            top_left: "╭",
            top_right: "╮",
            bottom_left: "╰",
            bottom_right: "╯",
            ..Self::normal()
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_shares_edges_with_normal() {
        assert_eq!(Border::rounded().top, Border::normal().top);
        assert_ne!(Border::rounded().top_left, Border::normal().top_left);
    }
}
