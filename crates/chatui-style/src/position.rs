//! Position and alignment types.

/// Alignment along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Align to the top or left.
    #[default]
    Top,
    /// Align to the bottom or right.
    Bottom,
    /// Align to the center.
    Center,
    /// Alias for Top.
    Left,
    /// Alias for Bottom.
    Right,
}

impl Position {
    /// Fraction of the spare space placed before the content.
    pub fn factor(&self) -> f64 {
        match self {
            Position::Top | Position::Left => 0.0,
            Position::Center => 0.5,
            Position::Bottom | Position::Right => 1.0,
        }
    }

    /// Split `extra` cells into (before, after) for this alignment.
    ///
    /// Centering rounds down, leaving the odd cell after the content.
    pub fn split(&self, extra: usize) -> (usize, usize) {
        let before = match self {
            Position::Top | Position::Left => 0,
            Position::Center => extra / 2,
            Position::Bottom | Position::Right => extra,
        };
        (before, extra - before)
    }
}

/// Per-side spacing, CSS order (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    /// Top.
    pub top: u16,
    /// Right.
    pub right: u16,
    /// Bottom.
    pub bottom: u16,
    /// Left.
    pub left: u16,
}

impl Sides {
    /// Create sides from individual values.
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    pub fn horizontal(&self) -> usize {
        usize::from(self.left) + usize::from(self.right)
    }
}

impl From<u16> for Sides {
    fn from(all: u16) -> Self {
        Self::new(all, all, all, all)
    }
}

impl From<(u16, u16)> for Sides {
    fn from((vertical, horizontal): (u16, u16)) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<(u16, u16, u16, u16)> for Sides {
    fn from((top, right, bottom, left): (u16, u16, u16, u16)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        assert_eq!(Position::Left.split(5), (0, 5));
        assert_eq!(Position::Center.split(5), (2, 3));
        assert_eq!(Position::Right.split(5), (5, 0));
    }

    #[test]
    fn test_sides_from_pair() {
        let s = Sides::from((1, 2));
        assert_eq!(s, Sides::new(1, 2, 1, 2));
        assert_eq!(s.horizontal(), 4);
    }
}
