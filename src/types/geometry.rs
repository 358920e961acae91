use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle. Values are immutable; adjustments return new rectangles.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Move the top edge, keeping the bottom edge fixed.
    #[must_use]
    pub const fn with_top(self, top: i32) -> Self {
        let bottom = self.bottom();
        Self::new(self.x, top, self.width, bottom.saturating_sub(top))
    }

    /// Move the bottom edge, keeping the top edge fixed.
    #[must_use]
    pub const fn with_bottom(self, bottom: i32) -> Self {
        Self::new(self.x, self.y, self.width, bottom.saturating_sub(self.y))
    }

    /// Move the left edge, keeping the right edge fixed.
    #[must_use]
    pub const fn with_left(self, left: i32) -> Self {
        let right = self.right();
        Self::new(left, self.y, right.saturating_sub(left), self.height)
    }

    /// Move the right edge, keeping the left edge fixed.
    #[must_use]
    pub const fn with_right(self, right: i32) -> Self {
        Self::new(self.x, self.y, right.saturating_sub(self.x), self.height)
    }

    #[must_use]
    pub const fn with_height(self, height: i32) -> Self {
        Self::new(self.x, self.y, self.width, height)
    }

    /// Horizontal and vertical overlap extents, or `None` when the rectangles
    /// do not share any interior area (edge-touching counts as disjoint).
    pub fn overlap(&self, other: &Rect) -> Option<Overlap> {
        let horizontal = self.right().min(other.right()).saturating_sub(self.x.max(other.x));
        let vertical = self.bottom().min(other.bottom()).saturating_sub(self.y.max(other.y));
        if horizontal > 0 && vertical > 0 {
            Some(Overlap {
                horizontal,
                vertical,
            })
        } else {
            None
        }
    }
}

/// Extent of the intersection of two rectangles along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub horizontal: i32,
    pub vertical: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 10).is_empty());
    }

    #[test]
    fn test_edge_moves_keep_opposite_edge() {
        let r = Rect::new(0, 150, 600, 200);
        let moved = r.with_top(175);
        assert_eq!(moved.y, 175);
        assert_eq!(moved.bottom(), 350);

        let shrunk = Rect::new(0, 0, 600, 200).with_bottom(175);
        assert_eq!(shrunk.height, 175);

        let left = Rect::new(100, 0, 100, 10).with_left(150);
        assert_eq!((left.x, left.right()), (150, 200));
        let right = Rect::new(100, 0, 100, 10).with_right(120);
        assert_eq!(right.width, 20);
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(0, 0, 600, 200);
        let b = Rect::new(0, 150, 600, 200);
        assert_eq!(
            a.overlap(&b),
            Some(Overlap {
                horizontal: 600,
                vertical: 50
            })
        );

        // Touching edges do not overlap
        let c = Rect::new(0, 200, 600, 10);
        assert_eq!(a.overlap(&c), None);
    }
}
