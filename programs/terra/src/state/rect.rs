use anchor_lang::prelude::*;
use std::fmt;

/// Axis-aligned rectangle in world units. Edges are computed in u64 so
/// `x + width` cannot overflow.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Strict intersection test. Rectangles that only share an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        (self.x as u64) < other.right()
            && (other.x as u64) < self.right()
            && (self.y as u64) < other.bottom()
            && (other.y as u64) < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Positive dimensions and fully inside a `width` x `height` world.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.right() <= width as u64
            && self.bottom() <= height as u64
    }

    /// The rectangle left over after carving `sub` out of `self`.
    ///
    /// Only defined when `sub` is a strict subset that spans the full width
    /// or height of `self` and sits flush against one side; any other cut
    /// leaves a non-rectangular remainder.
    pub fn split_remainder(&self, sub: &Rect) -> Option<Rect> {
        if sub.width == 0 || sub.height == 0 || !self.contains(sub) || sub == self {
            return None;
        }

        if sub.width == self.width {
            let rest = self.height - sub.height;
            if sub.y == self.y {
                return Some(Rect::new(self.x, self.y + sub.height, self.width, rest));
            }
            if sub.bottom() == self.bottom() {
                return Some(Rect::new(self.x, self.y, self.width, rest));
            }
            return None;
        }

        if sub.height == self.height {
            let rest = self.width - sub.width;
            if sub.x == self.x {
                return Some(Rect::new(self.x + sub.width, self.y, rest, self.height));
            }
            if sub.right() == self.right() {
                return Some(Rect::new(self.x, self.y, rest, self.height));
            }
        }

        None
    }

    /// Union of two edge-adjacent rectangles, when that union is itself a
    /// rectangle.
    pub fn union_with(&self, other: &Rect) -> Option<Rect> {
        if self.y == other.y && self.height == other.height {
            let (left, right) = if self.x <= other.x { (self, other) } else { (other, self) };
            if left.right() == right.x as u64 {
                let width = left.width.checked_add(right.width)?;
                return Some(Rect::new(left.x, left.y, width, left.height));
            }
        }

        if self.x == other.x && self.width == other.width {
            let (top, bottom) = if self.y <= other.y { (self, other) } else { (other, self) };
            if top.bottom() == bottom.y as u64 {
                let height = top.height.checked_add(bottom.height)?;
                return Some(Rect::new(top.x, top.y, top.width, height));
            }
        }

        None
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.overlaps(&Rect::new(5, 5, 10, 10)));
        assert!(a.overlaps(&Rect::new(9, 9, 1, 1)));
        // Touching edges and corners are not overlaps
        assert!(!a.overlaps(&Rect::new(10, 0, 5, 10)));
        assert!(!a.overlaps(&Rect::new(0, 10, 10, 5)));
        assert!(!a.overlaps(&Rect::new(10, 10, 1, 1)));
    }

    #[test]
    fn test_fits_within() {
        assert!(Rect::new(0, 0, 1000, 1000).fits_within(1000, 1000));
        assert!(!Rect::new(1, 0, 1000, 1000).fits_within(1000, 1000));
        assert!(!Rect::new(0, 0, 0, 10).fits_within(1000, 1000));
        assert!(!Rect::new(0, 0, 10, 0).fits_within(1000, 1000));
        assert!(!Rect::new(u32::MAX, 0, u32::MAX, 1).fits_within(u32::MAX, u32::MAX));
    }

    #[test]
    fn test_split_remainder_on_each_side() {
        let parent = Rect::new(0, 0, 10, 10);
        assert_eq!(
            parent.split_remainder(&Rect::new(0, 0, 5, 10)),
            Some(Rect::new(5, 0, 5, 10))
        );
        assert_eq!(
            parent.split_remainder(&Rect::new(7, 0, 3, 10)),
            Some(Rect::new(0, 0, 7, 10))
        );
        assert_eq!(
            parent.split_remainder(&Rect::new(0, 0, 10, 4)),
            Some(Rect::new(0, 4, 10, 6))
        );
        assert_eq!(
            parent.split_remainder(&Rect::new(0, 8, 10, 2)),
            Some(Rect::new(0, 0, 10, 8))
        );
    }

    #[test]
    fn test_split_remainder_rejects_bad_cuts() {
        let parent = Rect::new(0, 0, 10, 10);
        // Whole parcel
        assert_eq!(parent.split_remainder(&parent), None);
        // Middle strip leaves two pieces
        assert_eq!(parent.split_remainder(&Rect::new(3, 0, 3, 10)), None);
        // Corner leaves an L shape
        assert_eq!(parent.split_remainder(&Rect::new(0, 0, 5, 5)), None);
        // Outside the parent
        assert_eq!(parent.split_remainder(&Rect::new(5, 0, 10, 10)), None);
        assert_eq!(parent.split_remainder(&Rect::new(0, 0, 0, 10)), None);
    }

    #[test]
    fn test_union_with() {
        let left = Rect::new(0, 0, 5, 10);
        let right = Rect::new(5, 0, 5, 10);
        assert_eq!(left.union_with(&right), Some(Rect::new(0, 0, 10, 10)));
        assert_eq!(right.union_with(&left), Some(Rect::new(0, 0, 10, 10)));

        let top = Rect::new(2, 0, 4, 3);
        let bottom = Rect::new(2, 3, 4, 7);
        assert_eq!(bottom.union_with(&top), Some(Rect::new(2, 0, 4, 10)));

        // Gap between them
        assert_eq!(left.union_with(&Rect::new(6, 0, 5, 10)), None);
        // Mismatched height
        assert_eq!(left.union_with(&Rect::new(5, 0, 5, 9)), None);
        // Corner contact only
        assert_eq!(left.union_with(&Rect::new(5, 10, 5, 10)), None);
        // Overlapping
        assert_eq!(left.union_with(&Rect::new(4, 0, 5, 10)), None);
    }
}
