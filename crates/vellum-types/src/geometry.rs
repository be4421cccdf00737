//! Integer rectangles in logical or pixel coordinates.

/// An axis-aligned rectangle with a signed origin and unsigned extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle from signed extents, returning `None` when either
    /// extent is zero or negative.
    pub fn from_signed(x: i32, y: i32, w: i32, h: i32) -> Option<Self> {
        if w <= 0 || h <= 0 {
            return None;
        }
        Some(Self::new(x, y, w as u32, h as u32))
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// One past the rightmost column.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w as i32)
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h as i32)
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }

    /// Whether `other` lies entirely within this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grow the rectangle by `margin` on all four sides, saturating at the
    /// coordinate limits.
    pub fn outset(&self, margin: u32) -> Self {
        let m = i32::try_from(margin).unwrap_or(i32::MAX);
        let grow = margin.saturating_mul(2);
        Self::new(
            self.x.saturating_sub(m),
            self.y.saturating_sub(m),
            self.w.saturating_add(grow),
            self.h.saturating_add(grow),
        )
    }

    /// Multiply origin and extent by an integer device scale, saturating
    /// at the coordinate limits.
    pub fn scaled(&self, scale: u32) -> Self {
        let s = i32::try_from(scale).unwrap_or(i32::MAX);
        Self::new(
            self.x.saturating_mul(s),
            self.y.saturating_mul(s),
            self.w.saturating_mul(scale),
            self.h.saturating_mul(scale),
        )
    }

    /// Shift the origin by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.w, self.h)
    }

    /// Intersection of two rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 > x && y2 > y {
            Some(Rect::new(x, y, (x2 - x) as u32, (y2 - y) as u32))
        } else {
            None
        }
    }
}
