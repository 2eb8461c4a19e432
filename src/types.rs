/// An axis-aligned rectangle in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Returns the overlapping region, or `None` when the rectangles are disjoint.
    ///
    /// Edge-adjacent rectangles produce a zero-area intersection rather than `None`, matching
    /// how the platform reports targets that touch the root's edge.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// A single visibility report delivered to an observer callback.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry<E> {
    pub target: E,
    pub is_intersecting: bool,
    /// Visible fraction of the target, in `[0, 1]`.
    pub intersection_ratio: f64,
}

impl<E> IntersectionEntry<E> {
    pub fn new(target: E, is_intersecting: bool, intersection_ratio: f64) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio,
        }
    }

    pub fn intersecting(target: E) -> Self {
        Self::new(target, true, 1.0)
    }

    pub fn not_intersecting(target: E) -> Self {
        Self::new(target, false, 0.0)
    }
}
