//! Axis-aligned rectangles in world (float) and texel (integer) space

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with float coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl FloatRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Smallest rectangle enclosing all the given points
    pub fn enclosing(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Bounds of this rectangle after applying `transform` to its corners
    pub fn transformed(&self, transform: &Affine2) -> Self {
        let corners = [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right(), self.top),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left, self.bottom()),
        ];
        let mapped = corners.map(|c| transform.transform_point2(c));
        Self::enclosing(&mapped)
    }

    /// Overlapping region of two rectangles, `None` when they only touch or are apart
    pub fn intersection(&self, other: &FloatRect) -> Option<FloatRect> {
        // Normalize negative extents so flipped rectangles still compare sanely
        let (a_left, a_right) = min_max(self.left, self.right());
        let (a_top, a_bottom) = min_max(self.top, self.bottom());
        let (b_left, b_right) = min_max(other.left, other.right());
        let (b_top, b_bottom) = min_max(other.top, other.bottom());

        let left = a_left.max(b_left);
        let top = a_top.max(b_top);
        let right = a_right.min(b_right);
        let bottom = a_bottom.min(b_bottom);

        if left < right && top < bottom {
            Some(FloatRect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    #[inline]
    pub fn intersects(&self, other: &FloatRect) -> bool {
        self.intersection(other).is_some()
    }

    /// Point containment, half-open on the right/bottom edges
    pub fn contains(&self, point: Vec2) -> bool {
        let (left, right) = min_max(self.left, self.right());
        let (top, bottom) = min_max(self.top, self.bottom());
        point.x >= left && point.x < right && point.y >= top && point.y < bottom
    }
}

#[inline]
fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Integer rectangle, used for texture sub-regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Width and height as floats
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
