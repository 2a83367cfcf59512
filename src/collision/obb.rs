//! Oriented bounding boxes and the separating axis test
//!
//! Two convex shapes are disjoint iff there is an axis on which their
//! projections don't overlap. For two rectangles only their edge directions
//! need checking, two per rectangle.

use glam::Vec2;

use super::require_texture;
use crate::error::{CollisionError, SpriteSlot};
use crate::sprite::Sprite;

/// The four world-space corners of a transformed sprite
///
/// Corners are in order: local (0,0), (w,0), (w,h), (0,h).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBoundingBox {
    pub points: [Vec2; 4],
}

impl OrientedBoundingBox {
    pub fn from_sprite(sprite: &Sprite) -> Self {
        let t = sprite.transform();
        let size = sprite.texture_rect().size();
        Self {
            points: [
                t.transform_point2(Vec2::ZERO),
                t.transform_point2(Vec2::new(size.x, 0.0)),
                t.transform_point2(size),
                t.transform_point2(Vec2::new(0.0, size.y)),
            ],
        }
    }

    /// (min, max) of the corners projected onto `axis`
    pub fn project_onto_axis(&self, axis: Vec2) -> (f32, f32) {
        let first = self.points[0].dot(axis);
        self.points[1..]
            .iter()
            .map(|p| p.dot(axis))
            .fold((first, first), |(min, max), proj| {
                (min.min(proj), max.max(proj))
            })
    }

    /// Candidate separating axes contributed by this box: its two edge directions
    fn edge_axes(&self) -> [Vec2; 2] {
        [
            self.points[1] - self.points[0],
            self.points[1] - self.points[2],
        ]
    }
}

/// Whether the transformed rectangles of two sprites overlap
///
/// Rotation and scale are honoured, so this is tighter than comparing the
/// sprites' axis-aligned global bounds.
pub fn bounding_box_test(a: &Sprite, b: &Sprite) -> Result<bool, CollisionError> {
    require_texture(a, SpriteSlot::First)?;
    require_texture(b, SpriteSlot::Second)?;

    let obb_a = OrientedBoundingBox::from_sprite(a);
    let obb_b = OrientedBoundingBox::from_sprite(b);

    let [a0, a1] = obb_a.edge_axes();
    let axes = [
        a0,
        a1,
        obb_b.points[0] - obb_b.points[3],
        obb_b.points[0] - obb_b.points[1],
    ];

    for axis in axes {
        let (min_a, max_a) = obb_a.project_onto_axis(axis);
        let (min_b, max_b) = obb_b.project_onto_axis(axis);

        // Disjoint projections on any axis means the boxes are separated
        if !(min_b <= max_a && max_b >= min_a) {
            return Ok(false);
        }
    }
    Ok(true)
}
