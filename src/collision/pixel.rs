//! Pixel-perfect overlap using cached alpha masks
//!
//! Every integer world pixel inside the intersection of the two sprites' world
//! bounds is mapped back into each sprite's texture through its inverse
//! transform. The sprites touch when some pixel is opaque in both.

use glam::Vec2;

use super::mask::{AlphaMask, AlphaMaskCache};
use super::require_texture;
use crate::error::{CollisionError, SpriteSlot};
use crate::geometry::IntRect;
use crate::sprite::Sprite;

/// One sprite's side of the scan: inverse transform, sub-rect and mask
struct Sampler {
    inverse: glam::Affine2,
    rect: IntRect,
    size: Vec2,
    mask: std::sync::Arc<AlphaMask>,
}

impl Sampler {
    fn new(sprite: &Sprite, cache: &AlphaMaskCache, slot: SpriteSlot) -> Result<Self, CollisionError> {
        let texture = require_texture(sprite, slot)?;
        let rect = sprite.texture_rect();
        Ok(Self {
            inverse: sprite.inverse_transform(),
            rect,
            size: rect.size(),
            mask: cache.get_mask(texture),
        })
    }

    /// Local texel coordinate for a world pixel, if it lies inside the sub-rect
    ///
    /// The lower bound is exclusive, so local row/column 0 never matches.
    #[inline]
    fn local(&self, world: Vec2) -> Option<Vec2> {
        let local = self.inverse.transform_point2(world);
        let inside = local.x > 0.0 && local.y > 0.0 && local.x < self.size.x && local.y < self.size.y;
        inside.then_some(local)
    }

    #[inline]
    fn alpha_at(&self, local: Vec2) -> u8 {
        let x = local.x as i64 + self.rect.left as i64;
        let y = local.y as i64 + self.rect.top as i64;
        self.mask.pixel_alpha_signed(x, y)
    }
}

/// Whether two sprites have an opaque pixel in common
///
/// A texel counts as opaque when its alpha is strictly greater than
/// `alpha_threshold`. Cost grows with the area where the bounds overlap, so
/// callers with many sprites should run a cheaper test first.
pub fn pixel_perfect_test(
    a: &Sprite,
    b: &Sprite,
    cache: &AlphaMaskCache,
    alpha_threshold: u8,
) -> Result<bool, CollisionError> {
    require_texture(a, SpriteSlot::First)?;
    require_texture(b, SpriteSlot::Second)?;

    let Some(overlap) = a.global_bounds().intersection(&b.global_bounds()) else {
        return Ok(false);
    };
    if a.texture_rect().is_empty() || b.texture_rect().is_empty() {
        return Ok(false);
    }

    let first = Sampler::new(a, cache, SpriteSlot::First)?;
    let second = Sampler::new(b, cache, SpriteSlot::Second)?;

    // Float to int casts saturate, so the scan stays within i32
    let columns = (overlap.left as i32)..(overlap.right().ceil() as i32);
    let rows = (overlap.top as i32)..(overlap.bottom().ceil() as i32);

    for i in columns {
        for j in rows.clone() {
            let world = Vec2::new(i as f32, j as f32);
            let (Some(local_a), Some(local_b)) = (first.local(world), second.local(world)) else {
                continue;
            };

            if first.alpha_at(local_a) > alpha_threshold && second.alpha_at(local_b) > alpha_threshold {
                log::trace!("Pixel overlap at ({}, {})", i, j);
                return Ok(true);
            }
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;
    use std::sync::Arc;

    const OPAQUE: [u8; 4] = [255, 255, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn solid(size: u32) -> Arc<Texture> {
        Texture::solid(size, size, OPAQUE).unwrap().shared()
    }

    /// Square texture opaque only in one quadrant
    fn quadrant(size: u32, right: bool, bottom: bool) -> Arc<Texture> {
        let half = size / 2;
        Texture::from_fn(size, size, |x, y| {
            let in_x = if right { x >= half } else { x < half };
            let in_y = if bottom { y >= half } else { y < half };
            if in_x && in_y { OPAQUE } else { CLEAR }
        })
        .unwrap()
        .shared()
    }

    #[test]
    fn test_identical_opaque_sprites_collide() {
        let cache = AlphaMaskCache::new();
        let tex = solid(16);
        let a = Sprite::at(Arc::clone(&tex), Vec2::new(30.0, 30.0));
        let b = Sprite::at(tex, Vec2::new(30.0, 30.0));
        assert!(pixel_perfect_test(&a, &b, &cache, 0).unwrap());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overlap_past_i32_range_does_not_overflow() {
        let cache = AlphaMaskCache::new();
        let far = Vec2::new(2_147_483_648.0, 0.0);
        let mut a = Sprite::at(solid(4), far);
        a.scale = Vec2::new(1000.0, 1.0);
        let b = a.clone();
        assert!(a.global_bounds().intersects(&b.global_bounds()));
        // Columns start beyond i32::MAX, so there is nothing left to scan
        assert!(!pixel_perfect_test(&a, &b, &cache, 0).unwrap());
    }

    #[test]
    fn test_disjoint_bounds_skip_mask_build() {
        let cache = AlphaMaskCache::new();
        let a = Sprite::at(solid(10), Vec2::ZERO);
        let b = Sprite::at(solid(10), Vec2::new(50.0, 50.0));
        assert!(!pixel_perfect_test(&a, &b, &cache, 0).unwrap());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_opaque_corners_pointing_away() {
        // Bounds overlap by half, but A is opaque top-left and B bottom-right
        let cache = AlphaMaskCache::new();
        let a = Sprite::at(quadrant(20, false, false), Vec2::ZERO);
        let b = Sprite::at(quadrant(20, true, true), Vec2::new(10.0, 10.0));
        assert!(a.global_bounds().intersects(&b.global_bounds()));
        assert!(!pixel_perfect_test(&a, &b, &cache, 0).unwrap());

        // Facing each other, the same overlap is a hit
        let a = Sprite::at(quadrant(20, true, true), Vec2::ZERO);
        let b = Sprite::at(quadrant(20, false, false), Vec2::new(5.0, 5.0));
        assert!(pixel_perfect_test(&a, &b, &cache, 0).unwrap());
    }

    #[test]
    fn test_alpha_threshold() {
        let cache = AlphaMaskCache::new();
        let faint = Texture::solid(8, 8, [255, 255, 255, 40]).unwrap().shared();
        let a = Sprite::at(Arc::clone(&faint), Vec2::ZERO);
        let b = Sprite::at(solid(8), Vec2::new(2.0, 2.0));
        assert!(pixel_perfect_test(&a, &b, &cache, 0).unwrap());
        assert!(pixel_perfect_test(&a, &b, &cache, 39).unwrap());
        assert!(!pixel_perfect_test(&a, &b, &cache, 40).unwrap());
    }

    #[test]
    fn test_first_row_and_column_are_excluded() {
        // A single-pixel overlap exactly on B's local (0, 0) doesn't register
        let cache = AlphaMaskCache::new();
        let a = Sprite::at(solid(10), Vec2::ZERO);
        let b = Sprite::at(solid(10), Vec2::new(9.0, 9.0));
        assert!(a.global_bounds().intersects(&b.global_bounds()));
        assert!(!pixel_perfect_test(&a, &b, &cache, 0).unwrap());

        // A two-pixel deep overlap reaches B's local (1, 1)
        let b = Sprite::at(solid(10), Vec2::new(8.0, 8.0));
        assert!(pixel_perfect_test(&a, &b, &cache, 0).unwrap());
    }

    #[test]
    fn test_texture_rect_offsets_into_atlas() {
        // 20x10 atlas: left half clear, right half opaque
        let atlas = Texture::from_fn(20, 10, |x, _| if x >= 10 { OPAQUE } else { CLEAR })
            .unwrap()
            .shared();
        let cache = AlphaMaskCache::new();
        let other = Sprite::at(solid(10), Vec2::ZERO);

        let mut clear = Sprite::at(Arc::clone(&atlas), Vec2::new(2.0, 2.0));
        clear.set_texture_rect(IntRect::new(0, 0, 10, 10));
        assert!(!pixel_perfect_test(&clear, &other, &cache, 0).unwrap());

        let mut opaque = Sprite::at(atlas, Vec2::new(2.0, 2.0));
        opaque.set_texture_rect(IntRect::new(10, 0, 10, 10));
        assert!(pixel_perfect_test(&opaque, &other, &cache, 0).unwrap());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_rotated_sprite() {
        // Thin bar rotated 90° about its centre becomes vertical
        let cache = AlphaMaskCache::new();
        let bar = Texture::solid(40, 4, OPAQUE).unwrap().shared();
        let mut rotated = Sprite::at(bar, Vec2::new(50.0, 50.0));
        rotated.origin = Vec2::new(20.0, 2.0);
        rotated.set_rotation(90.0);

        let beside = Sprite::at(solid(6), Vec2::new(60.0, 47.0));
        let below = Sprite::at(solid(6), Vec2::new(47.0, 60.0));
        assert!(!pixel_perfect_test(&rotated, &beside, &cache, 0).unwrap());
        assert!(pixel_perfect_test(&rotated, &below, &cache, 0).unwrap());
    }

    #[test]
    fn test_missing_texture_is_invalid() {
        let cache = AlphaMaskCache::new();
        let a = Sprite::at(solid(4), Vec2::ZERO);
        assert_eq!(
            pixel_perfect_test(&a, &Sprite::default(), &cache, 0),
            Err(CollisionError::InvalidSprite {
                which: SpriteSlot::Second
            })
        );
    }
}
