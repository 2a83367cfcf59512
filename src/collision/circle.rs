//! Bounding circle approximation
//!
//! Cheap broad-phase check: each sprite becomes a circle centred on its world
//! bounds, with a radius of a quarter of its scaled width + height.

use glam::Vec2;

use super::require_texture;
use crate::error::{CollisionError, SpriteSlot};
use crate::sprite::Sprite;

/// Centre of the sprite's axis-aligned world bounds
pub fn sprite_center(sprite: &Sprite) -> Vec2 {
    sprite.global_bounds().center()
}

/// Texture rect size multiplied by the sprite's scale
pub fn sprite_size(sprite: &Sprite) -> Vec2 {
    sprite.texture_rect().size() * sprite.scale
}

/// Approximate radius: the mean of scaled width and height, halved
#[inline]
pub fn approximate_radius(sprite: &Sprite) -> f32 {
    let size = sprite_size(sprite);
    (size.x + size.y) / 4.0
}

/// Whether the approximating circles of two sprites touch or overlap
pub fn circle_test(a: &Sprite, b: &Sprite) -> Result<bool, CollisionError> {
    require_texture(a, SpriteSlot::First)?;
    require_texture(b, SpriteSlot::Second)?;

    let reach = approximate_radius(a) + approximate_radius(b);
    let distance = sprite_center(a) - sprite_center(b);
    Ok(distance.length_squared() <= reach * reach)
}
