//! Sprite collision detection
//!
//! Three independent overlap tests between two transformed sprites:
//! - `bounding_box_test`: oriented rectangles, separating axis theorem
//! - `circle_test`: bounding circle approximation (cheap broad phase)
//! - `pixel_perfect_test`: opaque texels in common, using cached alpha masks
//!
//! None of them keep state between calls apart from the alpha mask cache,
//! which only ever grows (or is explicitly pruned by its owner).

pub mod circle;
pub mod mask;
pub mod obb;
pub mod pixel;
pub mod strategy;

use std::path::Path;
use std::sync::Arc;

pub use circle::{approximate_radius, circle_test, sprite_center, sprite_size};
pub use mask::{AlphaMask, AlphaMaskCache};
pub use obb::{OrientedBoundingBox, bounding_box_test};
pub use pixel::pixel_perfect_test;
pub use strategy::CollisionStrategy;

use crate::error::{CollisionError, SpriteSlot, TextureError};
use crate::sprite::Sprite;
use crate::texture::Texture;

/// The sprite's texture, or `InvalidSprite` if none is bound
fn require_texture(sprite: &Sprite, which: SpriteSlot) -> Result<&Arc<Texture>, CollisionError> {
    sprite
        .texture()
        .ok_or(CollisionError::InvalidSprite { which })
}

/// Load a texture from an image file and prime its alpha mask
pub fn create_texture_and_mask<P: AsRef<Path>>(
    path: P,
    cache: &AlphaMaskCache,
) -> Result<Arc<Texture>, TextureError> {
    let texture = Texture::from_file(path)?.shared();
    cache.prime(&texture);
    Ok(texture)
}
