//! Transformed sprites
//!
//! A sprite is a positioned, scaled, rotated view onto a rectangular region of a
//! shared texture. Transform order matches the usual 2D scene graph convention:
//! `translate(position) * rotate(rotation) * scale(scale) * translate(-origin)`.

use std::sync::Arc;

use glam::{Affine2, Vec2};

use crate::geometry::{FloatRect, IntRect};
use crate::texture::Texture;
use crate::{degrees_to_radians, normalize_degrees};

#[derive(Debug, Clone)]
pub struct Sprite {
    texture: Option<Arc<Texture>>,
    texture_rect: IntRect,
    pub position: Vec2,
    /// Rotation in degrees (clockwise on screen, since y grows downward)
    rotation: f32,
    pub scale: Vec2,
    pub origin: Vec2,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            texture: None,
            texture_rect: IntRect::default(),
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            origin: Vec2::ZERO,
        }
    }
}

impl Sprite {
    /// Sprite showing the whole of `texture`
    pub fn new(texture: Arc<Texture>) -> Self {
        let mut sprite = Self::default();
        sprite.set_texture(texture);
        sprite
    }

    /// Sprite showing the whole of `texture`, placed at `position`
    pub fn at(texture: Arc<Texture>, position: Vec2) -> Self {
        let mut sprite = Self::new(texture);
        sprite.position = position;
        sprite
    }

    /// Bind a texture and reset the texture rect to cover all of it
    pub fn set_texture(&mut self, texture: Arc<Texture>) {
        let (w, h) = texture.size();
        self.texture_rect = IntRect::new(0, 0, w as i32, h as i32);
        self.texture = Some(texture);
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    pub fn texture_rect(&self) -> IntRect {
        self.texture_rect
    }

    pub fn set_texture_rect(&mut self, rect: IntRect) {
        self.texture_rect = rect;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }

    /// Offset the position
    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Local-to-world transform
    pub fn transform(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(
            self.scale,
            degrees_to_radians(self.rotation),
            self.position,
        ) * Affine2::from_translation(-self.origin)
    }

    /// World-to-local transform
    pub fn inverse_transform(&self) -> Affine2 {
        self.transform().inverse()
    }

    /// Untransformed bounds: (0, 0, rect width, rect height)
    pub fn local_bounds(&self) -> FloatRect {
        let size = self.texture_rect.size();
        FloatRect::new(0.0, 0.0, size.x.abs(), size.y.abs())
    }

    /// Axis-aligned world bounds of the transformed sprite
    pub fn global_bounds(&self) -> FloatRect {
        self.local_bounds().transformed(&self.transform())
    }
}
