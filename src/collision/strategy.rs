//! Selectable collision test

use serde::{Deserialize, Serialize};

use super::{AlphaMaskCache, bounding_box_test, circle_test, pixel_perfect_test};
use crate::consts::DEFAULT_ALPHA_THRESHOLD;
use crate::error::CollisionError;
use crate::sprite::Sprite;

/// Which overlap test to run, chosen by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollisionStrategy {
    /// Oriented bounding boxes (separating axis test)
    BoundingBox,
    /// Approximating circles
    Circle,
    /// Opaque texels in common
    PixelPerfect {
        #[serde(default)]
        alpha_threshold: u8,
    },
}

impl Default for CollisionStrategy {
    fn default() -> Self {
        CollisionStrategy::PixelPerfect {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

impl CollisionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionStrategy::BoundingBox => "bounding-box",
            CollisionStrategy::Circle => "circle",
            CollisionStrategy::PixelPerfect { .. } => "pixel-perfect",
        }
    }

    /// Run the selected test on two sprites
    pub fn test(&self, a: &Sprite, b: &Sprite, cache: &AlphaMaskCache) -> Result<bool, CollisionError> {
        match *self {
            CollisionStrategy::BoundingBox => bounding_box_test(a, b),
            CollisionStrategy::Circle => circle_test(a, b),
            CollisionStrategy::PixelPerfect { alpha_threshold } => {
                pixel_perfect_test(a, b, cache, alpha_threshold)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;
    use glam::Vec2;

    #[test]
    fn test_default_is_pixel_perfect() {
        assert_eq!(
            CollisionStrategy::default(),
            CollisionStrategy::PixelPerfect { alpha_threshold: 0 }
        );
    }

    #[test]
    fn test_serde_round_trip_names() {
        let json = serde_json::to_string(&CollisionStrategy::Circle).unwrap();
        assert_eq!(json, r#"{"kind":"circle"}"#);

        let parsed: CollisionStrategy = serde_json::from_str(r#"{"kind":"pixel_perfect"}"#).unwrap();
        assert_eq!(parsed, CollisionStrategy::PixelPerfect { alpha_threshold: 0 });

        let parsed: CollisionStrategy =
            serde_json::from_str(r#"{"kind":"pixel_perfect","alpha_threshold":12}"#).unwrap();
        assert_eq!(parsed, CollisionStrategy::PixelPerfect { alpha_threshold: 12 });
    }

    #[test]
    fn test_strategies_disagree_on_sparse_sprites() {
        // Opaque only in a 5x5 corner; the corners face away from each other
        let corner = |far: bool| {
            Texture::from_fn(20, 20, move |x, y| {
                let hit = if far { x >= 15 && y >= 15 } else { x < 5 && y < 5 };
                if hit { [255, 255, 255, 255] } else { [0, 0, 0, 0] }
            })
            .unwrap()
            .shared()
        };
        let cache = AlphaMaskCache::new();
        let a = Sprite::at(corner(false), Vec2::ZERO);
        let b = Sprite::at(corner(true), Vec2::new(10.0, 10.0));

        assert!(CollisionStrategy::BoundingBox.test(&a, &b, &cache).unwrap());
        assert!(CollisionStrategy::Circle.test(&a, &b, &cache).unwrap());
        assert!(!CollisionStrategy::default().test(&a, &b, &cache).unwrap());
    }
}
