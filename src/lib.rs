//! Four-Way Deadlock - a traffic intersection that jams itself
//!
//! Core modules:
//! - `collision`: Sprite overlap tests (oriented bounding box, circle, pixel-perfect)
//! - `sim`: Deterministic headless scene (vehicles, traffic lights, deadlock handling)
//! - `texture` / `sprite`: The transformed-sprite abstraction the tests operate on
//! - `settings`: Data-driven configuration

pub mod collision;
pub mod error;
pub mod geometry;
pub mod settings;
pub mod sim;
pub mod sprite;
pub mod texture;

pub use collision::{
    AlphaMask, AlphaMaskCache, CollisionStrategy, bounding_box_test, circle_test,
    create_texture_and_mask, pixel_perfect_test,
};
pub use error::{CollisionError, SettingsError, SpriteSlot, TextureError};
pub use geometry::{FloatRect, IntRect};
pub use settings::Settings;
pub use sprite::Sprite;
pub use texture::{Texture, TextureId};

/// Scene configuration constants
pub mod consts {
    /// Frames per second of the fixed timestep
    pub const FRAME_RATE: u32 = 60;
    /// Seconds per frame
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 700.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Per-frame lane speeds (pixels/frame)
    pub const WEST_SPEED: f32 = 1.9;
    pub const EAST_SPEED: f32 = 1.5;
    pub const NORTH_SPEED: f32 = 1.8;
    pub const SOUTH_SPEED: f32 = 1.5;

    /// Frames into a resolve after which the vertical lanes are held
    pub const HOLD_AFTER_FRAMES: u32 = 67;
    /// Frames after a resolve before the lights flip and the vertical lanes go (6 s)
    pub const LIGHT_SWITCH_FRAMES: u64 = 6 * FRAME_RATE as u64;
    /// Upper bound on simulation frames run per real frame when catching up
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default alpha threshold for the pixel-perfect test
    pub const DEFAULT_ALPHA_THRESHOLD: u8 = 0;
}

/// Convert a rotation in degrees to radians
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Normalize a rotation in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}
