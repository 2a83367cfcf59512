//! Headless intersection scene
//!
//! All scene logic lives here and is deterministic:
//! - Fixed timestep only (one call to `tick` is one frame)
//! - Stable iteration order (by vehicle id)
//! - No windowing or rendering dependencies

pub mod assets;
pub mod layout;
pub mod state;
pub mod tick;

pub use assets::SceneAssets;
pub use layout::{DEADLOCK_PAIRS, Lane, LightSpec, Paint, Signal, VEHICLE_COUNT, VEHICLES};
pub use state::{Phase, Scene, SceneEvent, TrafficLight, Vehicle};
pub use tick::{CommandOutcome, RESOLVE_COMMAND, apply_command, tick};
