//! Hardcoded intersection layout
//!
//! Four single-file lanes feed the crossing. Positions are window pixels with
//! the origin at the top-left; vehicles are placed by their top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The side of the crossing a lane enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    /// Enters on the left, drives right
    West,
    /// Enters on the right, drives left
    East,
    /// Enters at the top, drives down
    North,
    /// Enters at the bottom, drives up
    South,
}

impl Lane {
    /// Displacement per frame
    pub fn velocity(&self) -> Vec2 {
        match self {
            Lane::West => Vec2::new(WEST_SPEED, 0.0),
            Lane::East => Vec2::new(-EAST_SPEED, 0.0),
            Lane::North => Vec2::new(0.0, NORTH_SPEED),
            Lane::South => Vec2::new(0.0, -SOUTH_SPEED),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Lane::West | Lane::East)
    }

    /// Image subdirectory for this lane's vehicles
    pub fn image_dir(&self) -> &'static str {
        match self {
            Lane::West => "left",
            Lane::East => "right",
            Lane::North => "north",
            Lane::South => "south",
        }
    }
}

/// Body colours available for vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paint {
    Yellow,
    Blue,
    Black,
    Red,
}

impl Paint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Paint::Yellow => "yellow",
            Paint::Blue => "blue",
            Paint::Black => "black",
            Paint::Red => "red",
        }
    }

    /// RGBA used for stand-in textures
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Paint::Yellow => [240, 200, 40, 255],
            Paint::Blue => [40, 90, 220, 255],
            Paint::Black => [20, 20, 20, 255],
            Paint::Red => [210, 30, 30, 255],
        }
    }
}

/// Where and how a vehicle starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSpec {
    pub lane: Lane,
    pub paint: Paint,
    pub start: Vec2,
}

impl VehicleSpec {
    const fn new(lane: Lane, paint: Paint, x: f32, y: f32) -> Self {
        Self {
            lane,
            paint,
            start: Vec2::new(x, y),
        }
    }

    /// Image path relative to the asset directory, e.g. `left/left_yellow.png`
    pub fn image_path(&self) -> String {
        let dir = self.lane.image_dir();
        format!("{}/{}_{}.png", dir, dir, self.paint.as_str())
    }
}

/// Number of vehicles in the scene
pub const VEHICLE_COUNT: usize = 10;

/// All vehicles, indexed by vehicle id
pub const VEHICLES: [VehicleSpec; VEHICLE_COUNT] = [
    VehicleSpec::new(Lane::West, Paint::Yellow, 0.0, 310.0),
    VehicleSpec::new(Lane::West, Paint::Blue, 60.0, 310.0),
    VehicleSpec::new(Lane::West, Paint::Black, 130.0, 310.0),
    VehicleSpec::new(Lane::East, Paint::Blue, 700.0, 265.0),
    VehicleSpec::new(Lane::East, Paint::Yellow, 630.0, 265.0),
    VehicleSpec::new(Lane::East, Paint::Red, 550.0, 265.0),
    VehicleSpec::new(Lane::North, Paint::Red, 340.0, 0.0),
    VehicleSpec::new(Lane::North, Paint::Blue, 340.0, 60.0),
    VehicleSpec::new(Lane::South, Paint::Black, 385.0, 550.0),
    VehicleSpec::new(Lane::South, Paint::Blue, 385.0, 480.0),
];

/// Lead vehicles whose meeting jams the crossing: (west lead, south lead)
/// and (east lead, north lead)
pub const DEADLOCK_PAIRS: [(usize, usize); 2] = [(2, 9), (5, 7)];

/// Traffic light states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Red,
    Green,
}

impl Signal {
    pub fn image_path(&self) -> &'static str {
        match self {
            Signal::Red => "traficlights/red.png",
            Signal::Green => "traficlights/green.png",
        }
    }

    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Signal::Red => [255, 0, 0, 255],
            Signal::Green => [0, 255, 0, 255],
        }
    }
}

/// A light and where it stands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpec {
    pub signal: Signal,
    pub position: Vec2,
}

impl LightSpec {
    const fn new(signal: Signal, x: f32, y: f32) -> Self {
        Self {
            signal,
            position: Vec2::new(x, y),
        }
    }
}

/// Lights placed when a deadlock is resolved: horizontal traffic goes first
pub const RESOLVE_LIGHTS: [LightSpec; 4] = [
    LightSpec::new(Signal::Red, 485.0, 380.0),
    LightSpec::new(Signal::Green, 485.0, 225.0),
    LightSpec::new(Signal::Green, 265.0, 380.0),
    LightSpec::new(Signal::Red, 265.0, 225.0),
];

/// Lights after the switch: vertical traffic goes
pub const SWITCHED_LIGHTS: [LightSpec; 4] = [
    LightSpec::new(Signal::Red, 485.0, 225.0),
    LightSpec::new(Signal::Green, 485.0, 380.0),
    LightSpec::new(Signal::Green, 265.0, 225.0),
    LightSpec::new(Signal::Red, 265.0, 380.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_paths() {
        assert_eq!(VEHICLES[0].image_path(), "left/left_yellow.png");
        assert_eq!(VEHICLES[5].image_path(), "right/right_red.png");
        assert_eq!(VEHICLES[9].image_path(), "south/south_blue.png");
    }

    #[test]
    fn test_deadlock_pairs_cross_lanes() {
        for (a, b) in DEADLOCK_PAIRS {
            assert!(VEHICLES[a].lane.is_horizontal());
            assert!(!VEHICLES[b].lane.is_horizontal());
        }
    }

    #[test]
    fn test_lane_velocities_point_into_crossing() {
        assert!(Lane::West.velocity().x > 0.0);
        assert!(Lane::East.velocity().x < 0.0);
        assert!(Lane::North.velocity().y > 0.0);
        assert!(Lane::South.velocity().y < 0.0);
    }
}
