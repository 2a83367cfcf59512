//! Scene state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::assets::SceneAssets;
use super::layout::{Lane, LightSpec, Signal, VEHICLES};
use crate::consts::*;
use crate::geometry::FloatRect;
use crate::sprite::Sprite;

/// Current phase of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// All lanes drive straight in, no lights
    Running,
    /// Two lead vehicles met in the crossing; waiting for a command
    Deadlocked,
    /// Lights are up and lanes take turns
    Resolving,
    /// Every vehicle has left the window
    Cleared,
}

/// Something the front end should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Vehicles `a` and `b` overlap
    Deadlock { a: usize, b: usize },
    /// The resolve command was accepted
    Resolved,
    /// An unrecognised command was given; the scene restarts as before
    WrongCommand,
    /// Lights flipped to let the vertical lanes through
    LightsSwitched,
    /// The crossing is empty
    Cleared,
}

/// A vehicle entity
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: usize,
    pub lane: Lane,
    pub start: Vec2,
    pub sprite: Sprite,
}

impl Vehicle {
    /// Advance one frame along the lane
    pub fn drive(&mut self) {
        self.sprite.move_by(self.lane.velocity());
    }

    /// Back to the start of the lane
    pub fn reset(&mut self) {
        self.sprite.position = self.start;
    }

    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }
}

/// A traffic light entity
#[derive(Debug, Clone)]
pub struct TrafficLight {
    pub signal: Signal,
    pub sprite: Sprite,
}

/// Complete scene state
#[derive(Debug, Clone)]
pub struct Scene {
    /// Vehicles, indexed by id
    pub vehicles: Vec<Vehicle>,
    /// Lights currently standing (empty until a resolve)
    pub lights: Vec<TrafficLight>,
    pub phase: Phase,
    /// Frame counter
    pub frame: u64,
    /// Resolve progress counter, starts at 1 on resolve
    pub resolve_counter: u32,
    /// Frame at which the last resolve happened
    pub resolved_at: u64,
    /// Whether the lights have flipped since the last resolve
    pub lights_switched: bool,
    /// Events since the last drain
    events: Vec<SceneEvent>,
    assets: SceneAssets,
}

impl Scene {
    /// Create a scene with every vehicle at the start of its lane
    pub fn new(assets: SceneAssets) -> Self {
        let vehicles = VEHICLES
            .iter()
            .zip(&assets.vehicles)
            .enumerate()
            .map(|(id, (spec, texture))| Vehicle {
                id,
                lane: spec.lane,
                start: spec.start,
                sprite: Sprite::at(texture.clone(), spec.start),
            })
            .collect();

        Self {
            vehicles,
            lights: Vec::new(),
            phase: Phase::Running,
            frame: 0,
            resolve_counter: 0,
            resolved_at: 0,
            lights_switched: false,
            events: Vec::new(),
            assets,
        }
    }

    pub fn assets(&self) -> &SceneAssets {
        &self.assets
    }

    /// Put every vehicle back at the start of its lane
    pub fn reset_vehicles(&mut self) {
        for vehicle in &mut self.vehicles {
            vehicle.reset();
        }
    }

    /// Replace the standing lights
    pub fn place_lights(&mut self, layout: &[LightSpec]) {
        self.lights = layout
            .iter()
            .map(|spec| TrafficLight {
                signal: spec.signal,
                sprite: Sprite::at(self.assets.light(spec.signal).clone(), spec.position),
            })
            .collect();
    }

    pub fn push_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Frames elapsed since the last resolve
    pub fn frames_since_resolve(&self) -> u64 {
        self.frame.saturating_sub(self.resolved_at)
    }

    /// Whether any vehicle is still inside the window
    pub fn any_vehicle_on_screen(&self) -> bool {
        let window = FloatRect::new(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT);
        self.vehicles
            .iter()
            .any(|v| window.intersects(&v.sprite.global_bounds()))
    }
}
