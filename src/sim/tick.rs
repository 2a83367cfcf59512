//! Fixed timestep scene update
//!
//! One call advances the scene by one frame, then checks the lead vehicles of
//! crossing lanes for overlap.

use super::layout::{DEADLOCK_PAIRS, RESOLVE_LIGHTS, SWITCHED_LIGHTS};
use super::state::{Phase, Scene, SceneEvent};
use crate::collision::{AlphaMaskCache, CollisionStrategy};
use crate::consts::*;
use crate::error::CollisionError;

/// Command that clears a deadlock
pub const RESOLVE_COMMAND: &str = "resolve";

/// What a command did to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Resolved,
    WrongCommand,
    /// Commands are only read while deadlocked
    Ignored,
}

/// Advance the scene by one frame
pub fn tick(
    scene: &mut Scene,
    strategy: &CollisionStrategy,
    cache: &AlphaMaskCache,
) -> Result<(), CollisionError> {
    // Nothing moves while waiting for a command or once everyone is gone
    match scene.phase {
        Phase::Deadlocked | Phase::Cleared => return Ok(()),
        _ => {}
    }

    scene.frame += 1;

    match scene.phase {
        Phase::Running => {
            for vehicle in &mut scene.vehicles {
                vehicle.drive();
            }
        }
        Phase::Resolving => advance_resolving(scene),
        _ => {}
    }

    for (a, b) in DEADLOCK_PAIRS {
        let hit = strategy.test(&scene.vehicles[a].sprite, &scene.vehicles[b].sprite, cache)?;
        if hit {
            log::info!(
                "Deadlock at frame {}: vehicle {} blocked by vehicle {} ({})",
                scene.frame,
                a,
                b,
                strategy.as_str()
            );
            scene.phase = Phase::Deadlocked;
            scene.push_event(SceneEvent::Deadlock { a, b });
            return Ok(());
        }
    }

    if scene.phase == Phase::Resolving && !scene.any_vehicle_on_screen() {
        log::info!("Intersection cleared at frame {}", scene.frame);
        scene.phase = Phase::Cleared;
        scene.push_event(SceneEvent::Cleared);
    }

    Ok(())
}

/// Lanes take turns: everyone moves briefly, then the vertical lanes wait
/// for the lights to flip
fn advance_resolving(scene: &mut Scene) {
    scene.resolve_counter += 1;

    if scene.resolve_counter < HOLD_AFTER_FRAMES {
        for vehicle in &mut scene.vehicles {
            vehicle.drive();
        }
        return;
    }

    for vehicle in scene.vehicles.iter_mut().filter(|v| v.lane.is_horizontal()) {
        vehicle.drive();
    }

    if scene.frames_since_resolve() >= LIGHT_SWITCH_FRAMES {
        if !scene.lights_switched {
            log::info!("Lights switched at frame {}", scene.frame);
            scene.place_lights(&SWITCHED_LIGHTS);
            scene.lights_switched = true;
            scene.push_event(SceneEvent::LightsSwitched);
        }
        for vehicle in scene.vehicles.iter_mut().filter(|v| !v.lane.is_horizontal()) {
            vehicle.drive();
        }
    }
}

/// Apply a console command to a deadlocked scene (case-insensitive)
pub fn apply_command(scene: &mut Scene, command: &str) -> CommandOutcome {
    if scene.phase != Phase::Deadlocked {
        log::debug!("Ignoring command {:?} in phase {:?}", command, scene.phase);
        return CommandOutcome::Ignored;
    }

    scene.reset_vehicles();

    if command.trim().eq_ignore_ascii_case(RESOLVE_COMMAND) {
        log::info!("Resolving deadlock at frame {}", scene.frame);
        scene.place_lights(&RESOLVE_LIGHTS);
        scene.resolve_counter = 1;
        scene.resolved_at = scene.frame;
        scene.lights_switched = false;
        scene.phase = Phase::Resolving;
        scene.push_event(SceneEvent::Resolved);
        CommandOutcome::Resolved
    } else {
        log::info!("Wrong command {:?}, restarting with deadlock", command.trim());
        scene.lights.clear();
        scene.phase = Phase::Running;
        scene.push_event(SceneEvent::WrongCommand);
        CommandOutcome::WrongCommand
    }
}
