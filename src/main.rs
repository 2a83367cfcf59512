//! Four-Way Deadlock entry point
//!
//! Runs the intersection headless at a fixed timestep and asks for a command
//! on the console whenever the crossing jams.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use four_way_deadlock::AlphaMaskCache;
use four_way_deadlock::consts::*;
use four_way_deadlock::settings::Settings;
use four_way_deadlock::sim::{CommandOutcome, Phase, Scene, SceneAssets, SceneEvent, apply_command, tick};

/// Scene driver holding everything that outlives a single frame
struct Driver {
    scene: Scene,
    settings: Settings,
    cache: AlphaMaskCache,
    accumulator: f32,
    last_time: Instant,
    frames_run: u64,
}

impl Driver {
    fn new(settings: Settings) -> Result<Self, four_way_deadlock::TextureError> {
        let cache = AlphaMaskCache::new();
        let assets = SceneAssets::load_or_placeholder(&settings, &cache)?;
        Ok(Self {
            scene: Scene::new(assets),
            settings,
            cache,
            accumulator: 0.0,
            last_time: Instant::now(),
            frames_run: 0,
        })
    }

    /// Frames to simulate now: as many as real time allows, or one if not pacing
    fn due_frames(&mut self) -> u32 {
        if !self.settings.realtime {
            return 1;
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_time).as_secs_f32().min(0.1);
        self.last_time = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run until the crossing clears, stdin closes, or the frame budget runs out
    fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        while self.frames_run < self.settings.max_frames {
            for _ in 0..self.due_frames() {
                if let Err(e) = tick(&mut self.scene, &self.settings.collision, &self.cache) {
                    log::error!("Collision check failed: {}", e);
                    return Ok(());
                }
                self.frames_run += 1;
            }

            for event in self.scene.drain_events() {
                match event {
                    SceneEvent::Deadlock { a, b } => {
                        log::debug!("Deadlock between vehicles {} and {}", a, b);
                        println!("There was a collision, Road Blocked!");
                        print!("Enter the command 'Resolve' to resolve the deadlock: ");
                        io::stdout().flush()?;

                        let Some(line) = lines.next() else {
                            log::info!("Input closed, exiting");
                            return Ok(());
                        };
                        if apply_command(&mut self.scene, &line?) == CommandOutcome::WrongCommand {
                            println!("Wrong command\nExecuting again with Deadlock");
                        }
                        // Waiting on input shouldn't count as simulated time
                        self.last_time = Instant::now();
                        self.accumulator = 0.0;
                    }
                    SceneEvent::Resolved => println!("Deadlock resolved, lights are up"),
                    SceneEvent::LightsSwitched => println!("Lights switched"),
                    SceneEvent::Cleared => println!("Intersection cleared"),
                    SceneEvent::WrongCommand => {}
                }
            }

            if self.scene.phase == Phase::Cleared {
                break;
            }
            if self.settings.realtime {
                std::thread::sleep(Duration::from_secs_f32(FRAME_DT / 2.0));
            }
        }

        log::info!(
            "Stopped after {} frames in phase {:?} ({} alpha masks cached)",
            self.frames_run,
            self.scene.phase,
            self.cache.len()
        );
        Ok(())
    }
}

fn main() {
    env_logger::init();
    log::info!("Four-Way Deadlock starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());
    log::info!("Collision test: {}", settings.collision.as_str());

    let mut driver = match Driver::new(settings) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("Failed to create scene textures: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = driver.run() {
        log::error!("Console I/O failed: {}", e);
        std::process::exit(1);
    }
}
