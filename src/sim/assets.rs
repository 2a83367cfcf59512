//! Textures used by the scene
//!
//! Loaded from image files when available; otherwise opaque single-colour
//! stand-ins of a configured size are generated so the scene still runs.

use std::path::Path;
use std::sync::Arc;

use super::layout::{Signal, VEHICLE_COUNT, VEHICLES};
use crate::collision::{AlphaMaskCache, create_texture_and_mask};
use crate::error::TextureError;
use crate::settings::Settings;
use crate::texture::Texture;

/// Placeholder light size (pixels)
const PLACEHOLDER_LIGHT_SIZE: u32 = 12;

#[derive(Debug, Clone)]
pub struct SceneAssets {
    /// One texture per vehicle, same order as `layout::VEHICLES`
    pub vehicles: [Arc<Texture>; VEHICLE_COUNT],
    pub red_light: Arc<Texture>,
    pub green_light: Arc<Texture>,
}

impl SceneAssets {
    /// Assemble a texture set; `vehicles` must hold one texture per vehicle
    pub fn new(
        vehicles: Vec<Arc<Texture>>,
        red_light: Arc<Texture>,
        green_light: Arc<Texture>,
    ) -> Result<Self, TextureError> {
        let vehicles: [Arc<Texture>; VEHICLE_COUNT] = vehicles
            .try_into()
            .map_err(|v: Vec<_>| TextureError::VehicleCount {
                expected: VEHICLE_COUNT,
                actual: v.len(),
            })?;
        Ok(Self {
            vehicles,
            red_light,
            green_light,
        })
    }

    /// Load every image under `dir`, priming the mask cache as it goes
    pub fn load(dir: &Path, cache: &AlphaMaskCache) -> Result<Self, TextureError> {
        let vehicles = VEHICLES
            .iter()
            .map(|spec| create_texture_and_mask(dir.join(spec.image_path()), cache))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            vehicles,
            create_texture_and_mask(dir.join(Signal::Red.image_path()), cache)?,
            create_texture_and_mask(dir.join(Signal::Green.image_path()), cache)?,
        )
    }

    /// Solid-colour stand-ins, `size` for vehicles
    pub fn placeholder(size: (u32, u32)) -> Result<Self, TextureError> {
        let (w, h) = size;
        let vehicles = VEHICLES
            .iter()
            .map(|spec| {
                // Vertical lanes drive lengthwise down the screen
                let (w, h) = if spec.lane.is_horizontal() { (w, h) } else { (h, w) };
                Texture::solid(w, h, spec.paint.rgba()).map(Texture::shared)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let light = |signal: Signal| {
            Texture::solid(PLACEHOLDER_LIGHT_SIZE, PLACEHOLDER_LIGHT_SIZE, signal.rgba()).map(Texture::shared)
        };

        Self::new(vehicles, light(Signal::Red)?, light(Signal::Green)?)
    }

    /// Images from the configured directory, or stand-ins if any fail to load
    pub fn load_or_placeholder(settings: &Settings, cache: &AlphaMaskCache) -> Result<Self, TextureError> {
        match Self::load(&settings.asset_dir, cache) {
            Ok(assets) => {
                log::info!("Loaded scene images from {:?}", settings.asset_dir);
                Ok(assets)
            }
            Err(e) => {
                log::warn!("{}; using placeholder textures", e);
                // Masks for whatever did load are of no further use
                cache.purge_dropped();
                Self::placeholder(settings.placeholder_size)
            }
        }
    }

    pub fn light(&self, signal: Signal) -> &Arc<Texture> {
        match signal {
            Signal::Red => &self.red_light,
            Signal::Green => &self.green_light,
        }
    }
}
