//! Scene settings
//!
//! Loaded from a JSON file; every field is optional and falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collision::CollisionStrategy;
use crate::error::SettingsError;

/// Scene settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overlap test used for deadlock detection
    pub collision: CollisionStrategy,

    // === Assets ===
    /// Directory holding the vehicle and light images
    pub asset_dir: PathBuf,
    /// Size of the stand-in textures used when images can't be loaded
    pub placeholder_size: (u32, u32),

    // === Loop ===
    /// Sleep between frames to run at the real frame rate
    pub realtime: bool,
    /// Stop the console loop after this many frames
    pub max_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collision: CollisionStrategy::default(),

            asset_dir: PathBuf::from("images"),
            placeholder_size: (40, 30),

            realtime: true,
            max_frames: 36_000,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Read settings if a path is given and readable, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "collision": { "kind": "bounding_box" }, "realtime": false }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.collision, CollisionStrategy::BoundingBox);
        assert!(!settings.realtime);
        assert_eq!(settings.asset_dir, PathBuf::from("images"));
        assert_eq!(settings.placeholder_size, (40, 30));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            collision: CollisionStrategy::PixelPerfect { alpha_threshold: 8 },
            max_frames: 10,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_bad_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse { .. })));
        assert!(matches!(
            Settings::load(dir.path().join("missing.json")),
            Err(SettingsError::Io { .. })
        ));
        assert_eq!(Settings::load_or_default(Some(&path)), Settings::default());
        assert_eq!(Settings::load_or_default(None), Settings::default());
    }
}
