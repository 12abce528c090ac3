//! Optional user settings.
//!
//! Settings are read from `settings.json` in the working directory, or failing that from
//! `learnopengl/settings.json` in the platform config directory. Every field is optional and
//! falls back to its default, so a missing or broken file just means default settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.json";

/// Window and context options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// Settings shared by every program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub clear_color: [f32; 4],
    pub log_level: String,
    /// Directory that `shaders/` and `assets/` are resolved against.
    pub asset_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            log_level: "info".to_string(),
            asset_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Parses settings from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Reads settings from the given file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::from_json(&contents)
    }

    /// Files searched for settings, in order of precedence.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(SETTINGS_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("learnopengl").join(SETTINGS_FILE));
        }
        paths
    }

    /// Loads the first settings file found, or the defaults.
    pub fn load() -> Self {
        for path in Self::search_paths() {
            if !path.is_file() {
                continue;
            }
            return match Self::from_file(&path) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            };
        }
        log::debug!("no settings file found, using defaults");
        Self::default()
    }

    /// Resolves a path relative to the asset directory.
    pub fn asset(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.asset_dir.join(relative)
    }

    /// The configured log level; unknown names fall back to `Info`.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
