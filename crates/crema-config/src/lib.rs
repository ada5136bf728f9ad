//! Configuration for the crema landing page.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file yields the defaults; every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use crema_core::{AnimationSpeed, DeviceClass, RoastTheme, Viewport};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for bean placement; random per run when unset.
    pub seed: Option<u64>,
    /// Beans on the floor for wide viewports.
    pub bean_count_desktop: usize,
    /// Beans on the floor for narrow viewports.
    pub bean_count_mobile: usize,
    /// Viewports narrower than this (px) are treated as mobile.
    pub mobile_breakpoint: f32,
    /// Scroll distance (px) the brew section stays pinned on wide viewports.
    pub pin_length_desktop: f32,
    /// Scroll distance (px) the brew section stays pinned on narrow viewports.
    pub pin_length_mobile: f32,
    pub scroll_speed: AnimationSpeed,
    pub theme: RoastTheme,
    /// Seconds the brew timeline takes to catch up with the scroll position.
    pub scrub_smoothing: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            bean_count_desktop: 180,
            bean_count_mobile: 50,
            mobile_breakpoint: 768.0,
            pin_length_desktop: 5000.0,
            pin_length_mobile: 3000.0,
            scroll_speed: AnimationSpeed::default(),
            theme: RoastTheme::default(),
            scrub_smoothing: 1.0,
        }
    }
}

impl Config {
    /// Location of the config file for this platform.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "crema")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the platform config path, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Write to the platform config path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn device_class(&self, viewport: Viewport) -> DeviceClass {
        viewport.device_class(self.mobile_breakpoint)
    }

    /// Number of floor beans for the device class.
    pub fn bean_count(&self, device: DeviceClass) -> usize {
        match device {
            DeviceClass::Desktop => self.bean_count_desktop,
            DeviceClass::Mobile => self.bean_count_mobile,
        }
    }

    /// Pinned scroll length of the brew section for the device class.
    pub fn pin_length(&self, device: DeviceClass) -> f32 {
        match device {
            DeviceClass::Desktop => self.pin_length_desktop,
            DeviceClass::Mobile => self.pin_length_mobile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("crema-config-test-{}-{name}", std::process::id()))
            .join(CONFIG_FILE)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bean_count(DeviceClass::Desktop), 180);
        assert_eq!(config.bean_count(DeviceClass::Mobile), 50);
        assert_eq!(config.pin_length(DeviceClass::Desktop), 5000.0);
        assert_eq!(config.pin_length(DeviceClass::Mobile), 3000.0);
        assert_eq!(
            config.device_class(Viewport::new(640.0, 800.0)),
            DeviceClass::Mobile
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("theme = \"espresso\"\nbean_count_desktop = 90\n").unwrap();
        assert_eq!(config.theme, RoastTheme::Espresso);
        assert_eq!(config.bean_count_desktop, 90);
        assert_eq!(config.bean_count_mobile, 50);
        assert_eq!(config.scroll_speed, AnimationSpeed::Medium);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::parse("theme = \"decaf\"").is_err());
        assert!(Config::parse("bean_count_mobile = -3").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_path("missing");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        let config = Config {
            seed: Some(7),
            scroll_speed: AnimationSpeed::Fast,
            theme: RoastTheme::Light,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let path = temp_path("broken");
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(&path, "scrub_smoothing = \"slow\"").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
