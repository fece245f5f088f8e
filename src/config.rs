// config.rs - Viewer configuration, optionally loaded from a JSON file
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::input_queue::DEFAULT_QUEUE_CAPACITY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Main Window".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// Camera tunables. Angles are in degrees except `pitch_epsilon` (radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Startup position, also the position reset returns to
    pub home_position: [f32; 3],
    /// Orbit sphere radius around the target
    pub radius: f32,
    /// Keeps orbit pitch this far away from the poles
    pub pitch_epsilon: f32,
    /// FOV degrees per scroll line
    pub zoom_sensitivity: f32,
    pub fov_default: f32,
    pub fov_min: f32,
    pub fov_max: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            home_position: [0.0, 0.0, 10.0],
            radius: 20.0,
            pitch_epsilon: 0.1,
            zoom_sensitivity: 0.05,
            fov_default: 45.0,
            fov_min: 1.0,
            fov_max: 45.0,
        }
    }
}

impl CameraConfig {
    pub fn home(&self) -> Vec3 {
        Vec3::from_array(self.home_position)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.home_position.iter().all(|c| c.is_finite()),
            "camera.home_position must be finite"
        );
        ensure!(
            self.radius.is_finite() && self.radius > 0.0,
            "camera.radius must be positive, got {}",
            self.radius
        );
        ensure!(
            self.pitch_epsilon.is_finite()
                && self.pitch_epsilon >= 0.0
                && self.pitch_epsilon < std::f32::consts::FRAC_PI_2,
            "camera.pitch_epsilon must be in [0, pi/2), got {}",
            self.pitch_epsilon
        );
        ensure!(
            self.zoom_sensitivity.is_finite(),
            "camera.zoom_sensitivity must be finite"
        );
        if !(self.fov_min > 0.0 && self.fov_min <= self.fov_max && self.fov_max < 180.0) {
            bail!(
                "camera fov bounds must satisfy 0 < min <= max < 180, got [{}, {}]",
                self.fov_min,
                self.fov_max
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    /// Directory holding the material images
    pub assets_dir: PathBuf,
    pub input_queue_capacity: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            assets_dir: PathBuf::from("assets"),
            input_queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Invalid viewer config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.window.width > 0 && self.window.height > 0,
            "window size must be non-zero, got {}x{}",
            self.window.width,
            self.window.height
        );
        ensure!(self.input_queue_capacity > 0, "input_queue_capacity must be non-zero");
        self.camera.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_state() {
        let config = ViewerConfig::default();
        assert_eq!(config.camera.home(), Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(config.camera.radius, 20.0);
        assert_eq!(config.camera.fov_default, 45.0);
        assert_eq!((config.camera.fov_min, config.camera.fov_max), (1.0, 45.0));
        assert_eq!((config.window.width, config.window.height), (640, 480));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "camera": { "radius": 12.5 } }"#).unwrap();
        assert_eq!(config.camera.radius, 12.5);
        assert_eq!(config.camera.zoom_sensitivity, 0.05);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn rejects_inverted_fov_bounds() {
        let err = ViewerConfig::from_json(r#"{ "camera": { "fov_min": 50.0, "fov_max": 10.0 } }"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("fov bounds"));
    }

    #[test]
    fn rejects_zero_radius_and_window() {
        assert!(ViewerConfig::from_json(r#"{ "camera": { "radius": 0.0 } }"#).is_err());
        assert!(ViewerConfig::from_json(r#"{ "window": { "width": 0 } }"#).is_err());
        assert!(ViewerConfig::from_json(r#"{ "input_queue_capacity": 0 }"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(ViewerConfig::from_json("{ not json").is_err());
    }
}
