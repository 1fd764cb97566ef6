// config.rs - Runtime settings for the canvas

use std::path::{Path, PathBuf};

use egui::Color32;
use log::info;
use serde::{Deserialize, Serialize};

use crate::camera::{MAX_ZOOM, MIN_ZOOM};
use crate::error::CanvasError;

/// Environment variable naming a JSON settings file.
pub const CONFIG_ENV: &str = "LIFE_CANVAS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// World-space pitch of one cell.
    pub cell_size: f32,
    pub ticks_per_second: u32,
    pub min_ticks_per_second: u32,
    pub tick_step: u32,
    /// Applied on zoom out, inverted on zoom in.
    pub zoom_factor: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Repeats per second while a speed key is held.
    pub tick_hold_rate: f64,
    /// Repeats per second while a zoom key is held.
    pub zoom_hold_rate: f64,
    /// Seconds a key must be held before it repeats.
    pub repeat_delay: f64,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            cell_size: 24.0,
            ticks_per_second: 20,
            min_ticks_per_second: 5,
            tick_step: 5,
            zoom_factor: 0.75,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            tick_hold_rate: 60.0,
            zoom_hold_rate: 30.0,
            repeat_delay: 0.5,
            live_color: [0, 117, 44],     // dark green
            dead_color: [200, 200, 200],  // light gray
        }
    }
}

impl CanvasConfig {
    /// Reads settings from the first CLI argument, else from `LIFE_CANVAS_CONFIG`,
    /// else falls back to defaults.
    pub fn from_env() -> Result<Self, CanvasError> {
        let path = std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV))
            .map(PathBuf::from);

        match path {
            Some(path) => Self::load(&path),
            None => {
                info!("no config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, CanvasError> {
        let text = std::fs::read_to_string(path).map_err(|source| CanvasError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, CanvasError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CanvasError> {
        let invalid = |msg: String| -> Result<(), CanvasError> { Err(CanvasError::InvalidConfig(msg)) };

        if !(self.cell_size > 1.0) {
            return invalid(format!("cell_size must be greater than 1, got {}", self.cell_size));
        }
        if !(self.zoom_factor > 0.0 && self.zoom_factor < 1.0) {
            return invalid(format!("zoom_factor must be in (0, 1), got {}", self.zoom_factor));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= 1.0 && self.max_zoom >= 1.0 && self.max_zoom.is_finite()) {
            return invalid(format!(
                "zoom bounds must satisfy 0 < min_zoom <= 1 <= max_zoom, got {}..{}",
                self.min_zoom, self.max_zoom
            ));
        }
        if self.min_ticks_per_second == 0 {
            return invalid("min_ticks_per_second must be positive".to_owned());
        }
        if self.ticks_per_second < self.min_ticks_per_second {
            return invalid(format!(
                "ticks_per_second {} is below min_ticks_per_second {}",
                self.ticks_per_second, self.min_ticks_per_second
            ));
        }
        if !(self.tick_hold_rate > 0.0 && self.zoom_hold_rate > 0.0) {
            return invalid("hold rates must be positive".to_owned());
        }
        if !(self.repeat_delay >= 0.0) {
            return invalid(format!("repeat_delay must not be negative, got {}", self.repeat_delay));
        }
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return invalid("window size must be positive".to_owned());
        }
        Ok(())
    }

    pub fn live_color(&self) -> Color32 {
        let [r, g, b] = self.live_color;
        Color32::from_rgb(r, g, b)
    }

    pub fn dead_color(&self) -> Color32 {
        let [r, g, b] = self.dead_color;
        Color32::from_rgb(r, g, b)
    }
}
