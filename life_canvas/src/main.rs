// main.rs - Interactive Conway's Game of Life on an unbounded sparse grid

use eframe::egui;
use egui::{Key, Vec2};
use log::{debug, info, warn};
use sparse_life::{Coord, SparseGrid};

mod camera;    // Pan/zoom transform
mod config;    // Runtime settings
mod error;     // Error type for the binary
mod repeat;    // Held-key repeat
mod ticker;    // Generation clock
mod ui;        // eframe::App implementation

use camera::Camera;
use config::CanvasConfig;
use error::CanvasError;
use repeat::KeyRepeat;
use ticker::TickDriver;

fn main() -> Result<(), CanvasError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match CanvasConfig::from_env() {
        Ok(config) => config,
        Err(err @ CanvasError::ConfigIo { .. }) => {
            warn!("{err}, using defaults");
            CanvasConfig::default()
        }
        Err(err) => return Err(err),
    };
    info!(
        "starting at {} ticks/s, cell size {}",
        config.ticks_per_second, config.cell_size
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Life Canvas",
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(config))),
    )?;
    Ok(())
}

/// Everything the frame loop reads and writes; owned by eframe for the
/// lifetime of the window.
pub struct LifeApp {
    pub grid: SparseGrid,
    pub camera: Camera,
    pub ticker: TickDriver,
    pub repeat: KeyRepeat<Key>,
    pub generation: u64,
    pub config: CanvasConfig,
}

impl LifeApp {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            grid: SparseGrid::new(),
            camera: Camera::new(config.min_zoom, config.max_zoom),
            ticker: TickDriver::new(
                config.ticks_per_second,
                config.min_ticks_per_second,
                config.tick_step,
            ),
            repeat: KeyRepeat::new(config.repeat_delay),
            generation: 0,
            config,
        }
    }

    /// Zooms around the middle of a canvas of `canvas_size`.
    pub fn zoom(&mut self, canvas_size: Vec2, zoom_in: bool) {
        let factor = if zoom_in {
            1.0 / self.config.zoom_factor
        } else {
            self.config.zoom_factor
        };
        self.camera.zoom_about((canvas_size / 2.0).to_pos2(), factor);
        debug!("zoom {:.3}", self.camera.zoom);
    }
}

/// Operations the UI drives.
pub trait LifeControls {
    fn step_generation(&mut self);
    fn clear_grid(&mut self);
    fn paint_cell(&mut self, cell: Coord);
    fn erase_cell(&mut self, cell: Coord);
}

impl LifeControls for LifeApp {
    fn step_generation(&mut self) {
        self.grid.advance();
        self.generation += 1;
    }

    fn clear_grid(&mut self) {
        if !self.grid.is_empty() {
            debug!("clearing {} records", self.grid.len());
        }
        self.grid.clear();
        self.generation = 0;
    }

    fn paint_cell(&mut self, cell: Coord) {
        if self.grid.paint_alive(cell) {
            debug!("painted ({}, {})", cell.x, cell.y);
        }
    }

    fn erase_cell(&mut self, cell: Coord) {
        if self.grid.erase_alive(cell) {
            debug!("erased ({}, {})", cell.x, cell.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blinker_through_controls() {
        let mut app = LifeApp::new(CanvasConfig::default());
        for x in 0..3 {
            app.paint_cell(Coord::new(x, 0));
        }
        app.step_generation();
        assert_eq!(app.generation, 1);
        assert!(app.grid.is_alive(Coord::new(1, -1)));
        assert!(app.grid.is_alive(Coord::new(1, 1)));
        assert!(!app.grid.is_alive(Coord::new(0, 0)));
    }

    #[test]
    fn clear_resets_generation() {
        let mut app = LifeApp::new(CanvasConfig::default());
        app.paint_cell(Coord::new(0, 0));
        app.step_generation();
        app.paint_cell(Coord::new(4, 4));
        app.clear_grid();
        assert!(app.grid.is_empty());
        assert_eq!(app.generation, 0);
    }

    #[test]
    fn erase_removes_painted_cell() {
        let mut app = LifeApp::new(CanvasConfig::default());
        app.paint_cell(Coord::new(-2, 3));
        app.erase_cell(Coord::new(-2, 3));
        assert!(app.grid.is_empty());
    }

    #[test]
    fn zoom_in_and_out_cancel() {
        let mut app = LifeApp::new(CanvasConfig::default());
        let canvas = Vec2::new(1280.0, 720.0);
        app.zoom(canvas, false);
        assert!((app.camera.zoom - 0.75).abs() < 1e-6);
        app.zoom(canvas, true);
        assert!((app.camera.zoom - 1.0).abs() < 1e-6);
    }
}
