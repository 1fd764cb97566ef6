// camera.rs - 2D pan/zoom camera between canvas space and world space

use egui::{Pos2, Vec2, pos2};
use sparse_life::Coord;

pub const MIN_ZOOM: f32 = 0.05;
pub const MAX_ZOOM: f32 = 8.0;

/// `screen = (world - target) * zoom + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,  // canvas-space position of `target`
    pub target: Pos2,  // world-space anchor
    pub zoom: f32,     // kept within [min_zoom, max_zoom]
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(MIN_ZOOM, MAX_ZOOM)
    }
}

impl Camera {
    pub fn new(min_zoom: f32, max_zoom: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            target: Pos2::ZERO,
            zoom: 1.0_f32.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        }
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        ((world - self.target) * self.zoom + self.offset).to_pos2()
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        self.target + (screen.to_vec2() - self.offset) / self.zoom
    }

    /// Scales by `factor` while keeping the world point under `center` fixed.
    pub fn zoom_about(&mut self, center: Pos2, factor: f32) {
        self.target = self.screen_to_world(center);
        self.offset = center.to_vec2();
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Lattice cell under a canvas-space point.
    pub fn cell_at(&self, screen: Pos2, cell_size: f32) -> Coord {
        let world = self.screen_to_world(screen);
        // `as` saturates, so far-off points clamp to the lattice edge.
        Coord::new(
            (world.x / cell_size).floor() as i32,
            (world.y / cell_size).floor() as i32,
        )
    }

    /// Canvas-space top-left corner of a cell.
    pub fn cell_origin(&self, cell: Coord, cell_size: f32) -> Pos2 {
        self.world_to_screen(pos2(cell.x as f32 * cell_size, cell.y as f32 * cell_size))
    }
}
