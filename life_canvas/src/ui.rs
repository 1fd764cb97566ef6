// ui.rs - Frame loop: input, ticking and drawing

use eframe::egui;
use egui::{Align2, Color32, FontId, Key, Painter, Rect, Vec2};

use crate::{LifeApp, LifeControls};

const TEXT_SIZE: f32 = 32.0;

#[derive(Clone, Copy)]
enum RepeatAction {
    Slower,
    Faster,
    ZoomOut,
    ZoomIn,
}

// Keys that repeat while held
const REPEAT_KEYS: [(Key, RepeatAction); 4] = [
    (Key::ArrowDown, RepeatAction::Slower),
    (Key::ArrowUp, RepeatAction::Faster),
    (Key::Minus, RepeatAction::ZoomOut),
    (Key::PlusEquals, RepeatAction::ZoomIn),
];

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);

        // The simulation clock runs off frame time.
        ctx.request_repaint();
    }
}

impl LifeApp {
    /// One frame: input, at most one generation, then drawing.
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let canvas = response.rect;
                let now = ctx.input(|i| i.time);

                self.handle_pointer(ctx, canvas);
                self.handle_keys(ctx, canvas, now);

                if self.ticker.poll(now) {
                    self.step_generation();
                }

                self.draw_cells(&painter, canvas);
                self.draw_overlay(&painter, canvas);
            });
    }

    pub fn cell_color(&self, alive: bool) -> Color32 {
        if alive {
            self.config.live_color()
        } else {
            self.config.dead_color()
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, canvas: Rect) {
        let (hover, primary, secondary) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_down(),
                i.pointer.secondary_down(),
            )
        });
        let Some(pos) = hover.filter(|pos| canvas.contains(*pos)) else {
            return;
        };

        let cell = self
            .camera
            .cell_at((pos - canvas.min).to_pos2(), self.config.cell_size);
        if primary {
            self.paint_cell(cell);
        }
        if secondary {
            self.erase_cell(cell);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context, canvas: Rect, now: f64) {
        let (step, step_held, reset, toggle, scroll) = ctx.input(|i| {
            (
                i.key_pressed(Key::S),
                i.key_down(Key::Enter),
                i.key_down(Key::R),
                i.key_pressed(Key::Space),
                i.scroll_delta,
            )
        });

        if step || step_held {
            self.ticker.request_step();
        }
        if reset {
            self.clear_grid();
        }
        if toggle {
            self.ticker.toggle_auto();
        }
        if scroll != Vec2::ZERO {
            self.camera.pan(scroll);
        }

        let mut released = false;
        for (key, action) in REPEAT_KEYS {
            let (pressed, down, up) =
                ctx.input(|i| (i.key_pressed(key), i.key_down(key), i.key_released(key)));
            released |= up;

            let rate = match action {
                RepeatAction::Slower | RepeatAction::Faster => self.config.tick_hold_rate,
                RepeatAction::ZoomOut | RepeatAction::ZoomIn => self.config.zoom_hold_rate,
            };
            if !self.repeat.fire(key, pressed, down, now, rate) {
                continue;
            }
            match action {
                RepeatAction::Slower => self.ticker.slower(),
                RepeatAction::Faster => self.ticker.faster(),
                RepeatAction::ZoomOut => self.zoom(canvas.size(), false),
                RepeatAction::ZoomIn => self.zoom(canvas.size(), true),
            }
        }
        if released {
            self.repeat.release();
        }
    }

    fn draw_cells(&self, painter: &Painter, canvas: Rect) {
        let camera = self.camera;
        let cell_size = self.config.cell_size;
        // One pixel of gap between cells at zoom 1.
        let side = Vec2::splat((cell_size - 1.0) * camera.zoom);
        let (live, dead) = (self.cell_color(true), self.cell_color(false));

        self.grid.for_each_cell(|cell, alive| {
            let min = canvas.min + camera.cell_origin(cell, cell_size).to_vec2();
            let rect = Rect::from_min_size(min, side);
            if !canvas.intersects(rect) {
                return;
            }
            let color = if alive { live } else { dead };
            painter.rect_filled(rect, 0.0, color);
        });
    }

    fn draw_overlay(&self, painter: &Painter, canvas: Rect) {
        let font = FontId::proportional(TEXT_SIZE);
        let mut pos = canvas.min;

        painter.text(
            pos,
            Align2::LEFT_TOP,
            format!("Game Tick: {}", self.ticker.ticks_per_second()),
            font.clone(),
            Color32::BLACK,
        );
        pos.y += TEXT_SIZE + 1.0;

        if !self.ticker.is_running() {
            painter.text(pos, Align2::LEFT_TOP, "Paused", font, Color32::BLACK);
        }

        painter.text(
            canvas.left_bottom(),
            Align2::LEFT_BOTTOM,
            format!(
                "Generation: {}   Population: {}",
                self.generation,
                self.grid.population()
            ),
            FontId::proportional(TEXT_SIZE / 2.0),
            Color32::DARK_GRAY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, pos2, vec2};
    use sparse_life::Coord;

    fn new_app() -> (LifeApp, egui::Context) {
        (LifeApp::new(CanvasConfig::default()), egui::Context::default())
    }

    fn run_frame(app: &mut LifeApp, ctx: &egui::Context, time: f64, events: Vec<Event>) {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
            time: Some(time),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.show(ctx));
    }

    fn key(key: Key, pressed: bool) -> Event {
        Event::Key {
            key,
            pressed,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn press(pos: Pos2, button: PointerButton) -> Vec<Event> {
        vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button,
                pressed: true,
                modifiers: Modifiers::NONE,
            },
        ]
    }

    fn paint_blinker(app: &mut LifeApp) {
        for x in 0..3 {
            app.paint_cell(Coord::new(x, 0));
        }
    }

    #[test]
    fn primary_button_paints_cell_under_pointer() {
        let (mut app, ctx) = new_app();
        run_frame(&mut app, &ctx, 1.0, press(pos2(30.0, 5.0), PointerButton::Primary));
        assert!(app.grid.is_alive(Coord::new(1, 0)));
        assert_eq!(app.grid.population(), 1);
    }

    #[test]
    fn dragging_paints_each_cell_once() {
        let (mut app, ctx) = new_app();
        run_frame(&mut app, &ctx, 1.0, press(pos2(5.0, 5.0), PointerButton::Primary));
        run_frame(&mut app, &ctx, 1.01, vec![Event::PointerMoved(pos2(30.0, 5.0))]);
        run_frame(&mut app, &ctx, 1.02, vec![Event::PointerMoved(pos2(6.0, 6.0))]);
        run_frame(&mut app, &ctx, 1.03, vec![]);

        assert_eq!(app.grid.population(), 2);
        assert!(app.grid.is_alive(Coord::new(0, 0)));
        assert!(app.grid.is_alive(Coord::new(1, 0)));
        let below = app.grid.cell(Coord::new(0, 1)).map(|cell| cell.neighbors());
        assert_eq!(below, Some(2));
    }

    #[test]
    fn secondary_button_erases() {
        let (mut app, ctx) = new_app();
        app.paint_cell(Coord::new(0, 0));
        run_frame(&mut app, &ctx, 1.0, press(pos2(5.0, 5.0), PointerButton::Secondary));
        assert!(app.grid.is_empty());
    }

    #[test]
    fn pointer_outside_canvas_is_ignored() {
        let (mut app, ctx) = new_app();
        run_frame(&mut app, &ctx, 1.0, press(pos2(900.0, 700.0), PointerButton::Primary));
        assert!(app.grid.is_empty());
    }

    #[test]
    fn r_clears_grid_and_generation() {
        let (mut app, ctx) = new_app();
        paint_blinker(&mut app);
        app.generation = 5;
        run_frame(&mut app, &ctx, 1.0, vec![key(Key::R, true)]);
        assert!(app.grid.is_empty());
        assert_eq!(app.generation, 0);
    }

    #[test]
    fn space_toggles_auto_run() {
        let (mut app, ctx) = new_app();
        run_frame(&mut app, &ctx, 1.0, vec![key(Key::Space, true)]);
        assert!(app.ticker.is_running());
        run_frame(&mut app, &ctx, 1.1, vec![key(Key::Space, false)]);
        run_frame(&mut app, &ctx, 1.2, vec![key(Key::Space, true)]);
        assert!(!app.ticker.is_running());
    }

    #[test]
    fn s_steps_one_generation() {
        let (mut app, ctx) = new_app();
        paint_blinker(&mut app);
        run_frame(&mut app, &ctx, 1.0, vec![key(Key::S, true)]);
        assert_eq!(app.generation, 1);
        assert!(app.grid.is_alive(Coord::new(1, -1)));

        run_frame(&mut app, &ctx, 2.0, vec![key(Key::S, false)]);
        run_frame(&mut app, &ctx, 3.0, vec![]);
        assert_eq!(app.generation, 1);
    }

    #[test]
    fn held_enter_steps_at_the_tick_rate() {
        let (mut app, ctx) = new_app();
        paint_blinker(&mut app);
        run_frame(&mut app, &ctx, 1.0, vec![key(Key::Enter, true)]);
        assert_eq!(app.generation, 1);

        run_frame(&mut app, &ctx, 1.01, vec![]);
        assert_eq!(app.generation, 1);
        run_frame(&mut app, &ctx, 1.2, vec![]);
        assert_eq!(app.generation, 2);

        run_frame(&mut app, &ctx, 1.4, vec![key(Key::Enter, false)]);
        run_frame(&mut app, &ctx, 1.6, vec![]);
        assert_eq!(app.generation, 2);
        assert!(app.grid.is_alive(Coord::new(0, 0)));
    }

    #[test]
    fn scroll_pans_the_camera() {
        let (mut app, ctx) = new_app();
        run_frame(&mut app, &ctx, 1.0, vec![Event::Scroll(vec2(0.0, 48.0))]);
        assert_eq!(app.camera.offset.x, 0.0);
        assert!(app.camera.offset.y > 0.0, "offset {:?}", app.camera.offset);
    }

    #[test]
    fn speed_and_zoom_keys() {
        let (mut app, ctx) = new_app();
        run_frame(&mut app, &ctx, 1.0, vec![key(Key::ArrowUp, true)]);
        assert_eq!(app.ticker.ticks_per_second(), 25);
        run_frame(&mut app, &ctx, 1.1, vec![key(Key::ArrowUp, false)]);

        run_frame(&mut app, &ctx, 2.0, vec![key(Key::Minus, true)]);
        assert!((app.camera.zoom - 0.75).abs() < 1e-6);
        run_frame(&mut app, &ctx, 2.1, vec![key(Key::Minus, false)]);

        run_frame(&mut app, &ctx, 3.0, vec![key(Key::ArrowDown, true)]);
        assert_eq!(app.ticker.ticks_per_second(), 20);
    }

    #[test]
    fn cell_colors_follow_config() {
        let config = CanvasConfig {
            live_color: [1, 2, 3],
            dead_color: [4, 5, 6],
            ..CanvasConfig::default()
        };
        let app = LifeApp::new(config);
        assert_eq!(app.cell_color(true), Color32::from_rgb(1, 2, 3));
        assert_eq!(app.cell_color(false), Color32::from_rgb(4, 5, 6));
    }
}
