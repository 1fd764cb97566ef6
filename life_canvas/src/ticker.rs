// ticker.rs - Decides when a generation is due

use log::debug;

/// Generation clock. Times are seconds since an arbitrary origin.
#[derive(Debug, Clone)]
pub struct TickDriver {
    ticks_per_second: u32,
    min_ticks_per_second: u32,
    tick_step: u32,
    auto_run: bool,
    step_requested: bool,
    last_tick: f64,
}

impl TickDriver {
    pub fn new(ticks_per_second: u32, min_ticks_per_second: u32, tick_step: u32) -> Self {
        let min_ticks_per_second = min_ticks_per_second.max(1);
        Self {
            ticks_per_second: ticks_per_second.max(min_ticks_per_second),
            min_ticks_per_second,
            tick_step,
            auto_run: false,
            step_requested: false,
            last_tick: 0.0,
        }
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    pub fn is_running(&self) -> bool {
        self.auto_run
    }

    pub fn toggle_auto(&mut self) {
        self.auto_run = !self.auto_run;
        debug!("auto run {}", if self.auto_run { "on" } else { "paused" });
    }

    /// Queues one generation for the next due tick.
    pub fn request_step(&mut self) {
        self.step_requested = true;
    }

    pub fn faster(&mut self) {
        self.ticks_per_second = self.ticks_per_second.saturating_add(self.tick_step);
        debug!("tick rate {}", self.ticks_per_second);
    }

    pub fn slower(&mut self) {
        self.ticks_per_second = self
            .ticks_per_second
            .saturating_sub(self.tick_step)
            .max(self.min_ticks_per_second);
        debug!("tick rate {}", self.ticks_per_second);
    }

    /// Returns true when the caller should advance exactly one generation.
    pub fn poll(&mut self, now: f64) -> bool {
        if now - self.last_tick <= 1.0 / f64::from(self.ticks_per_second) {
            return false;
        }
        self.last_tick = now;
        if self.auto_run || self.step_requested {
            self.step_requested = false;
            return true;
        }
        false
    }
}
