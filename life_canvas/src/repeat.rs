// repeat.rs - Hold-to-repeat for the speed and zoom keys

/// One repeat state shared by every repeatable key: the most recently pressed
/// key owns the initial delay, and all of them share the fire throttle.
#[derive(Debug, Clone)]
pub struct KeyRepeat<K> {
    delay: f64,
    held: Option<K>,
    held_since: f64,
    last_fire: f64,
}

impl<K: Copy + PartialEq> KeyRepeat<K> {
    pub fn new(delay: f64) -> Self {
        Self {
            delay,
            held: None,
            held_since: 0.0,
            last_fire: f64::NEG_INFINITY,
        }
    }

    /// Whether `key`'s action should fire this frame. `rate` is fires per
    /// second once the key has been held longer than the delay.
    pub fn fire(&mut self, key: K, pressed: bool, down: bool, now: f64, rate: f64) -> bool {
        let repeating = down && self.held.is_some() && now - self.held_since > self.delay;
        if !(pressed || repeating) {
            return false;
        }
        if self.held != Some(key) {
            self.held = Some(key);
            self.held_since = now;
        }
        if now - self.last_fire > 1.0 / rate {
            self.last_fire = now;
            return true;
        }
        false
    }

    /// Call when any repeatable key is released.
    pub fn release(&mut self) {
        self.held = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Key {
        Up,
        Down,
    }

    #[test]
    fn press_fires_immediately() {
        let mut repeat = KeyRepeat::new(0.5);
        assert!(repeat.fire(Key::Up, true, true, 10.0, 60.0));
    }

    #[test]
    fn holding_waits_for_the_delay() {
        let mut repeat = KeyRepeat::new(0.5);
        assert!(repeat.fire(Key::Up, true, true, 10.0, 60.0));
        assert!(!repeat.fire(Key::Up, false, true, 10.2, 60.0));
        assert!(!repeat.fire(Key::Up, false, true, 10.5, 60.0));
        assert!(repeat.fire(Key::Up, false, true, 10.6, 60.0));
    }

    #[test]
    fn held_repeats_are_throttled() {
        let mut repeat = KeyRepeat::new(0.5);
        repeat.fire(Key::Up, true, true, 0.0, 10.0);

        // Held for two seconds at 100 frames per second.
        let fired = (60..=200)
            .filter(|frame| repeat.fire(Key::Up, false, true, *frame as f64 / 100.0, 10.0))
            .count();
        assert!((13..=15).contains(&fired), "fired {fired} times");
    }

    #[test]
    fn release_stops_repeating() {
        let mut repeat = KeyRepeat::new(0.5);
        repeat.fire(Key::Up, true, true, 0.0, 60.0);
        repeat.release();
        assert!(!repeat.fire(Key::Up, false, true, 1.0, 60.0));
    }

    #[test]
    fn switching_keys_restarts_the_delay() {
        let mut repeat = KeyRepeat::new(0.5);
        repeat.fire(Key::Up, true, true, 0.0, 60.0);
        assert!(repeat.fire(Key::Down, true, true, 1.0, 60.0));
        assert!(!repeat.fire(Key::Down, false, true, 1.3, 60.0));
        assert!(repeat.fire(Key::Down, false, true, 1.6, 60.0));
    }
}
