//! Keyboard and swipe input
//!
//! Raw events go in, a single direction callback comes out. The browser
//! wiring lives in the entry point; this type only interprets events.

use glam::Vec2;

use crate::Direction;
use crate::settings::DEFAULT_SENSITIVITY;

type DirectionCallback = Box<dyn FnMut(Direction)>;

pub struct InputManager {
    callback: Option<DirectionCallback>,
    touch_start: Vec2,
    /// Minimum swipe distance in pixels
    swipe_threshold: f32,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            callback: None,
            touch_start: Vec2::ZERO,
            swipe_threshold: DEFAULT_SENSITIVITY as f32,
        }
    }

    /// Register the direction callback, replacing any previous one
    pub fn on_direction<F>(&mut self, callback: F)
    where
        F: FnMut(Direction) + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Set the swipe threshold in pixels
    pub fn set_sensitivity(&mut self, value: u32) {
        self.swipe_threshold = value as f32;
    }

    pub fn sensitivity(&self) -> u32 {
        self.swipe_threshold as u32
    }

    /// Map a `KeyboardEvent.key` value to a direction
    pub fn key_direction(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Handle a key press. Returns the direction emitted, if any.
    pub fn handle_key(&mut self, key: &str) -> Option<Direction> {
        let dir = Self::key_direction(key)?;
        self.emit(dir);
        Some(dir)
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.touch_start = Vec2::new(x, y);
    }

    /// Finish a swipe. Short swipes are ignored; otherwise the longer axis
    /// wins, with ties going vertical.
    pub fn touch_end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let diff = Vec2::new(x, y) - self.touch_start;
        let threshold = self.swipe_threshold;
        if diff.x.abs() < threshold && diff.y.abs() < threshold {
            return None;
        }

        let dir = if diff.x.abs() > diff.y.abs() {
            if diff.x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if diff.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        self.emit(dir);
        Some(dir)
    }

    fn emit(&mut self, dir: Direction) {
        if let Some(callback) = self.callback.as_mut() {
            callback(dir);
        }
    }
}
