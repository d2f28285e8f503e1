//! Snake Reborn - A grid-based arcade snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake, food, obstacles, collisions, engine)
//! - `renderer`: Draw order over an abstract 2D surface
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `persistence`: High score and settings storage
//! - `audio`: Sound playback and haptics

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;

pub use score::ScoreManager;
pub use settings::{Difficulty, Settings, Theme};

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Pixel size of one grid cell
    pub const GRID_SIZE: i32 = 20;
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: i32 = 400;
    pub const CANVAS_HEIGHT: i32 = 600;

    /// Tick interval in ms (lower is faster)
    pub const INITIAL_SPEED: u32 = 150;
    pub const MIN_SPEED: u32 = 50;
    /// Tick interval reduction per level
    pub const SPEED_DECREMENT: u32 = 2;
    /// Boost halves the tick interval
    pub const BOOST_SPEED_MULTIPLIER: f64 = 0.5;

    pub const INITIAL_SNAKE_LENGTH: usize = 3;

    /// Points per food eaten
    pub const FOOD_POINTS: u64 = 10;
    /// Level advances each time the score hits a multiple of this
    pub const LEVEL_SCORE_THRESHOLD: u64 = 50;
    /// Obstacles added per level past the first
    pub const OBSTACLES_PER_LEVEL: u32 = 3;
    /// Random placement attempts before food accepts any cell
    pub const FOOD_SPAWN_ATTEMPTS: u32 = 100;
}

/// A grid-aligned pixel coordinate. Always a multiple of the grid size.
pub type Position = IVec2;

/// Movement direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this direction (screen coordinates, y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Arena dimensions the simulation runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Canvas width in pixels
    pub width: i32,
    /// Canvas height in pixels
    pub height: i32,
    /// Pixel size of one cell
    pub grid_size: i32,
    /// Snake length at game start
    pub initial_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: consts::CANVAS_WIDTH,
            height: consts::CANVAS_HEIGHT,
            grid_size: consts::GRID_SIZE,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
        }
    }
}

impl GameConfig {
    /// Configuration for an arbitrary canvas size
    pub fn from_canvas(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Number of whole cells along each axis
    pub fn cells(&self) -> IVec2 {
        IVec2::new(self.width / self.grid_size, self.height / self.grid_size)
    }

    /// Canvas center snapped down to the grid
    pub fn center(&self) -> Position {
        let cells = self.cells();
        IVec2::new(cells.x / 2, cells.y / 2) * self.grid_size
    }
}

/// Random grid-aligned position inside `[0, width) x [0, height)`
pub fn random_position<R: Rng + ?Sized>(
    rng: &mut R,
    width: i32,
    height: i32,
    grid_size: i32,
) -> Position {
    let cols = (width / grid_size).max(1);
    let rows = (height / grid_size).max(1);
    IVec2::new(
        rng.random_range(0..cols) * grid_size,
        rng.random_range(0..rows) * grid_size,
    )
}

/// Whether a position lies within the canvas bounds
#[inline]
pub fn is_valid_position(pos: Position, width: i32, height: i32) -> bool {
    pos.x >= 0 && pos.x < width && pos.y >= 0 && pos.y < height
}
