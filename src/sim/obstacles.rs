//! Per-level obstacle layout

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::OBSTACLES_PER_LEVEL;
use crate::{GameConfig, Position, random_position};

/// Number of obstacles on a level. Level 1 has none.
pub fn obstacle_count(level: u32) -> usize {
    (level.saturating_sub(1) * OBSTACLES_PER_LEVEL) as usize
}

/// Owns the obstacle cells for the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleManager {
    obstacles: Vec<Position>,
    width: i32,
    height: i32,
    grid_size: i32,
}

impl ObstacleManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            obstacles: Vec::new(),
            width: config.width,
            height: config.height,
            grid_size: config.grid_size,
        }
    }

    /// Replace the layout with `obstacle_count(level)` random cells.
    ///
    /// Cells may overlap each other or the snake's start.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, level: u32) {
        let count = obstacle_count(level);
        self.obstacles = (0..count)
            .map(|_| random_position(rng, self.width, self.height, self.grid_size))
            .collect();
        log::debug!("Generated {} obstacles for level {}", count, level);
    }

    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }
}
