//! Food placement

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{obstacle_collision, self_collision};
use crate::consts::FOOD_SPAWN_ATTEMPTS;
use crate::{GameConfig, Position, random_position};

/// A single piece of food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    width: i32,
    height: i32,
    grid_size: i32,
}

impl Food {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Position::ZERO,
            width: config.width,
            height: config.height,
            grid_size: config.grid_size,
        }
    }

    /// Move to a random free cell.
    ///
    /// Samples up to `FOOD_SPAWN_ATTEMPTS` cells; when none is free the last
    /// sample is used anyway so a crowded board never stalls the game.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        snake_body: &[Position],
        obstacles: &[Position],
    ) {
        let mut candidate = self.position;
        for attempt in 0..FOOD_SPAWN_ATTEMPTS {
            candidate = random_position(rng, self.width, self.height, self.grid_size);
            if !self_collision(candidate, snake_body) && !obstacle_collision(candidate, obstacles)
            {
                self.position = candidate;
                return;
            }
            log::trace!("Food spawn attempt {} hit an occupied cell", attempt + 1);
        }

        log::debug!("No free cell found for food, accepting {candidate}");
        self.position = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_avoids_snake_and_obstacles() {
        let config = GameConfig::from_canvas(60, 20);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut food = Food::new(&config);
        let snake = [IVec2::new(0, 0)];
        let obstacles = [IVec2::new(20, 0)];

        for _ in 0..50 {
            food.spawn(&mut rng, &snake, &obstacles);
            assert_eq!(food.position, IVec2::new(40, 0));
        }
    }

    #[test]
    fn test_spawn_is_grid_aligned_and_in_bounds() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut food = Food::new(&config);
        for _ in 0..200 {
            food.spawn(&mut rng, &[], &[]);
            assert_eq!(food.position.x % config.grid_size, 0);
            assert_eq!(food.position.y % config.grid_size, 0);
            assert!(crate::is_valid_position(
                food.position,
                config.width,
                config.height
            ));
        }
    }

    #[test]
    fn test_full_board_falls_back_to_last_sample() {
        let config = GameConfig::from_canvas(40, 20);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut food = Food::new(&config);
        let snake = [IVec2::new(0, 0), IVec2::new(20, 0)];

        food.spawn(&mut rng, &snake, &[]);
        assert!(snake.contains(&food.position));
    }
}
