//! Rendering module
//!
//! The board is drawn as filled rectangles onto any [`DrawSurface`]. The
//! browser build paints onto a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::sim::GameEngine;

/// Something that can fill axis-aligned rectangles
pub trait DrawSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: &str = "#172210";
    pub const FOOD: &str = "#ff0055";
    pub const OBSTACLE: &str = "#ffffff";
    pub const SNAKE_HEAD: &str = "#7bf425";
    pub const SNAKE_BODY: &str = "#5ec315";
}

/// Draw background, food, obstacles, then the snake tail-to-head so the
/// head ends up on top
pub fn render_scene(engine: &GameEngine, surface: &mut dyn DrawSurface) {
    let config = engine.config();
    let cell = config.grid_size as f64;

    surface.fill_rect(
        0.0,
        0.0,
        config.width as f64,
        config.height as f64,
        colors::BACKGROUND,
    );

    // Food and segments leave a 1px gap so adjacent cells read separately
    let food = engine.food().position;
    surface.fill_rect(food.x as f64, food.y as f64, cell - 1.0, cell - 1.0, colors::FOOD);

    for obstacle in engine.obstacles() {
        surface.fill_rect(obstacle.x as f64, obstacle.y as f64, cell, cell, colors::OBSTACLE);
    }

    for (i, segment) in engine.snake().body.iter().enumerate().rev() {
        let color = if i == 0 {
            colors::SNAKE_HEAD
        } else {
            colors::SNAKE_BODY
        };
        surface.fill_rect(segment.x as f64, segment.y as f64, cell - 1.0, cell - 1.0, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentPlayer;
    use crate::persistence::StorageManager;
    use crate::platform::MemoryStorage;
    use crate::sim::{GameContext, StateManager};
    use crate::{GameConfig, ScoreManager};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::rc::Rc;

    /// Records fills as (x, y, w, color)
    #[derive(Default)]
    struct Recording(Vec<(f64, f64, f64, String)>);

    impl DrawSurface for Recording {
        fn fill_rect(&mut self, x: f64, y: f64, width: f64, _height: f64, color: &str) {
            self.0.push((x, y, width, color.to_string()));
        }
    }

    fn engine() -> GameEngine {
        let storage = StorageManager::new(Rc::new(MemoryStorage::new()));
        let ctx = GameContext::new(
            StateManager::new(),
            ScoreManager::new(storage),
            Box::new(SilentPlayer::new()),
        );
        GameEngine::new(GameConfig::default(), ctx, 1)
    }

    #[test]
    fn test_draw_order() {
        let mut engine = engine();
        let mut rng = Pcg32::seed_from_u64(2);
        engine.obstacle_manager_mut().generate(&mut rng, 2);

        let mut surface = Recording::default();
        engine.render(&mut surface);
        let colors: Vec<&str> = surface.0.iter().map(|c| c.3.as_str()).collect();

        assert_eq!(
            colors,
            vec![
                colors::BACKGROUND,
                colors::FOOD,
                colors::OBSTACLE,
                colors::OBSTACLE,
                colors::OBSTACLE,
                colors::SNAKE_BODY,
                colors::SNAKE_BODY,
                colors::SNAKE_HEAD,
            ]
        );
        assert_eq!(surface.0[0].2, 400.0);
    }

    #[test]
    fn test_head_drawn_last_at_head_position() {
        let engine = engine();
        let mut surface = Recording::default();
        render_scene(&engine, &mut surface);

        let (x, y, w, _) = surface.0.last().unwrap().clone();
        let head = engine.snake().head();
        assert_eq!((x, y), (head.x as f64, head.y as f64));
        assert_eq!(w, 19.0);
    }
}
