//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Discrete steps gated by the snake's tick interval
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the draw/sound traits

pub mod collision;
pub mod engine;
pub mod food;
pub mod obstacles;
pub mod snake;
pub mod state;

pub use collision::{CollisionReport, Rect, check_all};
pub use engine::{GameContext, GameEngine};
pub use food::Food;
pub use obstacles::{ObstacleManager, obstacle_count};
pub use snake::Snake;
pub use state::{GamePhase, StateManager, Subscription};
