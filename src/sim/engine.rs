//! Game orchestration and the fixed-interval tick
//!
//! The engine owns the entities and drives them one discrete step at a time.
//! Phase, score and sound are reached through [`GameContext`], which the
//! entry point builds and hands over at construction.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{self, CollisionReport};
use super::food::Food;
use super::obstacles::ObstacleManager;
use super::snake::Snake;
use super::state::{GamePhase, StateManager};
use crate::audio::{SoundEffect, SoundPlayer};
use crate::consts::*;
use crate::renderer::{DrawSurface, render_scene};
use crate::score::ScoreManager;
use crate::{Direction, GameConfig, Position};

/// Collaborators the engine reports to
pub struct GameContext {
    pub state: StateManager,
    pub score: ScoreManager,
    pub audio: Box<dyn SoundPlayer>,
}

impl GameContext {
    pub fn new(state: StateManager, score: ScoreManager, audio: Box<dyn SoundPlayer>) -> Self {
        Self {
            state,
            score,
            audio,
        }
    }
}

pub struct GameEngine {
    config: GameConfig,
    ctx: GameContext,
    rng: Pcg32,
    snake: Snake,
    food: Food,
    obstacles: ObstacleManager,
    level: u32,
    /// Milliseconds accumulated toward the next move
    time_since_last_move: f64,
    /// Tick interval scale applied on init (higher = slower)
    difficulty_multiplier: f64,
}

impl GameEngine {
    /// Create an engine in the Idle phase with a fresh board
    pub fn new(config: GameConfig, ctx: GameContext, seed: u64) -> Self {
        let mut engine = Self {
            config,
            ctx,
            rng: Pcg32::seed_from_u64(seed),
            snake: Snake::new(config.center(), config.initial_length, config.grid_size),
            food: Food::new(&config),
            obstacles: ObstacleManager::new(&config),
            level: 1,
            time_since_last_move: 0.0,
            difficulty_multiplier: 1.0,
        };
        engine.init();
        engine
    }

    /// Reset every entity, the level and the score; phase goes to Idle
    pub fn init(&mut self) {
        let config = self.config;
        self.snake = Snake::new(config.center(), config.initial_length, config.grid_size);
        self.food = Food::new(&config);
        self.obstacles = ObstacleManager::new(&config);

        self.level = 1;
        self.time_since_last_move = 0.0;
        self.ctx.score.reset();

        self.snake.speed = (self.snake.speed as f64 * self.difficulty_multiplier).floor() as u32;

        self.obstacles.generate(&mut self.rng, self.level);
        self.food
            .spawn(&mut self.rng, &self.snake.body, self.obstacles.obstacles());

        self.ctx.state.set_state(GamePhase::Idle);
    }

    /// Takes effect on the next `init`/`start`
    pub fn set_difficulty(&mut self, multiplier: f64) {
        self.difficulty_multiplier = multiplier;
    }

    pub fn start(&mut self) {
        self.init();
        self.ctx.state.set_state(GamePhase::Playing);
        self.ctx.audio.play(SoundEffect::Move);
        log::info!(
            "Game started (speed {} ms, food at {})",
            self.snake.speed,
            self.food.position
        );
    }

    /// Toggle between Playing and Paused; ignored in other phases
    pub fn pause(&mut self) {
        match self.ctx.state.current() {
            GamePhase::Playing => {
                self.ctx.state.set_state(GamePhase::Paused);
            }
            GamePhase::Paused => {
                self.ctx.state.set_state(GamePhase::Playing);
            }
            _ => {}
        }
    }

    /// Back to the title screen. Entities are left as they are.
    pub fn go_home(&mut self) {
        self.ctx.state.set_state(GamePhase::Idle);
    }

    /// End the run. Entities are kept so the final board can still be read.
    pub fn game_over(&mut self) {
        self.ctx.state.set_state(GamePhase::GameOver);
        self.ctx.audio.play(SoundEffect::Crash);
        log::info!(
            "Game over at level {} with score {}",
            self.level,
            self.ctx.score.current_score()
        );
    }

    /// Advance the clock by `delta_ms`. At most one step runs per call, so a
    /// long frame slows the game instead of jumping several cells.
    pub fn update(&mut self, delta_ms: f64) {
        if self.ctx.state.current() != GamePhase::Playing {
            return;
        }

        self.time_since_last_move += delta_ms;
        if self.time_since_last_move >= self.snake.speed as f64 {
            self.time_since_last_move = 0.0;
            self.step();
        }
    }

    /// One discrete simulation step
    pub fn step(&mut self) {
        self.snake.advance();
        self.check_collisions();
    }

    /// Resolve the snake head against hazards and food.
    ///
    /// Returns the fatal-collision report; food is only checked when it is clear.
    pub fn check_collisions(&mut self) -> CollisionReport {
        let head = self.snake.head();
        let report = collision::check_all(
            head,
            self.snake.trunk(),
            self.obstacles.obstacles(),
            self.config.width,
            self.config.height,
        );

        if report.any() {
            log::debug!("Fatal collision at {}: {:?}", head, report);
            self.game_over();
            return report;
        }

        if collision::food_collision(head, self.food.position) {
            self.handle_food_eaten();
        }
        report
    }

    fn handle_food_eaten(&mut self) {
        self.ctx.score.add_points(FOOD_POINTS);
        self.snake.grow();
        self.ctx.audio.play(SoundEffect::Eat);

        let score = self.ctx.score.current_score();
        if score > 0 && score % LEVEL_SCORE_THRESHOLD == 0 {
            self.increase_level();
        }

        self.food
            .spawn(&mut self.rng, &self.snake.body, self.obstacles.obstacles());
    }

    // Obstacles keep their layout until the next init
    fn increase_level(&mut self) {
        self.level += 1;
        self.snake.quicken(SPEED_DECREMENT);
        self.ctx.audio.play(SoundEffect::LevelUp);
        log::info!("Level {} (speed {} ms)", self.level, self.snake.speed);
    }

    /// Queue a turn; only accepted while playing
    pub fn handle_direction(&mut self, dir: Direction) {
        if self.ctx.state.current() == GamePhase::Playing {
            self.snake.set_direction(dir);
        }
    }

    pub fn activate_boost(&mut self) {
        if self.ctx.state.current() == GamePhase::Playing {
            self.snake.activate_boost();
        }
    }

    pub fn deactivate_boost(&mut self) {
        self.snake.deactivate_boost();
    }

    /// Draw the current board. Does not touch game state.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        render_scene(self, surface);
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.ctx.state.current()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn obstacles(&self) -> &[Position] {
        self.obstacles.obstacles()
    }

    pub fn obstacle_manager_mut(&mut self) -> &mut ObstacleManager {
        &mut self.obstacles
    }

    pub fn score(&self) -> &ScoreManager {
        &self.ctx.score
    }

    pub fn score_mut(&mut self) -> &mut ScoreManager {
        &mut self.ctx.score
    }

    pub fn state_mut(&mut self) -> &mut StateManager {
        &mut self.ctx.state
    }

    pub fn audio_mut(&mut self) -> &mut dyn SoundPlayer {
        self.ctx.audio.as_mut()
    }
}
