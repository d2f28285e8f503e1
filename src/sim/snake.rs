//! The player's snake

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Direction, Position};

/// A snake made of grid-aligned segments.
///
/// `body[0]` is the head and the last element is the tail. Consecutive
/// segments are exactly one cell apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Segments, head first (never empty)
    pub body: Vec<Position>,
    /// Direction applied on the last move
    pub direction: Direction,
    /// Buffered input, applied on the next move
    pub next_direction: Direction,
    /// Tick interval in ms (lower is faster)
    pub speed: u32,
    /// Pixel size of one cell
    pub grid_size: i32,
    growing: bool,
    boosting: bool,
    /// Speed to restore when boost ends
    base_speed: Option<u32>,
}

impl Snake {
    /// Lay out `length` segments horizontally, head at `start`, facing right
    pub fn new(start: Position, length: usize, grid_size: i32) -> Self {
        let length = length.max(1);
        let body = (0..length)
            .map(|i| Position::new(start.x - i as i32 * grid_size, start.y))
            .collect();
        Self {
            body,
            direction: Direction::Right,
            next_direction: Direction::Right,
            speed: INITIAL_SPEED,
            grid_size,
            growing: false,
            boosting: false,
            base_speed: None,
        }
    }

    #[inline]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments behind the head
    pub fn trunk(&self) -> &[Position] {
        &self.body[1..]
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    /// Queue a turn. Reversing onto the applied direction is ignored; the
    /// last accepted call before a move wins.
    pub fn set_direction(&mut self, dir: Direction) {
        if !self.direction.is_opposite(dir) {
            self.next_direction = dir;
        }
    }

    /// Advance one cell in the buffered direction
    pub fn advance(&mut self) {
        self.direction = self.next_direction;
        let new_head = self.head() + self.direction.delta() * self.grid_size;
        self.body.insert(0, new_head);

        if self.growing {
            self.growing = false;
        } else {
            self.body.pop();
        }
    }

    /// Keep the tail on the next move. Repeated calls before that move
    /// still add a single segment.
    pub fn grow(&mut self) {
        self.growing = true;
    }

    pub fn activate_boost(&mut self) {
        if self.boosting {
            return;
        }
        self.base_speed = Some(self.speed);
        let boosted = (self.speed as f64 * BOOST_SPEED_MULTIPLIER).floor() as u32;
        self.speed = boosted.max(MIN_SPEED);
        self.boosting = true;
    }

    pub fn deactivate_boost(&mut self) {
        if !self.boosting {
            return;
        }
        self.speed = self.base_speed.unwrap_or(INITIAL_SPEED);
        self.boosting = false;
    }

    /// Shorten the tick interval by `decrement`, floored at `MIN_SPEED`.
    /// While boosting the speed restored on release drops too.
    pub fn quicken(&mut self, decrement: u32) {
        let lower = |speed: u32| {
            if speed > MIN_SPEED {
                speed.saturating_sub(decrement).max(MIN_SPEED)
            } else {
                speed
            }
        };
        self.speed = lower(self.speed);
        if self.boosting {
            self.base_speed = self.base_speed.map(lower);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn snake() -> Snake {
        Snake::new(IVec2::new(200, 300), 3, GRID_SIZE)
    }

    #[test]
    fn test_initial_layout() {
        let snake = snake();
        assert_eq!(
            snake.body,
            vec![
                IVec2::new(200, 300),
                IVec2::new(180, 300),
                IVec2::new(160, 300)
            ]
        );
        assert_eq!(snake.head(), IVec2::new(200, 300));
        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(snake.speed, INITIAL_SPEED);
    }

    #[test]
    fn test_move_keeps_length() {
        let mut snake = snake();
        snake.advance();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), IVec2::new(220, 300));
        assert_eq!(*snake.body.last().unwrap(), IVec2::new(180, 300));
    }

    #[test]
    fn test_grow_adds_exactly_one_segment() {
        let mut snake = snake();
        snake.grow();
        snake.grow();
        snake.advance();
        assert_eq!(snake.len(), 4);
        assert!(!snake.is_growing());
        snake.advance();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_reverse_is_rejected() {
        let mut snake = snake();
        snake.set_direction(Direction::Left);
        assert_eq!(snake.next_direction, Direction::Right);

        snake.set_direction(Direction::Up);
        assert_eq!(snake.next_direction, Direction::Up);
    }

    #[test]
    fn test_reverse_checked_against_applied_direction() {
        let mut snake = snake();
        // Up is buffered but Right is still applied, so Left stays illegal
        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.next_direction, Direction::Up);

        // Down is perpendicular to the applied direction and overwrites the buffer
        snake.set_direction(Direction::Down);
        assert_eq!(snake.next_direction, Direction::Down);

        snake.advance();
        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.head(), IVec2::new(200, 320));
    }

    #[test]
    fn test_segments_stay_adjacent() {
        let mut snake = snake();
        for dir in [Direction::Up, Direction::Left, Direction::Up, Direction::Right] {
            snake.set_direction(dir);
            snake.advance();
            for pair in snake.body.windows(2) {
                let d = (pair[0] - pair[1]).abs();
                assert_eq!(d.x + d.y, GRID_SIZE);
            }
        }
    }

    #[test]
    fn test_boost_halves_and_restores_speed() {
        let mut snake = snake();
        snake.activate_boost();
        assert!(snake.is_boosting());
        assert_eq!(snake.speed, 75);

        // Idempotent
        snake.activate_boost();
        assert_eq!(snake.speed, 75);

        snake.deactivate_boost();
        assert!(!snake.is_boosting());
        assert_eq!(snake.speed, INITIAL_SPEED);
    }

    #[test]
    fn test_boost_floors_at_min_speed() {
        let mut snake = snake();
        snake.speed = 60;
        snake.activate_boost();
        assert_eq!(snake.speed, MIN_SPEED);
        snake.deactivate_boost();
        assert_eq!(snake.speed, 60);
    }

    #[test]
    fn test_deactivate_without_boost_is_noop() {
        let mut snake = snake();
        snake.speed = 120;
        snake.deactivate_boost();
        assert_eq!(snake.speed, 120);
    }

    #[test]
    fn test_quicken_while_boosting_lowers_restored_speed() {
        let mut snake = snake();
        snake.activate_boost();
        snake.quicken(2);
        assert_eq!(snake.speed, 73);
        snake.deactivate_boost();
        assert_eq!(snake.speed, 148);
    }

    #[test]
    fn test_quicken_respects_floor() {
        let mut snake = snake();
        snake.speed = MIN_SPEED + 1;
        snake.quicken(2);
        assert_eq!(snake.speed, MIN_SPEED);
        snake.speed = 40;
        snake.quicken(2);
        assert_eq!(snake.speed, 40);
    }
}
