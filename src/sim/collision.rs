//! Collision detection over grid positions
//!
//! Every check is an exact integer comparison: positions are grid-aligned, so
//! there is no overlap tolerance. Body and obstacle checks are linear scans,
//! which is fine for arenas of a few hundred cells.

use glam::IVec2;

use crate::Position;

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }
}

/// Which hazards the head hit this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub wall: bool,
    pub self_hit: bool,
    pub obstacle: bool,
}

impl CollisionReport {
    /// Any fatal collision
    pub fn any(&self) -> bool {
        self.wall || self.self_hit || self.obstacle
    }
}

#[inline]
pub fn points_collide(a: Position, b: Position) -> bool {
    a == b
}

/// Half-open containment: `x0 <= px < x0 + w`, same for y
pub fn point_in_rect(point: Position, rect: &Rect) -> bool {
    point.x >= rect.origin.x
        && point.x < rect.origin.x + rect.size.x
        && point.y >= rect.origin.y
        && point.y < rect.origin.y + rect.size.y
}

/// True if the head has left `[0, width) x [0, height)`
pub fn wall_collision(head: Position, width: i32, height: i32) -> bool {
    head.x < 0 || head.y < 0 || head.x >= width || head.y >= height
}

/// True if the head lands on any segment of `body`.
///
/// The caller excludes the head itself from `body`.
pub fn self_collision(head: Position, body: &[Position]) -> bool {
    body.iter().any(|&segment| points_collide(head, segment))
}

#[inline]
pub fn food_collision(head: Position, food: Position) -> bool {
    points_collide(head, food)
}

pub fn obstacle_collision(head: Position, obstacles: &[Position]) -> bool {
    obstacles.iter().any(|&cell| points_collide(head, cell))
}

/// Run every fatal check independently so callers can tell causes apart
pub fn check_all(
    head: Position,
    body: &[Position],
    obstacles: &[Position],
    width: i32,
    height: i32,
) -> CollisionReport {
    CollisionReport {
        wall: wall_collision(head, width, height),
        self_hit: self_collision(head, body),
        obstacle: obstacle_collision(head, obstacles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: i32, y: i32) -> Position {
        IVec2::new(x, y)
    }

    #[test]
    fn test_points_collide_is_exact() {
        assert!(points_collide(p(20, 40), p(20, 40)));
        assert!(!points_collide(p(20, 40), p(21, 40)));
    }

    #[test]
    fn test_point_in_rect_half_open() {
        let rect = Rect::new(20, 20, 40, 40);
        assert!(point_in_rect(p(20, 20), &rect));
        assert!(point_in_rect(p(59, 59), &rect));
        assert!(!point_in_rect(p(60, 20), &rect));
        assert!(!point_in_rect(p(20, 60), &rect));
        assert!(!point_in_rect(p(19, 30), &rect));
    }

    #[test]
    fn test_wall_collision_corners_inside() {
        for corner in [p(0, 0), p(380, 0), p(0, 580), p(380, 580)] {
            assert!(!wall_collision(corner, 400, 600), "{corner:?}");
        }
        assert!(wall_collision(p(-1, 100), 400, 600));
        assert!(wall_collision(p(100, -20), 400, 600));
        assert!(wall_collision(p(400, 100), 400, 600));
        assert!(wall_collision(p(100, 600), 400, 600));
    }

    #[test]
    fn test_self_collision_uses_supplied_slice() {
        let body = [p(100, 100), p(80, 100), p(60, 100)];
        // Head is body[0]; comparing against the full body always hits
        assert!(self_collision(body[0], &body));
        assert!(!self_collision(body[0], &body[1..]));
        assert!(self_collision(p(60, 100), &body[1..]));
    }

    #[test]
    fn test_obstacle_and_food() {
        let obstacles = [p(0, 0), p(40, 40)];
        assert!(obstacle_collision(p(40, 40), &obstacles));
        assert!(!obstacle_collision(p(20, 40), &obstacles));
        assert!(!obstacle_collision(p(20, 40), &[]));
        assert!(food_collision(p(60, 60), p(60, 60)));
    }

    #[test]
    fn test_check_all_reports_causes_independently() {
        let report = check_all(p(-20, 0), &[p(-20, 0)], &[p(-20, 0)], 400, 600);
        assert!(report.wall && report.self_hit && report.obstacle);

        let report = check_all(p(20, 0), &[p(0, 0)], &[p(20, 0)], 400, 600);
        assert_eq!(
            report,
            CollisionReport {
                wall: false,
                self_hit: false,
                obstacle: true
            }
        );
        assert!(report.any());
        assert!(!CollisionReport::default().any());
    }

    proptest! {
        #[test]
        fn wall_collision_matches_bounds(x in -100i32..500, y in -100i32..700) {
            let expected = x < 0 || y < 0 || x >= 400 || y >= 600;
            prop_assert_eq!(wall_collision(p(x, y), 400, 600), expected);
        }
    }
}
