use crate::level::Level;
use crate::math::polygon_2d::{classify_loop, point_in_polygon, Winding};
use crate::math::Point2;

/// Positions of the walls of a loop, in chain order.
#[must_use]
pub fn loop_points(level: &Level, walls: &[usize]) -> Vec<Point2> {
    walls.iter().map(|&w| level.walls()[w].pos).collect()
}

/// Orientation of a wall loop.
///
/// Door-style overlaps and backtracking wall pairs are stripped first;
/// they are common in hand-edited maps and would otherwise confuse the
/// corner test.
#[must_use]
pub fn loop_winding(level: &Level, walls: &[usize]) -> Winding {
    classify_loop(&loop_points(level, walls))
}

/// Whether any vertex of `check` lies inside the polygon traced by `container`.
///
/// One vertex inside is taken as proof of nesting.
#[must_use]
pub fn loop_inside(level: &Level, check: &[usize], container: &[usize]) -> bool {
    check.iter().any(|&w| {
        let pt = level.walls()[w].pos;
        point_in_polygon(&pt, container.iter().map(|&c| level.wall_segment(c)))
    })
}
