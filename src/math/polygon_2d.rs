use super::{cross, widen, Point2};

/// Orientation of a closed loop.
///
/// Outer boundaries wind positively, holes negatively. A loop whose extreme
/// corner has no turn at all is `Indeterminate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winding {
    /// Solid boundary, sign `+1`.
    Outer,
    /// Hole boundary, sign `-1`.
    Hole,
    /// Zero turn at the extreme vertex, sign `0`.
    Indeterminate,
}

impl Winding {
    /// Maps the sign of a cross product to a winding.
    #[must_use]
    pub fn from_sign(value: i128) -> Self {
        match value.signum() {
            1 => Self::Outer,
            -1 => Self::Hole,
            _ => Self::Indeterminate,
        }
    }

    /// Returns `+1`, `-1` or `0`.
    #[must_use]
    pub fn sign(self) -> i32 {
        match self {
            Self::Outer => 1,
            Self::Hole => -1,
            Self::Indeterminate => 0,
        }
    }
}

/// Removes zero-area spikes and backtracking vertices from a closed loop.
///
/// A vertex is dropped when its two neighbours coincide (the vertex and the
/// following one form a spike and both go), or when it sits on an axis-aligned
/// line with both neighbours on the same side of it. After every removal the
/// scan steps back one vertex so newly adjacent points are checked again.
///
/// Loops reduced below three vertices are left as they are.
pub fn strip_loop(points: &mut Vec<Point2>) {
    let mut p = 0;
    while p < points.len() {
        let n = points.len();
        if n < 3 {
            return;
        }
        let prev = if p == 0 { n - 1 } else { p - 1 };
        let next = if p == n - 1 { 0 } else { p + 1 };
        let (a, b, c) = (points[prev], points[p], points[next]);

        if a == c {
            if next == 0 {
                points.remove(0);
                points.pop();
                p = points.len().saturating_sub(1);
            } else {
                points.drain(p..=next);
                p = p.saturating_sub(1);
            }
        } else if backtracks(&a, &b, &c) {
            points.remove(p);
            p = p.saturating_sub(1);
        } else {
            p += 1;
        }
    }
}

/// Both neighbours leave `b` in the same axis-aligned direction.
fn backtracks(a: &Point2, b: &Point2, c: &Point2) -> bool {
    (a.x == b.x && c.x == b.x && c.y.cmp(&b.y) == a.y.cmp(&b.y))
        || (a.y == b.y && c.y == b.y && c.x.cmp(&b.x) == a.x.cmp(&b.x))
}

/// Index of the vertex with minimum y, ties broken by maximum x.
#[must_use]
pub fn extreme_vertex(points: &[Point2]) -> Option<usize> {
    let first = points.first()?;
    let (mut best, mut best_x, mut best_y) = (0, first.x, first.y);
    for (i, pt) in points.iter().enumerate().skip(1) {
        if pt.y < best_y || (pt.y == best_y && pt.x > best_x) {
            best = i;
            best_x = pt.x;
            best_y = pt.y;
        }
    }
    Some(best)
}

/// Orientation of an already stripped loop, read off its extreme corner.
///
/// The extreme vertex of a simple polygon is always convex, so the turn
/// between its two edges has the sign of the whole loop.
#[must_use]
pub fn winding_order(points: &[Point2]) -> Winding {
    let n = points.len();
    if n < 3 {
        return Winding::Indeterminate;
    }
    let Some(m) = extreme_vertex(points) else {
        return Winding::Indeterminate;
    };
    let a = widen(&points[(m + n - 1) % n]);
    let b = widen(&points[m]);
    let c = widen(&points[(m + 1) % n]);
    Winding::from_sign(cross(&(b - a), &(c - b)))
}

/// Strips a copy of `points` and classifies it.
#[must_use]
pub fn classify_loop(points: &[Point2]) -> Winding {
    let mut stripped = points.to_vec();
    strip_loop(&mut stripped);
    winding_order(&stripped)
}

/// Even-odd ray crossing test of `pt` against a set of directed edges.
///
/// Products are formed in 128 bits, and the division of the textbook test is
/// replaced by a sign comparison against the edge's y-delta.
pub fn point_in_polygon<I>(pt: &Point2, edges: I) -> bool
where
    I: IntoIterator<Item = (Point2, Point2)>,
{
    let mut inside = false;
    for (p1, p2) in edges {
        if (p1.y > pt.y) == (p2.y > pt.y) {
            continue;
        }
        let to_pt = widen(pt) - widen(&p1);
        let delta = widen(&p2) - widen(&p1);
        if (cross(&to_pt, &delta) ^ delta.y) < 0 {
            inside = !inside;
        }
    }
    inside
}

/// Twice the signed shoelace area of a closed loop.
#[must_use]
pub fn signed_area_x2(points: &[Point2]) -> i128 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    (0..n)
        .map(|i| cross(&widen(&points[i]), &widen(&points[(i + 1) % n])))
        .sum()
}
