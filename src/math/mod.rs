pub mod polygon_2d;

/// Map-space point. Build coordinates are 32-bit integers.
pub type Point2 = nalgebra::Point2<i32>;

/// Widened 2D vector for products of point differences.
///
/// A difference of two `i32` coordinates needs 33 bits and a product of two
/// differences 66, so every product and sum is formed in 128 bits.
pub type Vector2 = nalgebra::Vector2<i128>;

/// Widens a map point to 128-bit components.
#[must_use]
pub fn widen(p: &Point2) -> Vector2 {
    Vector2::new(i128::from(p.x), i128::from(p.y))
}

/// 2D cross product: `(a.x * b.y - a.y * b.x)`.
#[inline]
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> i128 {
    a.x * b.y - a.y * b.x
}
