use crate::math::Point2;

/// One directed boundary edge of a sector.
///
/// The edge runs from `pos` to the position of wall `point2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    /// Start position of the wall.
    pub pos: Point2,
    /// Index of the next wall in the sector's boundary chain.
    pub point2: usize,
    /// Matching wall in the adjoining sector, if this wall is a portal.
    pub nextwall: Option<usize>,
}

impl Wall {
    /// Creates a solid (non-portal) wall.
    #[must_use]
    pub fn new(pos: Point2, point2: usize) -> Self {
        Self {
            pos,
            point2,
            nextwall: None,
        }
    }

    /// Sets the twin wall on the other side of this one.
    #[must_use]
    pub fn with_twin(mut self, nextwall: usize) -> Self {
        self.nextwall = Some(nextwall);
        self
    }

    /// Converts the on-disk `-1` convention for "no twin".
    #[must_use]
    pub fn from_raw(x: i32, y: i32, point2: usize, nextwall: i32) -> Self {
        Self {
            pos: Point2::new(x, y),
            point2,
            nextwall: usize::try_from(nextwall).ok(),
        }
    }
}
