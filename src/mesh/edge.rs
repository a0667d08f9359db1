use crate::math::Point2;

use super::section::SectionId;

crate::arena::new_key_type! {
    /// Identifier of a half-edge. Edge `n` is always built from wall `n`.
    pub struct EdgeId;
}

/// Mesh representation of one wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionEdge {
    /// Start position (the wall's own position).
    pub start: Point2,
    /// End position (the position of the wall's `point2`).
    pub end: Point2,
    /// Wall this edge was built from.
    pub wall: usize,
    /// Edge built from the wall's twin, if any.
    pub twin: Option<EdgeId>,
    /// Section this edge bounds from the inside.
    pub front: Option<SectionId>,
    /// Front section of the twin edge. `None` at a level boundary or when
    /// the twin ended up in no section.
    pub back: Option<SectionId>,
}

impl SectionEdge {
    #[must_use]
    pub fn new(start: Point2, end: Point2, wall: usize) -> Self {
        Self {
            start,
            end,
            wall,
            twin: None,
            front: None,
            back: None,
        }
    }
}
