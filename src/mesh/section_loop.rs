use crate::arena::Span;
use crate::math::polygon_2d::Winding;

crate::arena::new_key_type! {
    /// Identifier of a loop within the section mesh.
    pub struct LoopId;
}

/// A closed boundary of a section.
///
/// `edges` is a sub-run of the owning section's edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLoop {
    pub edges: Span,
    pub winding: Winding,
}
