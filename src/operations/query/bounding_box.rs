use crate::error::{MeshError, Result};
use crate::math::Point2;
use crate::mesh::{SectionId, SectionMesh};

/// An axis-aligned bounding box in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Bounds {
    fn around(p: Point2) -> Self {
        Self { min: p, max: p }
    }

    fn include(&mut self, p: Point2) {
        self.min = self.min.inf(&p);
        self.max = self.max.sup(&p);
    }
}

/// Computes the axis-aligned bounding box of a section.
pub struct SectionBounds {
    section: SectionId,
}

impl SectionBounds {
    /// Creates a new `SectionBounds` query.
    #[must_use]
    pub fn new(section: SectionId) -> Self {
        Self { section }
    }

    /// Executes the query, returning the bounds of all edge endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is not part of the current build or
    /// has no edges.
    pub fn execute(&self, mesh: &SectionMesh) -> Result<Bounds> {
        let section = mesh.section(self.section)?;
        let mut bounds: Option<Bounds> = None;
        for &id in mesh.section_edges(section) {
            let edge = mesh.edge(id)?;
            let b = bounds.get_or_insert_with(|| Bounds::around(edge.start));
            b.include(edge.start);
            b.include(edge.end);
        }
        let bounds = bounds.ok_or(MeshError::EmptySection {
            section: self.section.index(),
        })?;
        Ok(bounds)
    }
}
