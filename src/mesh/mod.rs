pub mod edge;
pub mod section;
pub mod section_loop;

pub use edge::{EdgeId, SectionEdge};
pub use section::{Section, SectionFlag, SectionId};
pub use section_loop::{LoopId, SectionLoop};

use crate::arena::{Arena, ArenaKey, ScratchBits, Span};
use crate::error::MeshError;

/// Arena that owns every section, loop and edge of one build.
///
/// Entities reference each other through typed indices and spans, never
/// through pointers. The whole mesh is rebuilt at once; [`SectionMesh::reset`]
/// drops the previous build in one step and keeps the storage.
#[derive(Debug, Default)]
pub struct SectionMesh {
    pub(crate) edges: Arena<EdgeId, SectionEdge>,
    pub(crate) edge_refs: Arena<usize, EdgeId>,
    pub(crate) loops: Arena<LoopId, SectionLoop>,
    pub(crate) sections: Arena<SectionId, Section>,
    pub(crate) sector_sections: Arena<usize, Span>,
    pub(crate) scratch: ScratchBits,
}

impl SectionMesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current build. Every id and span handed out before is
    /// stale afterwards.
    pub fn reset(&mut self) {
        self.edges.reset();
        self.edge_refs.reset();
        self.loops.reset();
        self.sections.reset();
        self.sector_sections.reset();
    }

    #[must_use]
    pub fn num_sectors(&self) -> usize {
        self.sector_sections.len()
    }

    #[must_use]
    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    // --- Edge lookups ---

    /// Returns the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not part of the current build.
    pub fn edge(&self, id: EdgeId) -> Result<&SectionEdge, MeshError> {
        self.edges.get(id).ok_or(MeshError::EntityNotFound {
            kind: "edge",
            index: id.index(),
        })
    }

    /// Returns the edge built from `wall`.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not part of the current build.
    pub fn edge_of_wall(&self, wall: usize) -> Result<&SectionEdge, MeshError> {
        self.edge(EdgeId::from_index(wall))
    }

    /// Iterates over all edges in wall order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &SectionEdge)> {
        self.edges.iter()
    }

    // --- Loop lookups ---

    /// Returns the loop data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is not part of the current build.
    pub fn section_loop(&self, id: LoopId) -> Result<&SectionLoop, MeshError> {
        self.loops.get(id).ok_or(MeshError::EntityNotFound {
            kind: "loop",
            index: id.index(),
        })
    }

    /// Edge ids of a loop, in boundary order.
    #[must_use]
    pub fn loop_edges(&self, section_loop: &SectionLoop) -> &[EdgeId] {
        self.edge_refs.span(section_loop.edges)
    }

    // --- Section lookups ---

    /// Returns the section data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is not part of the current build.
    pub fn section(&self, id: SectionId) -> Result<&Section, MeshError> {
        self.sections.get(id).ok_or(MeshError::EntityNotFound {
            kind: "section",
            index: id.index(),
        })
    }

    /// Iterates over all sections in build order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections.iter()
    }

    /// Loops of a section.
    #[must_use]
    pub fn section_loops(&self, section: &Section) -> &[SectionLoop] {
        self.loops.span(section.loops)
    }

    /// Every edge of a section, loop by loop.
    #[must_use]
    pub fn section_edges(&self, section: &Section) -> &[EdgeId] {
        self.edge_refs.span(section.edges)
    }

    // --- Sector lookups ---

    fn sector_span(&self, sector: usize) -> Result<Span, MeshError> {
        self.sector_sections
            .get(sector)
            .copied()
            .ok_or(MeshError::EntityNotFound {
                kind: "sector",
                index: sector,
            })
    }

    /// Sections carved from `sector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sector is not part of the current build.
    pub fn sections_of(&self, sector: usize) -> Result<&[Section], MeshError> {
        Ok(self.sections.span(self.sector_span(sector)?))
    }

    /// Ids of the sections carved from `sector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sector is not part of the current build.
    pub fn section_ids_of(
        &self,
        sector: usize,
    ) -> Result<impl Iterator<Item = SectionId>, MeshError> {
        let span = self.sector_span(sector)?;
        Ok(self.sections.span_keys(span))
    }

    /// Section the wall bounds, if it ended up in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not part of the current build.
    pub fn section_of_wall(&self, wall: usize) -> Result<Option<SectionId>, MeshError> {
        Ok(self.edge_of_wall(wall)?.front)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh_lookups_fail() {
        let mesh = SectionMesh::new();
        assert_eq!(
            mesh.section(SectionId::from_index(0)),
            Err(MeshError::EntityNotFound {
                kind: "section",
                index: 0
            })
        );
        assert!(mesh.sections_of(0).is_err());
        assert!(mesh.edge_of_wall(2).is_err());
        assert_eq!(mesh.num_sections(), 0);
    }
}
