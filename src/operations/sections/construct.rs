use crate::arena::ArenaKey;
use crate::level::Level;
use crate::mesh::{EdgeId, Section, SectionEdge, SectionLoop, SectionMesh};

use super::group::SectorDraft;

/// Materializes grouped sections into a [`SectionMesh`].
///
/// `drafts` must hold one entry per sector, in sector order. Whatever the
/// mesh held before is discarded.
pub struct ConstructSections<'a> {
    drafts: &'a [SectorDraft],
}

impl<'a> ConstructSections<'a> {
    /// Creates a new `ConstructSections` operation.
    #[must_use]
    pub fn new(drafts: &'a [SectorDraft]) -> Self {
        Self { drafts }
    }

    /// Executes the construction.
    ///
    /// Edges are allocated for every wall up front, so that twin links can
    /// be resolved before any section exists. Back sections are filled in
    /// last, once every front section is known.
    pub fn execute(&self, level: &Level, mesh: &mut SectionMesh) {
        mesh.reset();
        for wall in 0..level.num_walls() {
            let (start, end) = level.wall_segment(wall);
            mesh.edges.alloc(SectionEdge::new(start, end, wall));
        }
        for (_, edge) in mesh.edges.iter_mut() {
            edge.twin = level.walls()[edge.wall].nextwall.map(EdgeId::from_index);
        }

        for draft in self.drafts {
            let first = mesh.sections.len();
            for section in &draft.sections {
                let edges = mesh.edge_refs.alloc_span(
                    section
                        .loops
                        .iter()
                        .flat_map(|l| l.walls.iter().map(|&w| EdgeId::from_index(w))),
                );

                let mut offset = 0;
                let loops = mesh.loops.alloc_span(section.loops.iter().map(|l| {
                    let section_loop = SectionLoop {
                        edges: edges.sub(offset, l.walls.len()),
                        winding: l.winding,
                    };
                    offset += l.walls.len();
                    section_loop
                }));

                let id = mesh.sections.alloc(Section {
                    sector: draft.sector,
                    flag: section.flag,
                    loops,
                    edges,
                });
                for &wall in section.loops.iter().flat_map(|l| &l.walls) {
                    if let Some(edge) = mesh.edges.get_mut(EdgeId::from_index(wall)) {
                        edge.front = Some(id);
                    }
                }
            }
            let span = mesh.sections.span_since(first);
            mesh.sector_sections.alloc(span);
        }

        for index in 0..mesh.edges.len() {
            let id = EdgeId::from_index(index);
            let back = mesh
                .edges
                .get(id)
                .and_then(|edge| edge.twin)
                .and_then(|twin| mesh.edges.get(twin))
                .and_then(|twin| twin.front);
            if let Some(edge) = mesh.edges.get_mut(id) {
                edge.back = back;
            }
        }
    }
}
