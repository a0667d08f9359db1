use std::fmt::{self, Write};

use crate::level::Level;
use crate::mesh::SectionMesh;

/// Renders a built mesh as indented text, one line per sector, section,
/// loop and wall.
#[derive(Debug, Default)]
pub struct DumpSections;

impl DumpSections {
    /// Creates a new `DumpSections` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query, returning the whole dump.
    #[must_use]
    pub fn execute(&self, level: &Level, mesh: &SectionMesh) -> String {
        let mut out = String::new();
        let written = self.write_to(level, mesh, &mut out);
        debug_assert!(written.is_ok(), "writing into a String cannot fail");
        out
    }

    /// Writes the dump into `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` fails to accept the text.
    pub fn write_to<W: Write>(&self, level: &Level, mesh: &SectionMesh, out: &mut W) -> fmt::Result {
        for sector in 0..mesh.num_sectors() {
            let Ok(ids) = mesh.section_ids_of(sector) else {
                continue;
            };
            let ids: Vec<_> = ids.collect();
            let walls = level.sectors().get(sector).map_or(0, |s| s.wallnum);
            writeln!(out, "Sector {sector}, {walls} walls, {} sections", ids.len())?;

            for id in ids {
                let Ok(section) = mesh.section(id) else {
                    continue;
                };
                let loops = mesh.section_loops(section);
                writeln!(
                    out,
                    "\tSection {}, {} loops, flags = {}",
                    id.index(),
                    loops.len(),
                    section.flag
                )?;
                for section_loop in loops {
                    let edges = mesh.loop_edges(section_loop);
                    writeln!(out, "\t\tLoop, {} walls", edges.len())?;
                    for &edge in edges {
                        let Ok(e) = mesh.edge(edge) else {
                            continue;
                        };
                        writeln!(
                            out,
                            "\t\t\tWall {}, ({}, {}) -> ({}, {})",
                            e.wall, e.start.x, e.start.y, e.end.x, e.end.y
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
