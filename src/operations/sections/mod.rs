//! Sector decomposition: loop collection, section grouping and mesh
//! construction.

pub mod collect;
pub mod construct;
pub mod group;
pub mod winding;

pub use collect::{CollectLoops, SectorLoops, WallLoop};
pub use construct::ConstructSections;
pub use group::{GroupSections, SectionDraft, SectorDraft};

use tracing::{debug, info};

use crate::level::Level;
use crate::math::polygon_2d::Winding;
use crate::mesh::{SectionFlag, SectionMesh};
use crate::operations::query::DumpSections;

/// Parameters controlling a section build.
#[derive(Debug, Clone, Copy)]
pub struct SectionParams {
    /// Log every sector, section, loop and wall at `debug` level after the build.
    pub debug_dump: bool,
    /// Upper bound on containment map rebuilds for one sector.
    pub max_classify_passes: usize,
}

impl Default for SectionParams {
    fn default() -> Self {
        Self {
            debug_dump: false,
            max_classify_passes: 8,
        }
    }
}

impl SectionParams {
    #[must_use]
    pub fn with_debug_dump(mut self, debug_dump: bool) -> Self {
        self.debug_dump = debug_dump;
        self
    }

    #[must_use]
    pub fn with_max_classify_passes(mut self, passes: usize) -> Self {
        self.max_classify_passes = passes;
        self
    }
}

/// Counters collected during a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub sectors: usize,
    pub sections: usize,
    pub loops: usize,
    pub edges: usize,
    pub unclosed_sectors: usize,
    pub bad_winding: usize,
    pub indeterminate_loops: usize,
    pub conflicts: usize,
    pub dumped_sections: usize,
    pub discarded_duplicates: usize,
}

/// Rebuilds the whole section mesh of a level.
///
/// Never fails on malformed geometry: broken sectors are flagged, logged and
/// carried into the mesh as well as possible.
pub struct BuildSections {
    params: SectionParams,
}

impl BuildSections {
    /// Creates a new `BuildSections` operation.
    #[must_use]
    pub fn new(params: SectionParams) -> Self {
        Self { params }
    }

    /// Executes the build, replacing whatever `mesh` held before.
    pub fn execute(&self, level: &Level, mesh: &mut SectionMesh) -> BuildStats {
        let mut stats = BuildStats {
            sectors: level.num_sectors(),
            ..BuildStats::default()
        };

        let grouper = GroupSections::new(self.params.max_classify_passes);
        let drafts: Vec<SectorDraft> = {
            let mut visited = mesh.scratch.frame(level.num_walls());
            (0..level.num_sectors())
                .map(|sector| {
                    let loops = CollectLoops::new(sector).execute(level, &mut visited);
                    stats.unclosed_sectors += usize::from(loops.unclosed);
                    stats.discarded_duplicates += loops.discarded;
                    stats.indeterminate_loops += loops
                        .loops
                        .iter()
                        .filter(|l| l.winding == Winding::Indeterminate)
                        .count();
                    grouper.execute(level, loops, &mut visited)
                })
                .collect()
        };

        for draft in &drafts {
            stats.conflicts += draft.conflicts;
            for section in &draft.sections {
                match section.flag {
                    SectionFlag::BadWinding => stats.bad_winding += 1,
                    SectionFlag::Dumped => stats.dumped_sections += 1,
                    SectionFlag::Clean | SectionFlag::Unclosed => {}
                }
            }
        }

        ConstructSections::new(&drafts).execute(level, mesh);
        stats.sections = mesh.num_sections();
        stats.loops = mesh.num_loops();
        stats.edges = mesh.num_edges();

        info!(
            sectors = stats.sectors,
            walls = level.num_walls(),
            sections = stats.sections,
            unclosed = stats.unclosed_sectors,
            dumped = stats.dumped_sections,
            "built sections"
        );
        if self.params.debug_dump {
            for line in DumpSections::new().execute(level, mesh).lines() {
                debug!("{line}");
            }
        }
        stats
    }
}

impl SectionMesh {
    /// Resets the mesh and rebuilds it from `level`, keeping its storage.
    pub fn rebuild(&mut self, level: &Level, params: SectionParams) -> BuildStats {
        BuildSections::new(params).execute(level, self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::arena::ArenaKey;
    use crate::level::{LevelBuilder, Wall};
    use crate::math::Point2;
    use crate::mesh::{Section, SectionEdge, SectionId};

    fn p(x: i32, y: i32) -> Point2 {
        Point2::new(x, y)
    }

    fn square(x: i32, y: i32, size: i32) -> Vec<Point2> {
        vec![p(x, y), p(x + size, y), p(x + size, y + size), p(x, y + size)]
    }

    fn hole(x: i32, y: i32, size: i32) -> Vec<Point2> {
        let mut points = square(x, y, size);
        points.reverse();
        points
    }

    fn build(level: &Level) -> (SectionMesh, BuildStats) {
        let mut mesh = SectionMesh::new();
        let stats = mesh.rebuild(level, SectionParams::default());
        (mesh, stats)
    }

    /// Two unit rooms sharing the wall x = 10, linked as portals.
    fn two_rooms() -> Level {
        LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 10))
            .sector()
            .add_loop(&square(10, 0, 10))
            .link_portals()
            .build()
            .unwrap()
    }

    #[test]
    fn single_loop_sector() {
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 10))
            .build()
            .unwrap();
        let (mesh, stats) = build(&level);
        let sections = mesh.sections_of(0).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].flag, SectionFlag::Clean);
        assert_eq!(sections[0].wall_count(), 4);
        assert_eq!(mesh.section_loops(&sections[0]).len(), 1);
        assert_eq!(stats.sections, 1);
        assert_eq!(stats.edges, 4);
    }

    #[test]
    fn donut_sector() {
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 10))
            .add_loop(&hole(3, 3, 4))
            .build()
            .unwrap();
        let (mesh, _) = build(&level);
        let sections = mesh.sections_of(0).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].flag, SectionFlag::Clean);
        let loops = mesh.section_loops(&sections[0]);
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].winding, Winding::Outer);
        assert_eq!(loops[1].winding, Winding::Hole);
    }

    #[test]
    fn conflict_falls_back_to_dumped_section() {
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 20))
            .add_loop(&square(5, 5, 5))
            .build()
            .unwrap();
        let (mesh, stats) = build(&level);
        let sections = mesh.sections_of(0).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].flag, SectionFlag::Dumped);
        assert_eq!(mesh.section_loops(&sections[0]).len(), 2);
        assert_eq!(stats.dumped_sections, 1);
        assert_eq!(stats.conflicts, 2);
    }

    #[test]
    fn twins_link_front_and_back() {
        let (mesh, _) = build(&two_rooms());
        // Wall 1 runs (10,0)->(10,10), wall 7 runs (10,10)->(10,0).
        let left = mesh.edge_of_wall(1).unwrap();
        let right = mesh.edge_of_wall(7).unwrap();
        assert_eq!(left.twin.map(|t| t.index()), Some(7));
        assert_eq!(left.front, Some(SectionId::from_index(0)));
        assert_eq!(left.back, Some(SectionId::from_index(1)));
        assert_eq!(right.back, left.front);
        assert_eq!(left.back, right.front);
        for (_, edge) in mesh.edges() {
            if let (Some(twin), Some(back)) = (edge.twin, edge.back) {
                let twin = mesh.edge(twin).unwrap();
                assert_eq!(twin.front, Some(back));
                assert_eq!(twin.back, edge.front);
            }
        }
        assert_eq!(mesh.edge_of_wall(0).unwrap().back, None);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let level = two_rooms();
        let mut mesh = SectionMesh::new();
        let first = mesh.rebuild(&level, SectionParams::default());
        let edges: Vec<SectionEdge> = mesh.edges().map(|(_, e)| *e).collect();
        let sections: Vec<Section> = mesh.sections().map(|(_, s)| *s).collect();

        let second = mesh.rebuild(&level, SectionParams::default());
        assert_eq!(first, second);
        assert_eq!(mesh.edges().map(|(_, e)| *e).collect::<Vec<_>>(), edges);
        assert_eq!(mesh.sections().map(|(_, s)| *s).collect::<Vec<_>>(), sections);
        assert_eq!(mesh.scratch.in_use(), 0);
    }

    #[test]
    fn sections_partition_sector_walls() {
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 10))
            .add_loop(&hole(2, 2, 4))
            .add_loop(&square(20, 0, 10))
            .add_loop(&hole(22, 2, 4))
            .build()
            .unwrap();
        let (mesh, _) = build(&level);
        let mut walls: Vec<usize> = mesh
            .sections_of(0)
            .unwrap()
            .iter()
            .flat_map(|s| mesh.section_edges(s).iter().map(|e| e.index()))
            .collect();
        walls.sort_unstable();
        assert_eq!(walls, (0..16).collect::<Vec<_>>());
        assert_eq!(mesh.section_ids_of(0).unwrap().count(), 2);
    }

    #[test]
    fn malformed_sectors_do_not_stop_the_build() {
        let mut builder = LevelBuilder::new();
        builder.sector();
        builder.push_wall(Wall::new(p(0, 0), 1));
        builder.push_wall(Wall::new(p(10, 0), 2));
        builder.push_wall(Wall::new(p(10, 10), 1));
        builder.sector().add_loop(&hole(20, 0, 10));
        builder.sector().add_loop(&square(40, 0, 10));
        let level = builder.build().unwrap();
        let (mesh, stats) = build(&level);
        assert_eq!(stats.unclosed_sectors, 1);
        assert_eq!(stats.bad_winding, 1);
        assert_eq!(mesh.sections_of(0).unwrap()[0].flag, SectionFlag::Unclosed);
        assert_eq!(mesh.sections_of(1).unwrap()[0].flag, SectionFlag::BadWinding);
        assert_eq!(mesh.sections_of(2).unwrap()[0].flag, SectionFlag::Clean);
    }

    #[test]
    fn full_coordinate_range_sector() {
        let (lo, hi) = (i32::MIN, i32::MAX);
        let outer = vec![p(lo, lo), p(hi, lo), p(hi, hi), p(lo, hi)];
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&outer)
            .sector()
            .add_loop(&outer)
            .add_loop(&hole(0, 0, 10))
            .build()
            .unwrap();
        let (mesh, stats) = build(&level);
        assert_eq!(stats.sections, 2);
        assert_eq!(stats.dumped_sections + stats.bad_winding, 0);

        let single = mesh.sections_of(0).unwrap();
        assert_eq!(single[0].flag, SectionFlag::Clean);
        let holed = mesh.sections_of(1).unwrap();
        assert_eq!(holed.len(), 1);
        assert_eq!(holed[0].flag, SectionFlag::Clean);
        assert_eq!(mesh.section_loops(&holed[0]).len(), 2);
    }

    #[test]
    fn debug_dump_does_not_change_the_result() {
        let level = two_rooms();
        let mut mesh = SectionMesh::new();
        let plain = mesh.rebuild(&level, SectionParams::default());
        let dumped = mesh.rebuild(&level, SectionParams::default().with_debug_dump(true));
        assert_eq!(plain, dumped);
    }

    #[test]
    fn params_builders() {
        let params = SectionParams::default()
            .with_debug_dump(true)
            .with_max_classify_passes(2);
        assert!(params.debug_dump);
        assert_eq!(params.max_classify_passes, 2);
    }
}
