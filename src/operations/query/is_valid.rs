use crate::level::Level;
use crate::mesh::{EdgeId, SectionFlag, SectionId, SectionMesh};

/// A broken invariant found by [`IsValid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshIssue {
    /// A wall has no edge in the mesh.
    StaleEdge { wall: usize },
    /// Consecutive edges of a closed section's loop do not meet.
    OpenLoop { section: SectionId, wall: usize },
    /// A wall is used by more than one loop.
    DuplicateWall { wall: usize },
    /// A section uses a wall owned by another sector.
    ForeignWall { section: SectionId, wall: usize },
    /// A wall of a cleanly decomposed sector is in no section.
    MissingWall { sector: usize, wall: usize },
    /// The edge's front section is not the section listing it.
    WrongFront { wall: usize },
    /// The edge's back section is not its twin's front section.
    TwinMismatch { wall: usize },
}

/// Validates a built section mesh against the level it was built from.
///
/// Checked are the wall partition of every sector, the closure of every loop
/// in clean or merely misoriented sections, and front/back symmetry across
/// twin edges.
#[derive(Debug, Default)]
pub struct IsValid;

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the validation, returning `true` if the mesh is valid.
    #[must_use]
    pub fn execute(&self, level: &Level, mesh: &SectionMesh) -> bool {
        self.issues(level, mesh).is_empty()
    }

    /// Collects every broken invariant.
    #[must_use]
    pub fn issues(&self, level: &Level, mesh: &SectionMesh) -> Vec<MeshIssue> {
        let mut issues = Vec::new();
        if mesh.num_edges() < level.num_walls() {
            issues.extend(
                (mesh.num_edges()..level.num_walls()).map(|wall| MeshIssue::StaleEdge { wall }),
            );
            return issues;
        }

        let mut seen = vec![false; level.num_walls()];
        for (id, section) in mesh.sections() {
            let sector = level.sectors().get(section.sector);
            for &edge in mesh.section_edges(section) {
                let wall = edge.index();
                if !sector.is_some_and(|s| s.owns(wall)) {
                    issues.push(MeshIssue::ForeignWall { section: id, wall });
                }
                match seen.get_mut(wall) {
                    Some(true) => issues.push(MeshIssue::DuplicateWall { wall }),
                    Some(flag) => *flag = true,
                    None => issues.push(MeshIssue::StaleEdge { wall }),
                }
                if mesh.edge(edge).map(|e| e.front) != Ok(Some(id)) {
                    issues.push(MeshIssue::WrongFront { wall });
                }
            }
            if matches!(section.flag, SectionFlag::Clean | SectionFlag::BadWinding) {
                check_closure(mesh, id, &mut issues);
            }
        }

        for (sector, s) in level.sectors().iter().enumerate() {
            let clean = mesh
                .sections_of(sector)
                .is_ok_and(|sections| sections.iter().all(|x| x.flag == SectionFlag::Clean));
            if !clean {
                continue;
            }
            issues.extend(
                s.walls()
                    .filter(|&wall| !seen[wall])
                    .map(|wall| MeshIssue::MissingWall { sector, wall }),
            );
        }

        for (id, edge) in mesh.edges() {
            let Some(twin) = edge.twin else {
                continue;
            };
            let twin_front = mesh.edge(twin).ok().and_then(|t| t.front);
            if edge.back != twin_front {
                issues.push(MeshIssue::TwinMismatch { wall: id.index() });
            }
        }
        issues
    }
}

fn check_closure(mesh: &SectionMesh, id: SectionId, issues: &mut Vec<MeshIssue>) {
    let Ok(section) = mesh.section(id) else {
        return;
    };
    for section_loop in mesh.section_loops(section) {
        let edges = mesh.loop_edges(section_loop);
        for (i, &current) in edges.iter().enumerate() {
            let next: EdgeId = edges[(i + 1) % edges.len()];
            let meets = match (mesh.edge(current), mesh.edge(next)) {
                (Ok(a), Ok(b)) => a.end == b.start,
                _ => false,
            };
            if !meets {
                issues.push(MeshIssue::OpenLoop {
                    section: id,
                    wall: current.index(),
                });
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::arena::ArenaKey;
    use crate::level::{LevelBuilder, Wall};
    use crate::math::Point2;
    use crate::operations::sections::SectionParams;

    fn p(x: i32, y: i32) -> Point2 {
        Point2::new(x, y)
    }

    fn square(x: i32, y: i32, size: i32) -> Vec<Point2> {
        vec![p(x, y), p(x + size, y), p(x + size, y + size), p(x, y + size)]
    }

    fn built(level: &Level) -> SectionMesh {
        let mut mesh = SectionMesh::new();
        mesh.rebuild(level, SectionParams::default());
        mesh
    }

    fn rooms() -> Level {
        let mut hole = square(12, 2, 4);
        hole.reverse();
        LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 10))
            .sector()
            .add_loop(&square(10, 0, 10))
            .add_loop(&hole)
            .link_portals()
            .build()
            .unwrap()
    }

    #[test]
    fn built_mesh_is_valid() {
        let level = rooms();
        let mesh = built(&level);
        assert_eq!(IsValid::new().issues(&level, &mesh), Vec::new());
        assert!(IsValid::new().execute(&level, &mesh));
    }

    #[test]
    fn dumped_sections_still_partition() {
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 20))
            .add_loop(&square(5, 5, 5))
            .build()
            .unwrap();
        let mesh = built(&level);
        assert!(IsValid::new().execute(&level, &mesh));
    }

    #[test]
    fn unclosed_sector_skips_closure() {
        let mut builder = LevelBuilder::new();
        builder.sector();
        builder.push_wall(Wall::new(p(0, 0), 1));
        builder.push_wall(Wall::new(p(10, 0), 2));
        builder.push_wall(Wall::new(p(10, 10), 1));
        let level = builder.build().unwrap();
        let mesh = built(&level);
        assert!(IsValid::new().execute(&level, &mesh));
    }

    #[test]
    fn detects_broken_back_link() {
        let level = rooms();
        let mut mesh = built(&level);
        mesh.edges.get_mut(EdgeId::from_index(1)).unwrap().back = None;
        assert_eq!(
            IsValid::new().issues(&level, &mesh),
            vec![MeshIssue::TwinMismatch { wall: 1 }]
        );
    }

    #[test]
    fn detects_open_loop() {
        let level = rooms();
        let mut mesh = built(&level);
        mesh.edges.get_mut(EdgeId::from_index(0)).unwrap().end = p(3, 3);
        assert_eq!(
            IsValid::new().issues(&level, &mesh),
            vec![MeshIssue::OpenLoop {
                section: SectionId::from_index(0),
                wall: 0
            }]
        );
    }

    #[test]
    fn reset_mesh_has_stale_edges() {
        let level = rooms();
        let mut mesh = built(&level);
        mesh.reset();
        let issues = IsValid::new().issues(&level, &mesh);
        assert_eq!(issues.len(), level.num_walls());
        assert!(matches!(issues[0], MeshIssue::StaleEdge { wall: 0 }));
    }
}
