pub mod builder;
pub mod sector;
pub mod wall;

pub use builder::LevelBuilder;
pub use sector::Sector;
pub use wall::Wall;

use crate::error::LevelError;
use crate::math::Point2;

/// Read-only sector and wall tables of a loaded level.
///
/// Sectors and walls refer to each other purely by index. Construction
/// checks that every index lands inside the tables, so later passes may
/// index freely. Whether the chains actually close is not checked here.
#[derive(Debug, Clone, Default)]
pub struct Level {
    sectors: Vec<Sector>,
    walls: Vec<Wall>,
}

impl Level {
    /// Wraps the given tables after validating their cross-references.
    ///
    /// # Errors
    ///
    /// Returns a [`LevelError`] if a sector's wall run extends past the wall
    /// table, or a wall's `point2` or `nextwall` is not a valid wall index.
    pub fn new(sectors: Vec<Sector>, walls: Vec<Wall>) -> Result<Self, LevelError> {
        let num_walls = walls.len();
        for (sector, sec) in sectors.iter().enumerate() {
            let end = sec.wallptr.checked_add(sec.wallnum);
            if !matches!(end, Some(end) if end <= num_walls) {
                return Err(LevelError::SectorOutOfRange {
                    sector,
                    first: sec.wallptr,
                    end: sec.wallptr.saturating_add(sec.wallnum),
                    num_walls,
                });
            }
        }
        for (wall, w) in walls.iter().enumerate() {
            if w.point2 >= num_walls {
                return Err(LevelError::Point2OutOfRange {
                    wall,
                    point2: w.point2,
                    num_walls,
                });
            }
            if let Some(twin) = w.nextwall.filter(|&twin| twin >= num_walls) {
                return Err(LevelError::TwinOutOfRange {
                    wall,
                    twin,
                    num_walls,
                });
            }
        }
        Ok(Self { sectors, walls })
    }

    #[must_use]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    #[must_use]
    pub fn num_sectors(&self) -> usize {
        self.sectors.len()
    }

    #[must_use]
    pub fn num_walls(&self) -> usize {
        self.walls.len()
    }

    /// Start and end position of a wall.
    #[must_use]
    pub fn wall_segment(&self, wall: usize) -> (Point2, Point2) {
        let w = &self.walls[wall];
        (w.pos, self.walls[w.point2].pos)
    }

    /// All walls whose `point2` is `wall`.
    #[must_use]
    pub fn linked_by(&self, wall: usize) -> Vec<usize> {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, w)| w.point2 == wall)
            .map(|(i, _)| i)
            .collect()
    }
}
