use tracing::warn;

use crate::arena::ScratchFrame;
use crate::level::Level;
use crate::math::polygon_2d::Winding;

use super::winding::loop_winding;

/// A closed chain of walls recovered from a sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallLoop {
    /// Wall indices in `point2` order.
    pub walls: Vec<usize>,
    pub winding: Winding,
}

/// Every loop found in one sector.
#[derive(Debug, Clone, Default)]
pub struct SectorLoops {
    pub sector: usize,
    pub loops: Vec<WallLoop>,
    /// A chain left the sector's wall range or ran into a visited wall.
    pub unclosed: bool,
    /// Loops dropped because they ran into a known duplicate wall.
    pub discarded: usize,
}

/// Walks a sector's `point2` chains and recovers its closed loops.
pub struct CollectLoops {
    sector: usize,
}

impl CollectLoops {
    /// Creates a new `CollectLoops` operation.
    #[must_use]
    pub fn new(sector: usize) -> Self {
        Self { sector }
    }

    /// Executes the walk.
    ///
    /// `visited` holds one bit per wall of the level and is shared by all
    /// sectors of a build, so a wall is never walked twice. A broken chain
    /// marks the sector as unclosed and stops the current walk; the walls
    /// reached so far are still kept as a loop so no geometry goes missing.
    #[must_use]
    pub fn execute(&self, level: &Level, visited: &mut ScratchFrame<'_>) -> SectorLoops {
        let sector = self.sector;
        let range = level.sectors()[sector].walls();
        let walls = level.walls();
        let mut collected = SectorLoops {
            sector,
            ..SectorLoops::default()
        };

        let mut current = Vec::new();
        for w in range.clone() {
            if visited.get(w) {
                continue;
            }
            current.clear();
            current.push(w);
            visited.set(w);

            let mut ww = walls[w].point2;
            while ww != w {
                if !range.contains(&ww) {
                    warn!(sector, wall = ww, "found wall outside sector in a loop");
                    collected.unclosed = true;
                    break;
                }
                if visited.get(ww) {
                    if is_duplicate_wall(level, ww) {
                        current.clear();
                        collected.discarded += 1;
                        break;
                    }
                    warn!(
                        sector,
                        wall = ww,
                        linked_by = ?level.linked_by(ww),
                        "found already visited wall"
                    );
                    collected.unclosed = true;
                    break;
                }
                current.push(ww);
                visited.set(ww);
                ww = walls[ww].point2;
            }

            if !current.is_empty() {
                let winding = loop_winding(level, &current);
                if winding == Winding::Indeterminate {
                    warn!(sector, "unable to determine winding order of loop");
                }
                collected.loops.push(WallLoop {
                    walls: std::mem::take(&mut current),
                    winding,
                });
            }
        }
        collected
    }
}

/// The one known cause of a revisited wall in otherwise sound maps: a wall
/// duplicated in place, with the copy stored right after the original.
fn is_duplicate_wall(level: &Level, ww: usize) -> bool {
    if ww < 2 {
        return false;
    }
    let walls = level.walls();
    let (copy, original) = (&walls[ww - 1], &walls[ww - 2]);
    copy.pos == original.pos && copy.point2 == original.point2 && copy.point2 == ww
}
