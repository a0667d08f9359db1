use tracing::warn;

use crate::arena::ScratchFrame;
use crate::level::Level;
use crate::math::polygon_2d::Winding;
use crate::mesh::SectionFlag;

use super::collect::{SectorLoops, WallLoop};
use super::winding::loop_inside;

/// Loops that will become one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDraft {
    pub flag: SectionFlag,
    /// Outer loop first, then its holes. Dumped sections keep input order.
    pub loops: Vec<WallLoop>,
}

impl SectionDraft {
    fn new(flag: SectionFlag, loops: Vec<WallLoop>) -> Self {
        Self { flag, loops }
    }

    /// Number of walls over all loops.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.loops.iter().map(|l| l.walls.len()).sum()
    }
}

/// All sections planned for one sector.
#[derive(Debug, Clone, Default)]
pub struct SectorDraft {
    pub sector: usize,
    pub sections: Vec<SectionDraft>,
    /// Loops excluded by the nesting classifier.
    pub conflicts: usize,
}

/// Partitions a sector's loops into sections.
///
/// Cheap special cases are tried first: a single loop, one outer loop with
/// holes, and several disjoint outer loops. Everything else goes through a
/// pairwise containment map. Loops nothing can place end up together in
/// one [`SectionFlag::Dumped`] section.
pub struct GroupSections {
    max_passes: usize,
}

impl GroupSections {
    /// Creates a new `GroupSections` operation.
    ///
    /// `max_passes` bounds how often the containment map is recomputed after
    /// loops have been excluded from it.
    #[must_use]
    pub fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }

    /// Executes the grouping for one sector's loops.
    ///
    /// `scratch` is the caller's live scratch frame; the nesting matrix is
    /// reserved on top of it and released before returning.
    #[must_use]
    pub fn execute(
        &self,
        level: &Level,
        collected: SectorLoops,
        scratch: &mut ScratchFrame<'_>,
    ) -> SectorDraft {
        let SectorLoops {
            sector,
            loops,
            unclosed,
            ..
        } = collected;
        let mut draft = SectorDraft {
            sector,
            ..SectorDraft::default()
        };

        match loops.len() {
            0 => return draft,
            1 => {
                draft.sections.push(single_loop(sector, loops, unclosed));
                return draft;
            }
            _ => {}
        }

        let total = loops.len();
        let mut pending: Vec<Option<WallLoop>> = loops.into_iter().map(Some).collect();

        // A malformed sector skips straight to the fallback.
        if !unclosed {
            if let Some(section) = outer_with_holes(level, &mut pending) {
                draft.sections.push(section);
                return draft;
            }
            if let Some(sections) = disjoint_outers(level, &mut pending) {
                draft.sections = sections;
                return draft;
            }
            draft.conflicts =
                self.resolve_nesting(level, sector, &mut pending, &mut draft.sections, scratch);
        }

        let leftover: Vec<WallLoop> = pending.into_iter().flatten().collect();
        if !leftover.is_empty() {
            warn!(
                sector,
                loops = total,
                dumped = leftover.len(),
                "potential problem in sector, dumping loops into a fallback section"
            );
            draft
                .sections
                .push(SectionDraft::new(SectionFlag::Dumped, leftover));
        }
        draft
    }

    /// General case: build a containment map and emit one section per outer
    /// loop that nothing contains, together with the holes mapped to it.
    ///
    /// A nesting is accepted only as "hole inside outer". Any other nesting,
    /// or a loop inside two others, excludes every loop involved, and the
    /// map is rebuilt without them, since holes of an excluded loop lose
    /// their container. Returns the number of excluded loops.
    fn resolve_nesting(
        &self,
        level: &Level,
        sector: usize,
        pending: &mut [Option<WallLoop>],
        sections: &mut Vec<SectionDraft>,
        scratch: &mut ScratchFrame<'_>,
    ) -> usize {
        let n = pending.len();
        let mut bits = scratch.push(n * n + n);
        let nests = |a: usize, b: usize| a * n + b;
        let conflict = |a: usize| n * n + a;

        for a in 0..n {
            for b in 0..n {
                if a != b && loop_inside(level, walls_of(pending, a), walls_of(pending, b)) {
                    bits.set(nests(a, b));
                }
            }
        }

        let mut container: Vec<Option<usize>> = vec![None; n];
        let mut settled = false;
        for _ in 0..self.max_passes {
            container.fill(None);
            let mut changed = false;
            for a in 0..n {
                for b in 0..n {
                    if a == b
                        || !bits.get(nests(a, b))
                        || bits.get(conflict(a))
                        || bits.get(conflict(b))
                    {
                        continue;
                    }
                    match container[a] {
                        None if winding_of(pending, a) == Winding::Hole
                            && winding_of(pending, b) == Winding::Outer =>
                        {
                            container[a] = Some(b);
                        }
                        None => {
                            warn!(sector, inner = a, outer = b, "bad winding order for nested loops");
                            bits.set(conflict(a));
                            bits.set(conflict(b));
                            changed = true;
                        }
                        Some(first) => {
                            warn!(sector, nested = a, first, second = b, "loop nested in several loops");
                            bits.set(conflict(first));
                            bits.set(conflict(a));
                            bits.set(conflict(b));
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                settled = true;
                break;
            }
        }

        let conflicts = (0..n).filter(|&a| bits.get(conflict(a))).count();
        if !settled {
            warn!(sector, passes = self.max_passes, "nesting classification did not settle");
            return conflicts;
        }

        for b in 0..n {
            if bits.get(conflict(b)) || winding_of(pending, b) != Winding::Outer {
                continue;
            }
            let mut loops: Vec<WallLoop> = pending[b].take().into_iter().collect();
            for a in 0..n {
                if container[a] == Some(b) {
                    loops.extend(pending[a].take());
                }
            }
            sections.push(SectionDraft::new(SectionFlag::Clean, loops));
        }
        conflicts
    }
}

fn walls_of(pending: &[Option<WallLoop>], i: usize) -> &[usize] {
    pending[i].as_ref().map_or(&[][..], |l| l.walls.as_slice())
}

fn winding_of(pending: &[Option<WallLoop>], i: usize) -> Winding {
    pending[i]
        .as_ref()
        .map_or(Winding::Indeterminate, |l| l.winding)
}

/// One loop: use it whatever it looks like.
fn single_loop(sector: usize, loops: Vec<WallLoop>, unclosed: bool) -> SectionDraft {
    let mut flag = if unclosed {
        SectionFlag::Unclosed
    } else {
        SectionFlag::Clean
    };
    if loops.iter().any(|l| l.winding != Winding::Outer) {
        warn!(sector, "sector has wrong winding order");
        flag = SectionFlag::BadWinding;
    }
    SectionDraft::new(flag, loops)
}

/// Exactly one outer loop and only holes besides, each with a vertex inside
/// the outer loop.
fn outer_with_holes(level: &Level, pending: &mut [Option<WallLoop>]) -> Option<SectionDraft> {
    let n = pending.len();
    let outers: Vec<usize> = (0..n)
        .filter(|&i| winding_of(pending, i) == Winding::Outer)
        .collect();
    let holes = (0..n)
        .filter(|&i| winding_of(pending, i) == Winding::Hole)
        .count();
    let [outer] = outers[..] else {
        return None;
    };
    if holes != n - 1 {
        return None;
    }
    let all_inside = (0..n)
        .filter(|&i| i != outer)
        .all(|i| loop_inside(level, walls_of(pending, i), walls_of(pending, outer)));
    if !all_inside {
        return None;
    }

    let mut loops = Vec::with_capacity(n);
    loops.extend(pending[outer].take());
    loops.extend(pending.iter_mut().filter_map(Option::take));
    Some(SectionDraft::new(SectionFlag::Clean, loops))
}

/// Only outer loops, none inside another: one section each.
fn disjoint_outers(level: &Level, pending: &mut [Option<WallLoop>]) -> Option<Vec<SectionDraft>> {
    let n = pending.len();
    if (0..n).any(|i| winding_of(pending, i) != Winding::Outer) {
        return None;
    }
    for a in 0..n {
        for b in 0..n {
            if a != b && loop_inside(level, walls_of(pending, a), walls_of(pending, b)) {
                return None;
            }
        }
    }
    Some(
        pending
            .iter_mut()
            .filter_map(Option::take)
            .map(|l| SectionDraft::new(SectionFlag::Clean, vec![l]))
            .collect(),
    )
}
