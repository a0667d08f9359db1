use std::collections::HashMap;

use crate::error::LevelError;
use crate::math::Point2;

use super::{Level, Sector, Wall};

/// Incrementally assembles sector and wall tables.
///
/// Walls are appended to the most recently started sector, so every sector
/// owns a contiguous run the way the on-disk format requires.
#[derive(Debug, Default)]
pub struct LevelBuilder {
    sectors: Vec<Sector>,
    walls: Vec<Wall>,
}

impl LevelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new, empty sector.
    pub fn sector(&mut self) -> &mut Self {
        self.sectors.push(Sector::new(self.walls.len(), 0));
        self
    }

    /// Appends a closed loop through `points` to the current sector.
    pub fn add_loop(&mut self, points: &[Point2]) -> &mut Self {
        let first = self.walls.len();
        let n = points.len();
        for (i, &pos) in points.iter().enumerate() {
            let point2 = if i + 1 == n { first } else { first + i + 1 };
            self.push_wall(Wall::new(pos, point2));
        }
        self
    }

    /// Number of walls pushed so far; the index the next wall will get.
    #[must_use]
    pub fn num_walls(&self) -> usize {
        self.walls.len()
    }

    /// Appends a single wall as-is and returns its index.
    ///
    /// Nothing about the chain is checked, which makes this the way to
    /// reproduce malformed map data.
    pub fn push_wall(&mut self, wall: Wall) -> usize {
        if self.sectors.is_empty() {
            self.sector();
        }
        let index = self.walls.len();
        self.walls.push(wall);
        if let Some(sector) = self.sectors.last_mut() {
            sector.wallnum += 1;
        }
        index
    }

    /// Makes walls `a` and `b` each other's twin.
    pub fn link(&mut self, a: usize, b: usize) -> &mut Self {
        if let Some(w) = self.walls.get_mut(a) {
            w.nextwall = Some(b);
        }
        if let Some(w) = self.walls.get_mut(b) {
            w.nextwall = Some(a);
        }
        self
    }

    /// Twins every unlinked wall with an unlinked, exactly reversed wall of
    /// a different sector.
    pub fn link_portals(&mut self) -> &mut Self {
        let mut sector_of = vec![usize::MAX; self.walls.len()];
        for (s, sector) in self.sectors.iter().enumerate() {
            for w in sector.walls() {
                sector_of[w] = s;
            }
        }

        let mut by_segment: HashMap<(Point2, Point2), Vec<usize>> = HashMap::new();
        for (i, w) in self.walls.iter().enumerate() {
            if let Some(end) = self.walls.get(w.point2) {
                by_segment.entry((w.pos, end.pos)).or_default().push(i);
            }
        }

        for i in 0..self.walls.len() {
            let w = self.walls[i];
            if w.nextwall.is_some() {
                continue;
            }
            let Some(end) = self.walls.get(w.point2).map(|e| e.pos) else {
                continue;
            };
            let twin = by_segment.get(&(end, w.pos)).and_then(|candidates| {
                candidates.iter().copied().find(|&j| {
                    sector_of[j] != sector_of[i] && self.walls[j].nextwall.is_none()
                })
            });
            if let Some(j) = twin {
                self.link(i, j);
            }
        }
        self
    }

    /// Validates and returns the finished level.
    ///
    /// # Errors
    ///
    /// Returns a [`LevelError`] if any wall index is out of range.
    pub fn build(&self) -> Result<Level, LevelError> {
        Level::new(self.sectors.clone(), self.walls.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32, size: i32) -> Vec<Point2> {
        vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ]
    }

    #[test]
    fn loop_closes_on_its_first_wall() {
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 10))
            .build()
            .unwrap();
        let points: Vec<_> = level.walls().iter().map(|w| w.point2).collect();
        assert_eq!(points, vec![1, 2, 3, 0]);
        assert_eq!(level.sectors()[0].walls(), 0..4);
    }

    #[test]
    fn second_sector_starts_after_first() {
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 10))
            .sector()
            .add_loop(&square(10, 0, 10))
            .build()
            .unwrap();
        assert_eq!(level.sectors()[1].walls(), 4..8);
        assert_eq!(level.num_walls(), 8);
        assert_eq!(level.walls()[7].point2, 4);
    }

    #[test]
    fn link_portals_pairs_shared_edge() {
        let level = LevelBuilder::new()
            .sector()
            .add_loop(&square(0, 0, 10))
            .sector()
            .add_loop(&square(10, 0, 10))
            .link_portals()
            .build()
            .unwrap();
        // (10,0)->(10,10) in sector 0 against (10,10)->(10,0) in sector 1.
        assert_eq!(level.walls()[1].nextwall, Some(7));
        assert_eq!(level.walls()[7].nextwall, Some(1));
        let linked = level.walls().iter().filter(|w| w.nextwall.is_some()).count();
        assert_eq!(linked, 2);
    }

    #[test]
    fn push_wall_starts_a_sector() {
        let mut builder = LevelBuilder::new();
        assert_eq!(builder.num_walls(), 0);
        let index = builder.push_wall(Wall::new(Point2::new(0, 0), 0));
        assert_eq!(index, 0);
        assert_eq!(builder.num_walls(), 1);
        let level = builder.build().unwrap();
        assert_eq!(level.sectors()[0].walls(), 0..1);
    }

    #[test]
    fn link_portals_ignores_same_sector() {
        let mut builder = LevelBuilder::new();
        builder.sector();
        builder.push_wall(Wall::new(Point2::new(0, 0), 1));
        builder.push_wall(Wall::new(Point2::new(5, 0), 0));
        let level = builder.link_portals().build().unwrap();
        assert!(level.walls().iter().all(|w| w.nextwall.is_none()));
    }
}
