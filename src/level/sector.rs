use std::ops::Range;

/// A floor/ceiling region owning a contiguous run of walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    /// Index of the sector's first wall.
    pub wallptr: usize,
    /// Number of walls owned by the sector.
    pub wallnum: usize,
}

impl Sector {
    #[must_use]
    pub fn new(wallptr: usize, wallnum: usize) -> Self {
        Self { wallptr, wallnum }
    }

    /// The global wall indices owned by this sector.
    #[must_use]
    pub fn walls(&self) -> Range<usize> {
        self.wallptr..self.wallptr + self.wallnum
    }

    /// Whether `wall` falls inside this sector's wall run.
    #[must_use]
    pub fn owns(&self, wall: usize) -> bool {
        self.walls().contains(&wall)
    }
}
