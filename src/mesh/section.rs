use std::fmt;

use crate::arena::Span;

crate::arena::new_key_type! {
    /// Identifier of a section, numbered in build order across all sectors.
    pub struct SectionId;
}

/// How much the section's shape can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SectionFlag {
    /// One outer loop with properly nested holes.
    #[default]
    Clean,
    /// The sector's wall chain left its range or revisited a wall.
    Unclosed,
    /// The only loop of the sector is not wound as an outer boundary.
    BadWinding,
    /// Loops whose nesting could not be resolved, lumped together.
    /// Needs a tolerant triangulator.
    Dumped,
}

impl fmt::Display for SectionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Clean => "clean",
            Self::Unclosed => "unclosed",
            Self::BadWinding => "bad-winding",
            Self::Dumped => "dumped",
        };
        f.write_str(name)
    }
}

/// One renderable region of a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Sector the section was carved from.
    pub sector: usize,
    pub flag: SectionFlag,
    /// Loops of the section, outer boundary first for clean sections.
    pub loops: Span,
    /// Every edge of every loop, loop by loop.
    pub edges: Span,
}

impl Section {
    /// Total number of boundary edges.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.edges.len()
    }
}
