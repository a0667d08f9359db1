use thiserror::Error;

/// Top-level error type for the section builder.
#[derive(Debug, Error)]
pub enum SectmeshError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Structural problems in the input wall/sector tables.
///
/// Malformed *geometry* (unclosed chains, bad winding, ambiguous nesting)
/// is never reported here; it is flagged on the resulting sections instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("sector {sector} spans walls {first}..{end} but the level has {num_walls} walls")]
    SectorOutOfRange {
        sector: usize,
        first: usize,
        end: usize,
        num_walls: usize,
    },

    #[error("wall {wall} has point2 {point2} outside the wall table ({num_walls} walls)")]
    Point2OutOfRange {
        wall: usize,
        point2: usize,
        num_walls: usize,
    },

    #[error("wall {wall} has twin {twin} outside the wall table ({num_walls} walls)")]
    TwinOutOfRange {
        wall: usize,
        twin: usize,
        num_walls: usize,
    },
}

/// Errors related to lookups in a built section mesh.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("{kind} {index} not found in section mesh")]
    EntityNotFound { kind: &'static str, index: usize },

    #[error("section {section} has no edges")]
    EmptySection { section: usize },
}

/// Convenience type alias for results using [`SectmeshError`].
pub type Result<T> = std::result::Result<T, SectmeshError>;
