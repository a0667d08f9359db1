//! Decomposition of Build-engine sectors into sections: simple, correctly
//! wound regions with explicit holes, stored as a half-edge mesh with
//! front/back adjacency across portal walls.

pub mod arena;
pub mod error;
pub mod level;
pub mod math;
pub mod mesh;
pub mod operations;

pub use error::{Result, SectmeshError};
pub use level::{Level, LevelBuilder, Sector, Wall};
pub use mesh::{Section, SectionEdge, SectionFlag, SectionId, SectionLoop, SectionMesh};
pub use operations::sections::{BuildSections, BuildStats, SectionParams};
