mod area;
mod bounding_box;
mod dump;
mod is_valid;

pub use area::SectionArea;
pub use bounding_box::{Bounds, SectionBounds};
pub use dump::DumpSections;
pub use is_valid::{IsValid, MeshIssue};
