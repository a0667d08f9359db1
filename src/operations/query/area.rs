use crate::error::Result;
use crate::math::polygon_2d::signed_area_x2;
use crate::math::Point2;
use crate::mesh::{SectionId, SectionMesh};

/// Computes the enclosed area of a section.
///
/// Loop areas are summed with their sign, so holes of a properly wound
/// section are subtracted from its outer loop.
pub struct SectionArea {
    section: SectionId,
}

impl SectionArea {
    /// Creates a new `SectionArea` query.
    #[must_use]
    pub fn new(section: SectionId) -> Self {
        Self { section }
    }

    /// Executes the query, returning the area in square map units.
    ///
    /// # Errors
    ///
    /// Returns an error if the section or one of its edges is not part of
    /// the current build.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, mesh: &SectionMesh) -> Result<f64> {
        let section = mesh.section(self.section)?;
        let mut total_x2 = 0_i128;
        let mut points: Vec<Point2> = Vec::new();
        for section_loop in mesh.section_loops(section) {
            points.clear();
            for &id in mesh.loop_edges(section_loop) {
                points.push(mesh.edge(id)?.start);
            }
            total_x2 += signed_area_x2(&points);
        }
        Ok(total_x2 as f64 * 0.5)
    }
}
