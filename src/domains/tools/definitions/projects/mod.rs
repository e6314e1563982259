//! Project-scoped tools.
//!
//! - `list`: paginated project listing
//! - `measures`: metric values for one project
//! - `quality_gate`: quality gate verdict and conditions for one project

pub mod list;
pub mod measures;
pub mod quality_gate;

pub use list::{ListProjectsParams, ListProjectsTool};
pub use measures::{DEFAULT_METRIC_KEYS, ProjectMeasuresParams, ProjectMeasuresTool};
pub use quality_gate::{QualityGateParams, QualityGateTool};
