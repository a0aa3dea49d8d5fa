//! Correlation and geometry core for cell-signal trace analysis.
//!
//! Trace files are parsed into observations, matched against a tower
//! registry, and the best-explained tower is summarized as colored points and
//! a convex hull. The output is a list of render directives for an external
//! map renderer.

pub mod analysis;
pub mod ingest;
pub mod math;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod telemetry;

pub use pipeline::{Pipeline, PipelineConfig, PipelineOutput};
pub use prelude::{GeoPoint, PipelineError, PipelineWarning};
