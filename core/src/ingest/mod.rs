mod fields;
pub mod record;
pub mod registry;
pub mod source;

pub use record::{CurrentLayout, RecordParser};
pub use registry::TowerRegistry;
pub use source::{load_source, load_trail, ObservationSource, ParsedSource};
