pub mod colorizer;
pub mod correlator;
pub mod hull;

pub use colorizer::{ColorPoint, SignalColorizer};
pub use correlator::{match_counts, select_best_tower, CellIndex};
pub use hull::HullBuilder;
