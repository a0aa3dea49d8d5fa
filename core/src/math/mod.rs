pub mod geometry;
pub mod gradient;
pub mod stats;

pub use gradient::ColorGradient;
pub use stats::SignalRange;
