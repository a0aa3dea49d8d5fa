pub mod directive;
pub mod observation;
pub mod tower;

pub use directive::{RenderDirective, RenderStyle};
pub use observation::{Observation, ObservedCellIds, Schema, Trail};
pub use tower::{BestTower, MatchGroup, Tower};
