use crate::model::Observation;
use crate::prelude::GeoPoint;
use serde::{Deserialize, Serialize};

/// A registered base station location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub latitude: f64,
    pub longitude: f64,
    pub cell_id: i64,
}

impl Tower {
    pub fn new(latitude: f64, longitude: f64, cell_id: i64) -> Self {
        Self {
            latitude,
            longitude,
            cell_id,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// The tower explaining the most observations, with those observations.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchGroup {
    pub tower: Tower,
    pub observations: Vec<Observation>,
}

impl MatchGroup {
    pub fn match_count(&self) -> usize {
        self.observations.len()
    }

    /// Observation coordinates followed by the tower coordinate.
    pub fn hull_input(&self) -> Vec<GeoPoint> {
        self.observations
            .iter()
            .map(Observation::point)
            .chain(std::iter::once(self.tower.point()))
            .collect()
    }
}

/// Summary of the selected tower, exported with the render directives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestTower {
    pub tower: Tower,
    pub matches: usize,
}

impl From<&MatchGroup> for BestTower {
    fn from(group: &MatchGroup) -> Self {
        Self {
            tower: group.tower,
            matches: group.match_count(),
        }
    }
}
