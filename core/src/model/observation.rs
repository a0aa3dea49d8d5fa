use crate::prelude::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// CSV layout of an observation source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Positional columns, no header row.
    Legacy,
    /// Named columns behind a header row.
    Current,
}

impl Schema {
    pub fn has_headers(self) -> bool {
        matches!(self, Schema::Current)
    }
}

/// One georeferenced signal-strength sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<i32>,
    pub cell_id: i64,
    pub signal: i32,
}

impl Observation {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Cell identifiers seen while parsing observation sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedCellIds {
    ids: HashSet<i64>,
}

impl ObservedCellIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, cell_id: i64) {
        self.ids.insert(cell_id);
    }

    pub fn contains(&self, cell_id: i64) -> bool {
        self.ids.contains(&cell_id)
    }

    /// Folds another source's accumulator into this one.
    pub fn merge(&mut self, other: ObservedCellIds) {
        self.ids.extend(other.ids);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<i64> for ObservedCellIds {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Parsed contents of a single observation source.
///
/// `points` holds every row with a usable position, including rows that
/// lack the cell or signal fields needed for an [`Observation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub label: String,
    pub points: Vec<GeoPoint>,
    pub observations: Vec<Observation>,
}

impl Trail {
    pub fn new(
        label: impl Into<String>,
        points: Vec<GeoPoint>,
        observations: Vec<Observation>,
    ) -> Self {
        Self {
            label: label.into(),
            points,
            observations,
        }
    }
}
