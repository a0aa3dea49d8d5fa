use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A (latitude, longitude) pair, serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint(pub f64, pub f64);

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

/// Reasons a single CSV row or registry line is discarded.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RowParseError {
    #[error("short row: expected at least {expected} fields, found {found}")]
    ShortRow { expected: usize, found: usize },
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("undecodable record: {0}")]
    Undecodable(String),
}

/// A mandatory source could not be read; aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum SourceReadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// The hull step had nothing to draw.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DegenerateHullError {
    #[error("need at least 3 distinct points, got {0}")]
    TooFewPoints(usize),
    #[error("all points are collinear")]
    Collinear,
}

/// Recoverable conditions reported alongside a completed run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize)]
pub enum PipelineWarning {
    #[error("no tower matched any observation")]
    NoMatch,
    #[error("hull skipped: {0}")]
    HullSkipped(#[from] DegenerateHullError),
}

/// Fatal pipeline failure.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceReadError),
}

pub type RowResult<T> = Result<T, RowParseError>;
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Rejects non-finite values and values outside `[-limit, limit]`.
pub(crate) fn check_range(field: &'static str, value: f64, limit: f64) -> RowResult<f64> {
    if value.is_finite() && value.abs() <= limit {
        Ok(value)
    } else {
        Err(RowParseError::OutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_range_accepts_boundaries() {
        assert_eq!(check_range("lat", 90.0, 90.0), Ok(90.0));
        assert_eq!(check_range("lat", -90.0, 90.0), Ok(-90.0));
    }

    #[test]
    fn check_range_rejects_nan_and_overflow() {
        assert!(check_range("lat", f64::NAN, 90.0).is_err());
        assert!(matches!(
            check_range("lon", 180.5, 180.0),
            Err(RowParseError::OutOfRange { field: "lon", .. })
        ));
    }

    #[test]
    fn geo_point_serializes_as_pair() {
        let json = serde_json::to_string(&GeoPoint::new(43.0, 12.5)).unwrap();
        assert_eq!(json, "[43.0,12.5]");
    }
}
