//! Planar convex hull over raw (latitude, longitude) pairs.
//!
//! Coordinates are treated as Cartesian with latitude on the x axis; no
//! geodesic correction is applied.

use crate::math::geometry::{is_left_turn, lexicographic};
use crate::prelude::{DegenerateHullError, GeoPoint};

/// Andrew's monotone chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct HullBuilder;

impl HullBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Counter-clockwise hull vertices starting from the lowest
    /// (latitude, longitude) point, without a repeated closing vertex.
    pub fn build(&self, points: &[GeoPoint]) -> Result<Vec<GeoPoint>, DegenerateHullError> {
        let mut sorted = points.to_vec();
        sorted.sort_by(lexicographic);
        sorted.dedup();

        if sorted.len() < 3 {
            return Err(DegenerateHullError::TooFewPoints(sorted.len()));
        }

        let mut lower = half_hull(sorted.iter().copied());
        let mut upper = half_hull(sorted.iter().rev().copied());
        lower.pop();
        upper.pop();
        lower.extend(upper);

        if lower.len() < 3 {
            return Err(DegenerateHullError::Collinear);
        }
        Ok(lower)
    }
}

fn half_hull(points: impl Iterator<Item = GeoPoint>) -> Vec<GeoPoint> {
    let mut chain: Vec<GeoPoint> = Vec::new();
    for point in points {
        while chain.len() >= 2 && !is_left_turn(chain[chain.len() - 2], chain[chain.len() - 1], point)
        {
            chain.pop();
        }
        chain.push(point);
    }
    chain
}
