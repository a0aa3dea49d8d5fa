use crate::prelude::GeoPoint;

/// Cross products with a magnitude at or below this are treated as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-12;

/// Z component of `(a - o) x (b - o)`, latitude as x and longitude as y.
/// Positive for a counter-clockwise turn.
pub fn cross(o: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

pub fn is_left_turn(o: GeoPoint, a: GeoPoint, b: GeoPoint) -> bool {
    cross(o, a, b) > COLLINEAR_EPSILON
}

/// Lexicographic order on (latitude, longitude).
pub fn lexicographic(a: &GeoPoint, b: &GeoPoint) -> std::cmp::Ordering {
    a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_sign_follows_turn_direction() {
        let o = GeoPoint::new(0.0, 0.0);
        let a = GeoPoint::new(1.0, 0.0);
        assert!(is_left_turn(o, a, GeoPoint::new(1.0, 1.0)));
        assert!(!is_left_turn(o, a, GeoPoint::new(1.0, -1.0)));
        assert!(!is_left_turn(o, a, GeoPoint::new(2.0, 0.0)));
    }
}
