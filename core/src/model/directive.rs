use crate::prelude::GeoPoint;
use serde::{Deserialize, Serialize};

/// Drawing instruction handed to the external map renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderDirective {
    Polyline {
        points: Vec<GeoPoint>,
        color: String,
        tooltip: String,
    },
    Marker {
        point: GeoPoint,
        radius: f64,
        color: String,
        popup: String,
    },
    Polygon {
        vertices: Vec<GeoPoint>,
        color: String,
        fill_opacity: f64,
    },
}

impl RenderDirective {
    pub fn is_polyline(&self) -> bool {
        matches!(self, RenderDirective::Polyline { .. })
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, RenderDirective::Marker { .. })
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self, RenderDirective::Polygon { .. })
    }
}

/// Colors and sizes used when emitting directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub trail_color: String,
    pub tower_color: String,
    pub tower_radius: f64,
    pub best_tower_color: String,
    pub best_tower_radius: f64,
    pub point_radius: f64,
    pub hull_color: String,
    pub hull_fill_opacity: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            trail_color: "blue".into(),
            tower_color: "gray".into(),
            tower_radius: 4.0,
            best_tower_color: "red".into(),
            best_tower_radius: 10.0,
            point_radius: 3.0,
            hull_color: "purple".into(),
            hull_fill_opacity: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_serializes_with_kind_tag() {
        let directive = RenderDirective::Marker {
            point: GeoPoint::new(43.0, 12.5),
            radius: 3.0,
            color: "#0000ff".into(),
            popup: "cell 7".into(),
        };
        let value = serde_json::to_value(&directive).unwrap();
        assert_eq!(value["kind"], "marker");
        assert_eq!(value["point"][1], 12.5);
    }

    #[test]
    fn style_fills_missing_fields_with_defaults() {
        let style: RenderStyle = serde_json::from_str(r#"{"trail_color":"green"}"#).unwrap();
        assert_eq!(style.trail_color, "green");
        assert_eq!(style.hull_fill_opacity, 0.2);
    }
}
