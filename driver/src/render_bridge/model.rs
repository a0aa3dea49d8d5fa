use celltracecore::model::{BestTower, RenderDirective};
use celltracecore::telemetry::IngestMetrics;
use celltracecore::{GeoPoint, PipelineOutput};
use serde::{Deserialize, Serialize};

/// Initial map framing for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(43.041169, 12.560277),
            zoom: 12,
        }
    }
}

/// Document exported to the renderer, as a file or over the bridge.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderModel {
    pub view: MapView,
    pub directives: Vec<RenderDirective>,
    pub best: Option<BestTower>,
    pub warnings: Vec<String>,
    pub metrics: IngestMetrics,
}

impl RenderModel {
    pub fn from_output(view: MapView, output: PipelineOutput) -> Self {
        Self {
            view,
            directives: output.directives,
            best: output.best,
            warnings: output.warnings.iter().map(ToString::to_string).collect(),
            metrics: output.metrics,
        }
    }
}
