use crate::math::{ColorGradient, SignalRange};
use crate::model::Observation;
use serde::{Deserialize, Serialize};

/// A matched observation with its gradient color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    pub tooltip: String,
    pub normalized: f64,
}

/// Min-max normalizes signal strength and maps it through a gradient.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalColorizer {
    gradient: ColorGradient,
}

impl SignalColorizer {
    pub fn new(gradient: ColorGradient) -> Self {
        Self { gradient }
    }

    /// One point per observation, in input order.
    pub fn colorize(&self, observations: &[Observation]) -> Vec<ColorPoint> {
        let Some(range) = SignalRange::of(observations.iter().map(|o| o.signal)) else {
            return Vec::new();
        };
        observations
            .iter()
            .map(|observation| {
                let normalized = range.normalize(observation.signal);
                ColorPoint {
                    latitude: observation.latitude,
                    longitude: observation.longitude,
                    color: self.gradient.hex(normalized),
                    tooltip: format!(
                        "Signal: {} dBm (cell {})",
                        observation.signal, observation.cell_id
                    ),
                    normalized,
                }
            })
            .collect()
    }
}
