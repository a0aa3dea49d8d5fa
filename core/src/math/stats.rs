/// Guards the min-max normalization against a zero-width range.
pub const NORMALIZE_EPSILON: f64 = 1e-6;

/// Minimum and maximum of a set of signal readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRange {
    pub min: i32,
    pub max: i32,
}

impl SignalRange {
    /// Returns `None` for an empty input.
    pub fn of<I: IntoIterator<Item = i32>>(signals: I) -> Option<Self> {
        signals.into_iter().fold(None, |range, signal| match range {
            None => Some(Self {
                min: signal,
                max: signal,
            }),
            Some(Self { min, max }) => Some(Self {
                min: min.min(signal),
                max: max.max(signal),
            }),
        })
    }

    /// Maps `signal` into `[0, 1)`; an all-equal range maps everything to 0.
    pub fn normalize(&self, signal: i32) -> f64 {
        let span = f64::from(self.max) - f64::from(self.min);
        (f64::from(signal) - f64::from(self.min)) / (span + NORMALIZE_EPSILON)
    }
}
