use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Ingest counters collected over one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestMetrics {
    pub rows_parsed: usize,
    pub rows_skipped: usize,
    pub towers_read: usize,
    pub tower_lines_skipped: usize,
    pub towers_retained: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<IngestMetrics>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(IngestMetrics::default()),
        }
    }

    pub fn record_rows(&self, parsed: usize, skipped: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rows_parsed += parsed;
            metrics.rows_skipped += skipped;
        }
    }

    pub fn record_towers(&self, read: usize, skipped: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.towers_read += read;
            metrics.tower_lines_skipped += skipped;
        }
    }

    pub fn record_retained(&self, retained: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.towers_retained = retained;
        }
    }

    pub fn snapshot(&self) -> IngestMetrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_accumulates_across_sources() {
        let recorder = MetricsRecorder::new();
        recorder.record_rows(10, 2);
        recorder.record_rows(5, 1);
        recorder.record_towers(4, 1);
        recorder.record_retained(2);
        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.rows_parsed, 15);
        assert_eq!(snapshot.rows_skipped, 3);
        assert_eq!(snapshot.towers_read, 4);
        assert_eq!(snapshot.tower_lines_skipped, 1);
        assert_eq!(snapshot.towers_retained, 2);
    }
}
