use crate::ingest::record::RecordParser;
use crate::model::{ObservedCellIds, Schema, Trail};
use crate::prelude::SourceReadError;
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// An observation file and the schema it was written with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSource {
    pub path: PathBuf,
    pub schema: Schema,
    /// Defaults to the file stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ObservationSource {
    pub fn new(path: impl Into<PathBuf>, schema: Schema) -> Self {
        Self {
            path: path.into(),
            schema,
            label: None,
        }
    }

    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| file_stem(&self.path))
    }
}

/// A parsed source together with the cell ids it observed.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub trail: Trail,
    pub cell_ids: ObservedCellIds,
    pub skipped: usize,
}

/// Parses a CSV stream, skipping rows that do not yield an observation.
///
/// Only I/O failures from the underlying reader are returned as errors.
pub fn load_trail<R: Read>(reader: R, schema: Schema, label: &str) -> Result<ParsedSource, csv::Error> {
    let logger = LogManager::new("ingest");
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(schema.has_headers())
        .flexible(true)
        .from_reader(reader);

    let parser = match schema {
        Schema::Legacy => RecordParser::legacy(),
        Schema::Current => RecordParser::current(csv_reader.headers()?),
    };

    let mut cell_ids = ObservedCellIds::new();
    let mut points = Vec::new();
    let mut observations = Vec::new();
    let mut skipped = 0;

    for (index, result) in csv_reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(err),
            Err(err) => {
                logger.detail(&format!("{} row {}: undecodable: {}", label, index, err));
                skipped += 1;
                continue;
            }
        };
        match parser.parse(&row, &mut cell_ids) {
            Ok(observation) => {
                points.push(observation.point());
                observations.push(observation);
            }
            Err(err) => {
                logger.detail(&format!("{} row {}: {}", label, index, err));
                skipped += 1;
                if let Ok(point) = parser.parse_point(&row) {
                    points.push(point);
                }
            }
        }
    }

    logger.record(&format!(
        "{} ({:?}): {} points, {} observations, {} rows skipped, {} cells",
        label,
        schema,
        points.len(),
        observations.len(),
        skipped,
        cell_ids.len()
    ));

    Ok(ParsedSource {
        trail: Trail::new(label, points, observations),
        cell_ids,
        skipped,
    })
}

/// Opens and parses an observation file.
pub fn load_source(source: &ObservationSource) -> Result<ParsedSource, SourceReadError> {
    let file = File::open(&source.path).map_err(|err| SourceReadError::Open {
        path: source.path.clone(),
        source: err,
    })?;
    load_trail(file, source.schema, &source.label()).map_err(|err| SourceReadError::Read {
        path: source.path.clone(),
        source: err,
    })
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::GeoPoint;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CURRENT: &str = "lat,lon,altitude,net_type,cell_id,rsrp,rssi\n\
43.0,12.5,250.4,LTE,7,-100,-70\n\
not-a-number,12.5,250,LTE,7,-100,-70\n\
43.01,12.51,,GSM,9,,-65\n\
43.02\n";

    #[test]
    fn current_stream_skips_malformed_rows() {
        let parsed = load_trail(CURRENT.as_bytes(), Schema::Current, "2023-06-01").unwrap();
        assert_eq!(parsed.trail.label, "2023-06-01");
        assert_eq!(parsed.trail.observations.len(), 2);
        assert_eq!(parsed.skipped, 2);
        assert!(parsed.cell_ids.contains(7));
        assert!(parsed.cell_ids.contains(9));
        assert_eq!(parsed.trail.observations[1].signal, -65);
        assert_eq!(parsed.trail.points.len(), 2);
    }

    #[test]
    fn row_without_cell_id_still_extends_trail() {
        let data = "lat,lon,altitude,net_type,cell_id,rsrp,rssi\n\
43.0,12.5,,LTE,7,-100,\n\
43.005,12.505,,LTE,,,\n\
43.01,12.51,,LTE,7,-90,\n";
        let parsed = load_trail(data.as_bytes(), Schema::Current, "trip").unwrap();
        assert_eq!(parsed.trail.observations.len(), 2);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(
            parsed.trail.points,
            vec![
                GeoPoint::new(43.0, 12.5),
                GeoPoint::new(43.005, 12.505),
                GeoPoint::new(43.01, 12.51),
            ]
        );
    }

    #[test]
    fn legacy_stream_has_no_header() {
        let data = "43.0,12.5,300,a,b,c,7,-80\n43.1,12.6,301,a,b,c,8,-81\n";
        let parsed = load_trail(data.as_bytes(), Schema::Legacy, "old").unwrap();
        assert_eq!(parsed.trail.observations.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.cell_ids.len(), 2);
    }

    #[test]
    fn source_label_defaults_to_file_stem() {
        let source = ObservationSource::new("dataset/2023-05-17.csv", Schema::Current);
        assert_eq!(source.label(), "2023-05-17");
    }

    #[test]
    fn load_source_reads_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(CURRENT.as_bytes()).unwrap();
        let path = temp.into_temp_path();
        let source = ObservationSource {
            path: path.to_path_buf(),
            schema: Schema::Current,
            label: Some("trip".into()),
        };
        let parsed = load_source(&source).unwrap();
        assert_eq!(parsed.trail.label, "trip");
        assert_eq!(parsed.trail.observations.len(), 2);
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let source = ObservationSource::new("/nonexistent/trace.csv", Schema::Legacy);
        assert!(matches!(
            load_source(&source),
            Err(SourceReadError::Open { .. })
        ));
    }
}
