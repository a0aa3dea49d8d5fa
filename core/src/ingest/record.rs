//! Row-level parsing for the two observation CSV schemas.
//!
//! Each schema is a distinct parser variant chosen up front from a
//! [`Schema`] tag. Rows that fail to parse yield a [`RowParseError`]; callers
//! skip them and carry on with the next row.

use crate::ingest::fields;
use crate::model::{Observation, ObservedCellIds, Schema};
use crate::prelude::{GeoPoint, RowParseError, RowResult};
use csv::StringRecord;

const LEGACY_LATITUDE: usize = 0;
const LEGACY_LONGITUDE: usize = 1;
const LEGACY_ALTITUDE: usize = 2;
const LEGACY_CELL_ID: usize = 6;
const LEGACY_SIGNAL: usize = 7;
const LEGACY_MIN_FIELDS: usize = LEGACY_SIGNAL + 1;

/// Column positions of a `current` schema file, resolved from its header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentLayout {
    lat: Option<usize>,
    lon: Option<usize>,
    altitude: Option<usize>,
    cell_id: Option<usize>,
    net_type: Option<usize>,
    rsrp: Option<usize>,
    rssi: Option<usize>,
}

impl CurrentLayout {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|header| header.trim() == name);
        Self {
            lat: find("lat"),
            lon: find("lon"),
            altitude: find("altitude"),
            cell_id: find("cell_id"),
            net_type: find("net_type"),
            rsrp: find("rsrp"),
            rssi: find("rssi"),
        }
    }

    fn parse_point(&self, row: &StringRecord) -> RowResult<GeoPoint> {
        let latitude = fields::latitude(fields::required(row, self.lat, "lat")?)?;
        let longitude = fields::longitude(fields::required(row, self.lon, "lon")?)?;
        Ok(GeoPoint::new(latitude, longitude))
    }

    fn parse(&self, row: &StringRecord) -> RowResult<Observation> {
        let point = self.parse_point(row)?;
        let altitude = fields::altitude(fields::optional(row, self.altitude))?;
        let cell_id = fields::integer("cell_id", fields::required(row, self.cell_id, "cell_id")?)?;

        let is_lte = fields::optional(row, self.net_type) == Some("LTE");
        let signal = if is_lte {
            fields::integer("rsrp", fields::required(row, self.rsrp, "rsrp")?)?
        } else {
            fields::integer("rssi", fields::required(row, self.rssi, "rssi")?)?
        };

        Ok(Observation {
            latitude: point.latitude(),
            longitude: point.longitude(),
            altitude,
            cell_id,
            signal,
        })
    }
}

/// Converts raw CSV rows into [`Observation`]s for one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordParser {
    Legacy,
    Current(CurrentLayout),
}

impl RecordParser {
    pub fn legacy() -> Self {
        RecordParser::Legacy
    }

    pub fn current(headers: &StringRecord) -> Self {
        RecordParser::Current(CurrentLayout::from_headers(headers))
    }

    pub fn schema(&self) -> Schema {
        match self {
            RecordParser::Legacy => Schema::Legacy,
            RecordParser::Current(_) => Schema::Current,
        }
    }

    /// Parses one row, recording its cell id into `seen` on success.
    pub fn parse(&self, row: &StringRecord, seen: &mut ObservedCellIds) -> RowResult<Observation> {
        let observation = match self {
            RecordParser::Legacy => parse_legacy(row)?,
            RecordParser::Current(layout) => layout.parse(row)?,
        };
        seen.record(observation.cell_id);
        Ok(observation)
    }

    /// Position of a row, ignoring every other column.
    pub fn parse_point(&self, row: &StringRecord) -> RowResult<GeoPoint> {
        match self {
            RecordParser::Legacy => {
                let latitude =
                    fields::latitude(fields::required(row, Some(LEGACY_LATITUDE), "lat")?)?;
                let longitude =
                    fields::longitude(fields::required(row, Some(LEGACY_LONGITUDE), "lon")?)?;
                Ok(GeoPoint::new(latitude, longitude))
            }
            RecordParser::Current(layout) => layout.parse_point(row),
        }
    }
}

fn parse_legacy(row: &StringRecord) -> RowResult<Observation> {
    if row.len() < LEGACY_MIN_FIELDS {
        return Err(RowParseError::ShortRow {
            expected: LEGACY_MIN_FIELDS,
            found: row.len(),
        });
    }

    let latitude = fields::latitude(fields::required(row, Some(LEGACY_LATITUDE), "lat")?)?;
    let longitude = fields::longitude(fields::required(row, Some(LEGACY_LONGITUDE), "lon")?)?;
    let altitude = fields::altitude(fields::optional(row, Some(LEGACY_ALTITUDE)))?;
    let cell_id = fields::integer(
        "cell_id",
        fields::required(row, Some(LEGACY_CELL_ID), "cell_id")?,
    )?;
    let signal = fields::integer(
        "signal",
        fields::required(row, Some(LEGACY_SIGNAL), "signal")?,
    )?;

    Ok(Observation {
        latitude,
        longitude,
        altitude,
        cell_id,
        signal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    fn current_parser() -> RecordParser {
        RecordParser::current(&record(&[
            "time", "lat", "lon", "altitude", "net_type", "cell_id", "rsrp", "rssi",
        ]))
    }

    #[test]
    fn legacy_row_maps_positional_columns() {
        let mut seen = ObservedCellIds::new();
        let row = record(&["43.041169", "12.560277", "310", "x", "y", "z", "22801", "-87"]);
        let observation = RecordParser::legacy().parse(&row, &mut seen).unwrap();
        assert_eq!(
            observation,
            Observation {
                latitude: 43.041169,
                longitude: 12.560277,
                altitude: Some(310),
                cell_id: 22801,
                signal: -87,
            }
        );
        assert!(seen.contains(22801));
    }

    #[test]
    fn legacy_short_row_is_rejected_without_recording() {
        let mut seen = ObservedCellIds::new();
        let row = record(&["43.0", "12.5", "300", "a", "b", "c", "7"]);
        assert_eq!(
            RecordParser::legacy().parse(&row, &mut seen),
            Err(RowParseError::ShortRow {
                expected: 8,
                found: 7
            })
        );
        assert!(seen.is_empty());
    }

    #[test]
    fn legacy_header_row_is_rejected() {
        let mut seen = ObservedCellIds::new();
        let row = record(&["lat", "lon", "alt", "a", "b", "c", "cell", "signal"]);
        assert!(matches!(
            RecordParser::legacy().parse(&row, &mut seen),
            Err(RowParseError::InvalidNumber { field: "latitude", .. })
        ));
    }

    #[test]
    fn current_lte_row_uses_rsrp() {
        let mut seen = ObservedCellIds::new();
        let row = record(&["t0", "43.0", "12.5", "251.8", "LTE", "7", "-101", "-71"]);
        let observation = current_parser().parse(&row, &mut seen).unwrap();
        assert_eq!(observation.signal, -101);
        assert_eq!(observation.altitude, Some(251));
        assert_eq!(observation.cell_id, 7);
    }

    #[test]
    fn current_non_lte_row_uses_rssi() {
        let mut seen = ObservedCellIds::new();
        let row = record(&["t0", "43.0", "12.5", "", "UMTS", "8", "", "-71"]);
        let observation = current_parser().parse(&row, &mut seen).unwrap();
        assert_eq!(observation.signal, -71);
        assert_eq!(observation.altitude, None);
    }

    #[test]
    fn current_row_missing_signal_is_rejected() {
        let mut seen = ObservedCellIds::new();
        let row = record(&["t0", "43.0", "12.5", "250", "LTE", "7", "", "-71"]);
        assert_eq!(
            current_parser().parse(&row, &mut seen),
            Err(RowParseError::MissingField("rsrp"))
        );
        assert!(seen.is_empty());
    }

    #[test]
    fn current_garbled_and_out_of_range_rows_are_rejected() {
        let mut seen = ObservedCellIds::new();
        let parser = current_parser();
        let garbled = record(&["t0", "forty", "12.5", "250", "LTE", "7", "-90", ""]);
        let polar = record(&["t0", "95.0", "12.5", "250", "LTE", "7", "-90", ""]);
        let truncated = record(&["t0", "43.0"]);
        assert!(parser.parse(&garbled, &mut seen).is_err());
        assert!(matches!(
            parser.parse(&polar, &mut seen),
            Err(RowParseError::OutOfRange { field: "latitude", .. })
        ));
        assert_eq!(
            parser.parse(&truncated, &mut seen),
            Err(RowParseError::MissingField("lon"))
        );
    }

    #[test]
    fn point_survives_missing_cell_and_signal() {
        let mut seen = ObservedCellIds::new();
        let parser = current_parser();
        let row = record(&["t0", "43.0", "12.5", "", "LTE", "", "", ""]);
        assert!(parser.parse(&row, &mut seen).is_err());
        assert_eq!(parser.parse_point(&row), Ok(GeoPoint::new(43.0, 12.5)));

        let short = record(&["43.1", "12.6", "300"]);
        assert_eq!(
            RecordParser::legacy().parse_point(&short),
            Ok(GeoPoint::new(43.1, 12.6))
        );
        assert!(RecordParser::legacy()
            .parse_point(&record(&["lat", "lon"]))
            .is_err());
    }

    #[test]
    fn current_layout_without_column_rejects_every_row() {
        let mut seen = ObservedCellIds::new();
        let parser = RecordParser::current(&record(&["lat", "lon", "rssi"]));
        let row = record(&["43.0", "12.5", "-70"]);
        assert_eq!(
            parser.parse(&row, &mut seen),
            Err(RowParseError::MissingField("cell_id"))
        );
        assert_eq!(parser.schema(), Schema::Current);
    }
}
