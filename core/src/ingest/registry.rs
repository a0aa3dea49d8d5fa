use crate::ingest::fields;
use crate::model::{ObservedCellIds, Tower};
use crate::prelude::{RowParseError, RowResult, SourceReadError};
use crate::telemetry::log::LogManager;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const CELL_ID: usize = 1;
const LATITUDE: usize = 4;
const LONGITUDE: usize = 5;
const MIN_FIELDS: usize = LONGITUDE + 1;

/// Towers read from one or more semicolon-delimited registry files.
#[derive(Debug, Default)]
pub struct TowerRegistry {
    towers: Vec<Tower>,
    skipped: usize,
}

impl TowerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `<f0>;<cell_id>;<f2>;<f3>;<lat>;<lon>;...`.
    pub fn parse_line(line: &str) -> RowResult<Tower> {
        Self::parse_record(&StringRecord::from(line.split(';').collect::<Vec<_>>()))
    }

    pub fn parse_record(record: &StringRecord) -> RowResult<Tower> {
        if record.len() < MIN_FIELDS {
            return Err(RowParseError::ShortRow {
                expected: MIN_FIELDS,
                found: record.len(),
            });
        }
        let cell_id = fields::integer("cell_id", fields::required(record, Some(CELL_ID), "cell_id")?)?;
        let latitude = fields::latitude(fields::required(record, Some(LATITUDE), "lat")?)?;
        let longitude = fields::longitude(fields::required(record, Some(LONGITUDE), "lon")?)?;
        Ok(Tower::new(latitude, longitude, cell_id))
    }

    /// Appends every parseable line of `reader`; returns how many towers were added.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<usize, csv::Error> {
        let logger = LogManager::new("registry");
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let before = self.towers.len();
        for result in csv_reader.records() {
            let parsed = match result {
                Ok(record) => Self::parse_record(&record),
                Err(err) if err.is_io_error() => return Err(err),
                Err(err) => Err(RowParseError::Undecodable(err.to_string())),
            };
            match parsed {
                Ok(tower) => self.towers.push(tower),
                Err(err) => {
                    logger.detail(&format!("registry line skipped: {}", err));
                    self.skipped += 1;
                }
            }
        }
        Ok(self.towers.len() - before)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<usize, SourceReadError> {
        let file = File::open(path).map_err(|err| SourceReadError::Open {
            path: path.to_path_buf(),
            source: err,
        })?;
        let added = self.load(file).map_err(|err| SourceReadError::Read {
            path: path.to_path_buf(),
            source: err,
        })?;
        LogManager::new("registry").record(&format!("{}: {} towers", path.display(), added));
        Ok(added)
    }

    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    /// Lines discarded so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Keeps towers whose cell id was observed, in registry order.
    pub fn retain_observed(self, observed: &ObservedCellIds) -> Vec<Tower> {
        self.towers
            .into_iter()
            .filter(|tower| observed.contains(tower.cell_id))
            .collect()
    }
}

impl FromIterator<Tower> for TowerRegistry {
    fn from_iter<I: IntoIterator<Item = Tower>>(iter: I) -> Self {
        Self {
            towers: iter.into_iter().collect(),
            skipped: 0,
        }
    }
}
