use anyhow::Context;
use celltracecore::ingest::ObservationSource;
use std::fs;
use std::path::{Path, PathBuf};

/// Replaces directory entries with the `*.csv` files inside them, sorted by
/// name. File entries pass through untouched.
pub fn expand_sources(entries: &[ObservationSource]) -> anyhow::Result<Vec<ObservationSource>> {
    let mut expanded = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.path.is_dir() {
            for path in csv_files(&entry.path)? {
                expanded.push(ObservationSource::new(path, entry.schema));
            }
        } else {
            expanded.push(entry.clone());
        }
    }
    Ok(expanded)
}

fn csv_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_csv_extension(path))
        .collect();
    files.sort();
    Ok(files)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
