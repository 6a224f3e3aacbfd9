//! Catalog loading from NASA Exoplanet Archive CSV exports
//!
//! Reads the planetary-systems composite table (`PSCompPars_*.csv`),
//! keeping only the columns the navigator scores on. Blank or non-numeric
//! values become `None` rather than failing the load.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::DataLoadError;
use crate::models::{Catalog, PlanetRecord, REQUIRED_COLUMNS};

/// Load a catalog from a CSV file on disk
pub fn load_catalog(path: &Path) -> Result<Catalog, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| DataLoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = read_catalog(file)?;
    info!(
        path = %path.display(),
        planets = catalog.len(),
        "Loaded planet catalog"
    );
    Ok(catalog)
}

/// Parse a catalog from any CSV source.
///
/// Lines starting with `#` are skipped (archive exports begin with a
/// provenance block). Extra columns are ignored; every column in
/// [`REQUIRED_COLUMNS`] must be present. Short rows load with their
/// missing trailing fields undefined. Only header names are trimmed.
pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog, DataLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (row_idx, result) in reader.deserialize::<PlanetRecord>().enumerate() {
        let record = result.map_err(|e| DataLoadError::MalformedRow {
            row: row_idx + 1,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    let incomplete = records.iter().filter(|r| !is_complete(r)).count();
    if incomplete > 0 {
        debug!(incomplete, "Catalog rows with undefined numeric fields");
    }

    Ok(Catalog::new(records))
}

fn is_complete(record: &PlanetRecord) -> bool {
    record.planet_radius.is_some()
        && record.stellar_radius.is_some()
        && record.planet_star_distance.is_some()
        && record.system_distance.is_some()
}

/// Find the newest archive export under `data_dir`.
///
/// Export names carry their creation time, e.g.
/// `PSCompPars_2024.10.05_02.57.49.csv`; the latest timestamp wins.
pub fn find_latest_catalog(data_dir: &Path) -> Result<PathBuf, DataLoadError> {
    if !data_dir.exists() {
        return Err(DataLoadError::FileNotFound(data_dir.to_path_buf()));
    }

    let export_re =
        Regex::new(r"^PSCompPars_(\d{4})\.(\d{2})\.(\d{2})_(\d{2})\.(\d{2})\.(\d{2})\.csv$")?;

    let mut newest: Option<(String, PathBuf)> = None;
    for entry in WalkDir::new(data_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let filename = entry.file_name().to_str().unwrap_or("");
        let Some(cap) = export_re.captures(filename) else {
            continue;
        };

        // Fixed-width fields, so the concatenation sorts chronologically
        let stamp: String = (1..=6).map(|i| &cap[i]).collect();
        debug!(file = %entry.path().display(), %stamp, "Found catalog export");

        let is_newer = match &newest {
            Some((best, best_path)) => (&stamp, entry.path()) > (best, best_path.as_path()),
            None => true,
        };
        if is_newer {
            newest = Some((stamp, entry.path().to_path_buf()));
        }
    }

    match newest {
        Some((_, path)) => Ok(path),
        None => {
            warn!(dir = %data_dir.display(), "No catalog export found");
            Err(DataLoadError::NoCatalogFound(data_dir.to_path_buf()))
        }
    }
}

/// Number of planets per discovery method, most common first
pub fn discovery_method_counts(catalog: &Catalog) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in catalog.records() {
        let method = match record.discovery_method.as_str() {
            "" => "Unknown",
            m => m,
        };
        *counts.entry(method).or_default() += 1;
    }

    let mut list: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(method, count)| (method.to_string(), count))
        .collect();
    list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    list
}
