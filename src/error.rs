//! Error types for catalog loading and scoring input

use std::path::PathBuf;

use thiserror::Error;

/// Failures while locating or reading a planet catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("catalog file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read catalog {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed catalog row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("no PSCompPars_*.csv export found under {}", .0.display())]
    NoCatalogFound(PathBuf),

    #[error("invalid catalog file pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Telescope diameter outside the supported aperture range
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("telescope diameter {value} m is outside the supported range {min}..={max} m")]
pub struct InvalidDiameter {
    pub value: u32,
    pub min: u32,
    pub max: u32,
}
