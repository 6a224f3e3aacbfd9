//! Data models for catalog rows, telescope parameters and scoring results

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::InvalidDiameter;

/// One exoplanet row from the archive's planetary-systems composite table.
///
/// Numeric fields are `None` when the archive leaves them blank or the
/// value is not a number. Fields missing from a short row take their
/// default (empty text, `None`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlanetRecord {
    #[serde(rename = "pl_name")]
    pub planet_name: String,
    #[serde(rename = "hostname")]
    pub host_star_name: String,
    #[serde(rename = "discoverymethod")]
    pub discovery_method: String,
    #[serde(rename = "disc_year", deserialize_with = "lenient_number")]
    pub discovery_year: Option<i32>,
    #[serde(rename = "pl_rade", deserialize_with = "lenient_number")]
    pub planet_radius: Option<f64>, // Earth radii
    #[serde(rename = "st_rad", deserialize_with = "lenient_number")]
    pub stellar_radius: Option<f64>, // Solar radii
    #[serde(rename = "pl_orbsmax", deserialize_with = "lenient_number")]
    pub planet_star_distance: Option<f64>, // AU
    #[serde(rename = "sy_dist", deserialize_with = "lenient_number")]
    pub system_distance: Option<f64>, // pc
}

/// Blank or unparseable values become `None`; surrounding spaces are ignored
fn lenient_number<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(de)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Archive column names a catalog must provide, in display order
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "pl_name",
    "hostname",
    "discoverymethod",
    "disc_year",
    "pl_rade",
    "st_rad",
    "pl_orbsmax",
    "sy_dist",
];

/// Ordered, read-only planet catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<PlanetRecord>,
}

impl Catalog {
    pub fn new(records: Vec<PlanetRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PlanetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlanetRecord> {
        self.records.get(index)
    }

    /// Case-insensitive lookup by planet name
    pub fn find_by_name(&self, name: &str) -> Option<(usize, &PlanetRecord)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.planet_name.eq_ignore_ascii_case(name.trim()))
    }
}

impl FromIterator<PlanetRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = PlanetRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Primary mirror diameter in meters, limited to the range the navigator models
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TelescopeDiameter(u32);

impl TelescopeDiameter {
    pub const MIN_M: u32 = 5;
    pub const MAX_M: u32 = 15;

    pub fn new(meters: u32) -> Result<Self, InvalidDiameter> {
        if (Self::MIN_M..=Self::MAX_M).contains(&meters) {
            Ok(Self(meters))
        } else {
            Err(InvalidDiameter {
                value: meters,
                min: Self::MIN_M,
                max: Self::MAX_M,
            })
        }
    }

    pub fn meters(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Every supported diameter from `MIN_M` to `MAX_M`
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN_M..=Self::MAX_M).map(Self)
    }
}

impl Default for TelescopeDiameter {
    /// 6 m, the HWO reference design point
    fn default() -> Self {
        Self(6)
    }
}

impl std::fmt::Display for TelescopeDiameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.0)
    }
}

/// Metrics derived from a record for one telescope diameter.
/// `None` marks an undefined metric (missing input or zero divisor).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedMetrics {
    pub limiting_distance: Option<f64>, // pc, "ES_max"
    pub signal_noise_ratio: Option<f64>,
}

/// A catalog row paired with its metrics for the current diameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlanet<'a> {
    pub index: usize, // position in the catalog
    pub record: &'a PlanetRecord,
    pub metrics: DerivedMetrics,
}

/// Candidate counts for one diameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateSummary {
    pub diameter: TelescopeDiameter,
    pub total_count: usize,
    pub candidate_count: usize,
    /// Rounded to two decimals; `None` for an empty catalog
    pub candidate_percentage: Option<f64>,
}

/// Read-only projection of one selected planet for the detail view
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetDetail {
    pub planet_name: String,
    pub host_star_name: String,
    pub discovery_method: String,
    pub discovery_year: Option<String>,
    pub planet_radius: Option<f64>,
    pub stellar_radius: Option<f64>,
    pub planet_star_distance: Option<f64>,
    pub system_distance: Option<f64>,
    pub limiting_distance: Option<f64>,
    pub signal_noise_ratio: Option<f64>,
    pub is_candidate: bool,
}

impl PlanetDetail {
    pub fn from_scored(planet: &ScoredPlanet<'_>, is_candidate: bool) -> Self {
        let r = planet.record;
        Self {
            planet_name: r.planet_name.clone(),
            host_star_name: r.host_star_name.clone(),
            discovery_method: r.discovery_method.clone(),
            discovery_year: r.discovery_year.map(|y| y.to_string()),
            planet_radius: r.planet_radius,
            stellar_radius: r.stellar_radius,
            planet_star_distance: r.planet_star_distance,
            system_distance: r.system_distance,
            limiting_distance: planet.metrics.limiting_distance,
            signal_noise_ratio: planet.metrics.signal_noise_ratio,
            is_candidate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diameter_range_is_enforced() {
        assert!(TelescopeDiameter::new(5).is_ok());
        assert!(TelescopeDiameter::new(15).is_ok());
        let err = TelescopeDiameter::new(4).unwrap_err();
        assert_eq!(err.value, 4);
        assert!(TelescopeDiameter::new(16).is_err());
        assert_eq!(TelescopeDiameter::all().count(), 11);
        assert_eq!(TelescopeDiameter::default().meters(), 6);
    }
}
