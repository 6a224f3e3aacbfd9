//! Text rendering for scoring results
//!
//! Human-readable column labels live here and are applied only when a
//! result is printed; scoring works on the archive's field names.

use std::fmt;

use crate::calculator::{ScoreReport, SNR_THRESHOLD};
use crate::models::{CandidateSummary, PlanetDetail, ScoredPlanet};

/// Columns of the candidate table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PlanetName,
    HostStarName,
    DiscoveryMethod,
    DiscoveryYear,
    PlanetRadius,
    StellarRadius,
    PlanetStarDistance,
    SystemDistance,
    LimitingDistance,
    SignalNoiseRatio,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::PlanetName,
        Column::HostStarName,
        Column::DiscoveryMethod,
        Column::DiscoveryYear,
        Column::PlanetRadius,
        Column::StellarRadius,
        Column::PlanetStarDistance,
        Column::SystemDistance,
        Column::LimitingDistance,
        Column::SignalNoiseRatio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::PlanetName => "planet name",
            Column::HostStarName => "stellar name",
            Column::DiscoveryMethod => "discovery method",
            Column::DiscoveryYear => "discovery year",
            Column::PlanetRadius => "planetary radius(earth radius)",
            Column::StellarRadius => "stellar radius(solar radius)",
            Column::PlanetStarDistance => "planet-star distance(AU)",
            Column::SystemDistance => "distance to the planetary system(pc)",
            Column::LimitingDistance => "es_max",
            Column::SignalNoiseRatio => "snr",
        }
    }

    fn is_numeric(self) -> bool {
        !matches!(
            self,
            Column::PlanetName | Column::HostStarName | Column::DiscoveryMethod
        )
    }

    fn cell(self, planet: &ScoredPlanet<'_>) -> String {
        let r = planet.record;
        match self {
            Column::PlanetName => r.planet_name.clone(),
            Column::HostStarName => r.host_star_name.clone(),
            Column::DiscoveryMethod => r.discovery_method.clone(),
            Column::DiscoveryYear => r
                .discovery_year
                .map_or_else(|| "n/a".to_string(), |y| y.to_string()),
            Column::PlanetRadius => fmt_value(r.planet_radius, 2),
            Column::StellarRadius => fmt_value(r.stellar_radius, 2),
            Column::PlanetStarDistance => fmt_value(r.planet_star_distance, 4),
            Column::SystemDistance => fmt_value(r.system_distance, 2),
            Column::LimitingDistance => fmt_value(planet.metrics.limiting_distance, 2),
            Column::SignalNoiseRatio => fmt_value(planet.metrics.signal_noise_ratio, 2),
        }
    }
}

fn fmt_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

fn or_unknown<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "unknown".to_string(),
    }
}

/// Render planets as an aligned table with a leading row number.
/// At most `limit` rows are printed when given.
pub fn format_candidate_table(planets: &[ScoredPlanet<'_>], limit: Option<usize>) -> String {
    let shown = limit.map_or(planets.len(), |l| l.min(planets.len()));

    let rows: Vec<Vec<String>> = planets[..shown]
        .iter()
        .map(|p| Column::ALL.iter().map(|c| c.cell(p)).collect())
        .collect();

    let index_width = shown.saturating_sub(1).to_string().len().max(1);
    let widths: Vec<usize> = Column::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|row| row[i].len())
                .max()
                .unwrap_or(0)
                .max(c.label().len())
        })
        .collect();

    let mut output = String::new();
    output.push_str(&" ".repeat(index_width));
    for (c, w) in Column::ALL.iter().zip(&widths) {
        output.push_str(&format!("  {:<w$}", c.label(), w = *w));
    }
    output.push('\n');

    for (n, row) in rows.iter().enumerate() {
        output.push_str(&format!("{:>w$}", n, w = index_width));
        for ((c, w), cell) in Column::ALL.iter().zip(&widths).zip(row) {
            if c.is_numeric() {
                output.push_str(&format!("  {:>w$}", cell, w = *w));
            } else {
                output.push_str(&format!("  {:<w$}", cell, w = *w));
            }
        }
        output.push('\n');
    }

    if shown < planets.len() {
        output.push_str(&format!("... {} more\n", planets.len() - shown));
    }

    output
}

/// Full printout for one scoring run
pub fn format_report(report: &ScoreReport<'_>, limit: Option<usize>) -> String {
    let mut output = format!("{}\n", report.summary);
    if report.candidates.is_empty() {
        output.push_str("No promising candidates at this diameter.\n");
    } else {
        output.push_str(&format_candidate_table(&report.candidates, limit));
    }
    output.push_str(&format!(
        "Filtered by signal-to-noise ratio (SNR) greater than {} and system distance within es_max.\n",
        SNR_THRESHOLD
    ));
    output
}

/// Discovery-method distribution as a bar listing
pub fn format_method_counts(counts: &[(String, usize)]) -> String {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let name_width = counts.iter().map(|(m, _)| m.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (method, count) in counts {
        let share = if total > 0 {
            *count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "{:<w$}  {:>6}  {:>6.2}%  {}\n",
            method,
            count,
            share,
            "#".repeat((share / 2.0).round() as usize),
            w = name_width
        ));
    }
    output.push_str(&format!("{} planets\n", total));
    output
}

impl fmt::Display for CandidateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Telescope diameter: {} ===", self.diameter)?;
        writeln!(f, "Total number of exoplanets:        {}", self.total_count)?;
        writeln!(f, "Number of promising candidates:    {}", self.candidate_count)?;
        match self.candidate_percentage {
            Some(pct) => write!(f, "Percentage of promising candidates: {} %", pct),
            None => write!(f, "Percentage of promising candidates: n/a (empty catalog)"),
        }
    }
}

impl fmt::Display for PlanetDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "You have chosen: {}", self.planet_name)?;
        writeln!(f, "Host star: {}", self.host_star_name)?;
        writeln!(
            f,
            "The planet was discovered {} by {}.",
            or_unknown(&self.discovery_year),
            self.discovery_method
        )?;
        writeln!(
            f,
            "Its planetary radius is {} (earth radius)",
            or_unknown(&self.planet_radius)
        )?;
        writeln!(
            f,
            "and it orbits its star at {} AU distance.",
            or_unknown(&self.planet_star_distance)
        )?;
        writeln!(
            f,
            "The stellar radius is {} (solar radius).",
            or_unknown(&self.stellar_radius)
        )?;
        writeln!(
            f,
            "The planetary system is {} pc away.",
            or_unknown(&self.system_distance)
        )?;
        writeln!(f, "Limiting distance (es_max): {} pc", fmt_value(self.limiting_distance, 2))?;
        writeln!(f, "Signal-to-noise ratio:      {}", fmt_value(self.signal_noise_ratio, 2))?;
        writeln!(f)?;
        writeln!(f, "earth radius = 6,357 km (3,950 mi)")?;
        writeln!(f, "AU (Astronomical unit) = average earth-sun distance")?;
        write!(f, "pc (Parsec) = 3.26 light-years or 206,265 AU")
    }
}
