//! Candidate scoring for direct-imaging targets
//!
//! Every call recomputes the limiting distance and signal-to-noise ratio
//! for the whole catalog at one telescope diameter, then keeps the planets
//! that are both close enough to resolve and bright enough to detect.

use tracing::debug;

use crate::models::{
    CandidateSummary, Catalog, DerivedMetrics, PlanetDetail, ScoredPlanet, TelescopeDiameter,
};

/// Aperture of the reference design, in meters
pub const REFERENCE_DIAMETER_M: f64 = 6.0;
/// Limiting distance of the reference design for a 1 AU orbit, in parsecs
pub const REFERENCE_LIMITING_DISTANCE_PC: f64 = 15.0;
/// System distance normalisation in the SNR estimate, in parsecs
pub const SNR_DISTANCE_SCALE_PC: f64 = 10.0;
/// Trailing factor of the SNR estimate.
///
/// The published formula is written as a square, but the navigator has
/// always multiplied by 2; kept as-is so candidate lists stay comparable.
pub const SNR_FACTOR: f64 = 2.0;
/// A candidate's SNR must be strictly above this
pub const SNR_THRESHOLD: f64 = 5.0;

fn aperture_scale(diameter: TelescopeDiameter) -> f64 {
    diameter.as_f64() / REFERENCE_DIAMETER_M
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Farthest system distance (pc) at which the planet can still be separated
/// from its star. `None` if the orbit size is unknown or zero.
pub fn limiting_distance(
    planet_star_distance: Option<f64>,
    diameter: TelescopeDiameter,
) -> Option<f64> {
    let ps = nonzero(planet_star_distance)?;
    Some(REFERENCE_LIMITING_DISTANCE_PC * aperture_scale(diameter) / ps).filter(|v| v.is_finite())
}

/// Relative detectability estimate for a planet.
///
/// `None` if any input is unknown, or if the system distance or orbit
/// size is zero.
pub fn signal_noise_ratio(
    stellar_radius: Option<f64>,
    planet_radius: Option<f64>,
    diameter: TelescopeDiameter,
    system_distance: Option<f64>,
    planet_star_distance: Option<f64>,
) -> Option<f64> {
    let rs = stellar_radius?;
    let rp = planet_radius?;
    let es = nonzero(system_distance)?;
    let ps = nonzero(planet_star_distance)?;

    let snr =
        ((rs * rp * aperture_scale(diameter)) / ((es / SNR_DISTANCE_SCALE_PC) * ps)) * SNR_FACTOR;
    Some(snr).filter(|v| v.is_finite())
}

/// Attach metrics for `diameter` to every catalog row, in catalog order
pub fn expand(catalog: &Catalog, diameter: TelescopeDiameter) -> Vec<ScoredPlanet<'_>> {
    catalog
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| ScoredPlanet {
            index,
            record,
            metrics: DerivedMetrics {
                limiting_distance: limiting_distance(record.planet_star_distance, diameter),
                signal_noise_ratio: signal_noise_ratio(
                    record.stellar_radius,
                    record.planet_radius,
                    diameter,
                    record.system_distance,
                    record.planet_star_distance,
                ),
            },
        })
        .collect()
}

/// Both thresholds hold: the system lies within the limiting distance and
/// the SNR clears [`SNR_THRESHOLD`]. Undefined values never pass.
pub fn is_candidate(planet: &ScoredPlanet<'_>) -> bool {
    let within_reach = match (planet.record.system_distance, planet.metrics.limiting_distance) {
        (Some(es), Some(es_max)) => es <= es_max,
        _ => false,
    };
    let detectable = planet
        .metrics
        .signal_noise_ratio
        .is_some_and(|snr| snr > SNR_THRESHOLD);

    within_reach && detectable
}

/// Keep candidate rows, preserving order
pub fn filter_candidates<'a>(expanded: &[ScoredPlanet<'a>]) -> Vec<ScoredPlanet<'a>> {
    expanded.iter().filter(|p| is_candidate(p)).copied().collect()
}

/// Percentage rounded to two decimals, `None` when there is nothing to count
pub fn candidate_percentage(candidate_count: usize, total_count: usize) -> Option<f64> {
    if total_count == 0 {
        return None;
    }
    let pct = candidate_count as f64 / total_count as f64 * 100.0;
    Some(round_half_even(pct, 2))
}

/// Round to `decimals` places against the exact binary value of `value`.
///
/// Ties (values exactly halfway, e.g. 3.125) go to the even digit; a value
/// that only looks halfway after scaling is rounded by the scaling error.
fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if scaled.fract().abs() != 0.5 {
        return scaled.round() / factor;
    }

    // Exact error of the multiplication
    let residual = value.mul_add(factor, -scaled);
    let rounded = if residual > 0.0 {
        scaled.ceil()
    } else if residual < 0.0 {
        scaled.floor()
    } else {
        scaled.round_ties_even()
    };
    rounded / factor
}

/// Result of scoring a catalog at one diameter.
///
/// Borrows the catalog; a new report is built for every diameter.
#[derive(Debug, Clone)]
pub struct ScoreReport<'a> {
    pub expanded: Vec<ScoredPlanet<'a>>,
    pub candidates: Vec<ScoredPlanet<'a>>,
    pub summary: CandidateSummary,
}

impl<'a> ScoreReport<'a> {
    pub fn diameter(&self) -> TelescopeDiameter {
        self.summary.diameter
    }

    /// Detail view for the candidate at `selection` (an index into
    /// `candidates`), if one is selected and in range
    pub fn select(&self, selection: Option<usize>) -> Option<PlanetDetail> {
        let planet = self.candidates.get(selection?)?;
        Some(PlanetDetail::from_scored(planet, true))
    }

    /// Detail view for any catalog row, candidate or not
    pub fn detail_for(&self, catalog_index: usize) -> Option<PlanetDetail> {
        let planet = self.expanded.get(catalog_index)?;
        Some(PlanetDetail::from_scored(planet, is_candidate(planet)))
    }
}

/// Expand, filter and summarize the catalog for one telescope diameter
pub fn score(catalog: &Catalog, diameter: TelescopeDiameter) -> ScoreReport<'_> {
    let expanded = expand(catalog, diameter);
    let candidates = filter_candidates(&expanded);

    let total_count = expanded.len();
    let candidate_count = candidates.len();
    let summary = CandidateSummary {
        diameter,
        total_count,
        candidate_count,
        candidate_percentage: candidate_percentage(candidate_count, total_count),
    };

    debug!(
        diameter = diameter.meters(),
        total_count, candidate_count, "Scored catalog"
    );

    ScoreReport {
        expanded,
        candidates,
        summary,
    }
}

/// Candidate counts for each diameter in `from..=to`
pub fn sweep(
    catalog: &Catalog,
    from: TelescopeDiameter,
    to: TelescopeDiameter,
) -> Vec<CandidateSummary> {
    TelescopeDiameter::all()
        .filter(|d| (from..=to).contains(d))
        .map(|d| score(catalog, d).summary)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanetRecord;
    use approx::assert_relative_eq;

    fn planet(name: &str, rs: f64, rp: f64, ps: f64, es: f64) -> PlanetRecord {
        PlanetRecord {
            planet_name: name.to_string(),
            host_star_name: format!("{name} host"),
            discovery_method: "Transit".to_string(),
            discovery_year: Some(2020),
            planet_radius: Some(rp),
            stellar_radius: Some(rs),
            planet_star_distance: Some(ps),
            system_distance: Some(es),
        }
    }

    fn d(m: u32) -> TelescopeDiameter {
        TelescopeDiameter::new(m).unwrap()
    }

    #[test]
    fn reference_design_point() {
        assert_relative_eq!(limiting_distance(Some(1.0), d(6)).unwrap(), 15.0);
        assert_relative_eq!(limiting_distance(Some(0.5), d(12)).unwrap(), 60.0);
        let snr = signal_noise_ratio(Some(1.0), Some(1.0), d(6), Some(10.0), Some(1.0));
        assert_relative_eq!(snr.unwrap(), 2.0);
    }

    #[test]
    fn zero_or_missing_divisors_are_undefined() {
        assert_eq!(limiting_distance(None, d(6)), None);
        assert_eq!(limiting_distance(Some(0.0), d(6)), None);
        assert_eq!(signal_noise_ratio(Some(1.0), Some(1.0), d(6), Some(0.0), Some(1.0)), None);
        assert_eq!(signal_noise_ratio(Some(1.0), Some(1.0), d(6), Some(10.0), None), None);
        assert_eq!(signal_noise_ratio(None, Some(1.0), d(6), Some(10.0), Some(1.0)), None);
        assert_eq!(signal_noise_ratio(Some(1.0), None, d(6), Some(10.0), Some(1.0)), None);
    }

    #[test]
    fn snr_threshold_is_strict() {
        // rs=2.5, rp=1, ps=1, es=10 at 6 m gives exactly 5
        let catalog = Catalog::new(vec![planet("edge", 2.5, 1.0, 1.0, 10.0)]);
        let report = score(&catalog, d(6));
        assert_relative_eq!(report.expanded[0].metrics.signal_noise_ratio.unwrap(), 5.0);
        assert!(report.candidates.is_empty());
    }

    #[test]
    fn distance_threshold_is_inclusive() {
        // es_max = 15 at 6 m; system sits exactly on it
        let catalog = Catalog::new(vec![planet("edge", 10.0, 1.0, 1.0, 15.0)]);
        let report = score(&catalog, d(6));
        assert_relative_eq!(report.expanded[0].metrics.limiting_distance.unwrap(), 15.0);
        assert_eq!(report.candidates.len(), 1);
    }

    #[test]
    fn candidates_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            planet("first", 2.0, 1.0, 1.0, 5.0),
            planet("dim", 1.0, 1.0, 1.0, 10.0),
            planet("second", 3.0, 2.0, 1.0, 8.0),
        ]);
        let report = score(&catalog, d(6));
        let names: Vec<_> = report
            .candidates
            .iter()
            .map(|p| p.record.planet_name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(report.candidates[1].index, 2);
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(candidate_percentage(1, 3), Some(33.33));
        assert_eq!(candidate_percentage(2, 3), Some(66.67));
        assert_eq!(candidate_percentage(0, 7), Some(0.0));
        assert_eq!(candidate_percentage(0, 0), None);
    }

    #[test]
    fn percentage_ties_round_to_even() {
        // 1/32 of the catalog is exactly 3.125 %
        assert_eq!(candidate_percentage(1, 32), Some(3.12));
        assert_eq!(candidate_percentage(157, 5024), Some(3.12));
        assert_eq!(candidate_percentage(3, 32), Some(9.38));
        assert_eq!(candidate_percentage(5, 32), Some(15.62));
        assert_eq!(candidate_percentage(1, 8), Some(12.5));
    }

    #[test]
    fn near_ties_follow_the_exact_value() {
        // 1.005 is stored just below the half, 0.125 exactly on it
        assert_eq!(round_half_even(1.005, 2), 1.0);
        assert_eq!(round_half_even(0.125, 2), 0.12);
        assert_eq!(round_half_even(0.375, 2), 0.38);
    }

    #[test]
    fn empty_catalog_has_no_percentage() {
        let catalog = Catalog::default();
        let report = score(&catalog, d(6));
        assert_eq!(report.summary.total_count, 0);
        assert_eq!(report.summary.candidate_percentage, None);
        assert_eq!(report.select(Some(0)), None);
    }

    #[test]
    fn selection_projects_candidate_rows() {
        let catalog = Catalog::new(vec![
            planet("dim", 1.0, 1.0, 1.0, 10.0),
            planet("bright", 2.0, 1.0, 1.0, 5.0),
        ]);
        let report = score(&catalog, d(6));

        assert_eq!(report.select(None), None);
        assert_eq!(report.select(Some(1)), None);

        let detail = report.select(Some(0)).unwrap();
        assert_eq!(detail.planet_name, "bright");
        assert_eq!(detail.discovery_year.as_deref(), Some("2020"));
        assert!(detail.is_candidate);
        assert_relative_eq!(detail.signal_noise_ratio.unwrap(), 8.0);

        let dim = report.detail_for(0).unwrap();
        assert!(!dim.is_candidate);
    }

    #[test]
    fn sweep_covers_requested_range() {
        let catalog = Catalog::new(vec![planet("p", 1.0, 1.0, 1.0, 5.0)]);
        let summaries = sweep(&catalog, d(5), d(9));
        let diameters: Vec<u32> = summaries.iter().map(|s| s.diameter.meters()).collect();
        assert_eq!(diameters, vec![5, 6, 7, 8, 9]);
        // snr = 4 * D / 6 > 5 once D >= 8
        let counts: Vec<usize> = summaries.iter().map(|s| s.candidate_count).collect();
        assert_eq!(counts, vec![0, 0, 0, 1, 1]);
    }
}
