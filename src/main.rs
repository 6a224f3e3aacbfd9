//! HWO Navigator
//!
//! Finds the exoplanets a direct-imaging telescope of a given diameter
//! could plausibly characterize.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use hwo_navigator::calculator::{self, SNR_THRESHOLD};
use hwo_navigator::{catalog, display, logging, Catalog, TelescopeDiameter};

#[derive(Parser)]
#[command(name = "hwo-navigator")]
#[command(about = "Navigator for the Habitable Worlds Observatory: rank exoplanets by observability")]
struct Cli {
    /// Catalog CSV (defaults to the newest PSCompPars export in --data-dir)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Directory searched for PSCompPars_*.csv exports
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List promising candidates for one telescope diameter
    Score {
        /// Telescope diameter in meters (5-15)
        #[arg(short, long, default_value = "6", value_parser = parse_diameter)]
        diameter: TelescopeDiameter,

        /// Print at most this many candidates
        #[arg(long)]
        limit: Option<usize>,

        /// Show details for the candidate at this row
        #[arg(long)]
        select: Option<usize>,
    },

    /// Candidate counts across a range of diameters
    Sweep {
        #[arg(long, default_value = "5", value_parser = parse_diameter)]
        from: TelescopeDiameter,

        #[arg(long, default_value = "15", value_parser = parse_diameter)]
        to: TelescopeDiameter,
    },

    /// Show details for one planet by name
    Show {
        /// Planet name as listed in the archive (e.g. "HD 189733 b")
        name: String,

        /// Telescope diameter in meters (5-15)
        #[arg(short, long, default_value = "6", value_parser = parse_diameter)]
        diameter: TelescopeDiameter,
    },

    /// Distribution of discovery methods in the catalog
    Methods,
}

fn parse_diameter(s: &str) -> Result<TelescopeDiameter, String> {
    let meters: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number of meters", s))?;
    TelescopeDiameter::new(meters).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let catalog_path = match cli.catalog {
        Some(path) => path,
        None => catalog::find_latest_catalog(&cli.data_dir).with_context(|| {
            format!(
                "No catalog given and none found in {}; pass --catalog <FILE>",
                cli.data_dir.display()
            )
        })?,
    };
    let planets = catalog::load_catalog(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;

    match cli.command {
        Commands::Score {
            diameter,
            limit,
            select,
        } => {
            let report = calculator::score(&planets, diameter);
            println!("{}", display::format_report(&report, limit));

            if let Some(row) = select {
                match report.select(Some(row)) {
                    Some(detail) => println!("{}", detail),
                    None => println!(
                        "No candidate at row {} ({} candidates)",
                        row,
                        report.candidates.len()
                    ),
                }
            }
        }

        Commands::Sweep { from, to } => {
            if from > to {
                bail!("--from ({}) must not exceed --to ({})", from, to);
            }
            println!("{:>10} {:>12} {:>10}", "Diameter", "Candidates", "Percent");
            println!("{}", "-".repeat(34));
            for summary in calculator::sweep(&planets, from, to) {
                let pct = summary
                    .candidate_percentage
                    .map_or_else(|| "n/a".to_string(), |p| format!("{:.2}%", p));
                println!(
                    "{:>10} {:>12} {:>10}",
                    summary.diameter.to_string(),
                    summary.candidate_count,
                    pct
                );
            }
            println!("{} planets in catalog", planets.len());
        }

        Commands::Show { name, diameter } => show_planet(&planets, &name, diameter)?,

        Commands::Methods => {
            let counts = catalog::discovery_method_counts(&planets);
            println!("Distribution of discovery methods:");
            print!("{}", display::format_method_counts(&counts));
        }
    }

    Ok(())
}

fn show_planet(planets: &Catalog, name: &str, diameter: TelescopeDiameter) -> Result<()> {
    let Some((index, _)) = planets.find_by_name(name) else {
        bail!("Planet '{}' not found in catalog", name);
    };

    let report = calculator::score(planets, diameter);
    let detail = report
        .detail_for(index)
        .with_context(|| format!("No scored row for catalog index {}", index))?;

    info!(planet = %detail.planet_name, diameter = diameter.meters(), "Showing planet");
    println!("{}", detail);
    println!();
    if detail.is_candidate {
        println!("Promising candidate at {}.", diameter);
    } else {
        println!(
            "Not a candidate at {} (needs SNR > {} and distance within es_max).",
            diameter, SNR_THRESHOLD
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwo_navigator::PlanetRecord;

    fn catalog() -> Catalog {
        Catalog::new(vec![PlanetRecord {
            planet_name: "Bright b".to_string(),
            host_star_name: "Bright".to_string(),
            discovery_method: "Imaging".to_string(),
            discovery_year: Some(2008),
            planet_radius: Some(1.0),
            stellar_radius: Some(2.0),
            planet_star_distance: Some(1.0),
            system_distance: Some(5.0),
        }])
    }

    #[test]
    fn show_unknown_planet_is_an_error() {
        let err = show_planet(&catalog(), "Nowhere b", TelescopeDiameter::default()).unwrap_err();
        assert!(err.to_string().contains("Nowhere b"));
    }

    #[test]
    fn show_known_planet_succeeds() {
        assert!(show_planet(&catalog(), "bright B", TelescopeDiameter::default()).is_ok());
    }

    #[test]
    fn diameter_argument_is_validated() {
        assert_eq!(parse_diameter(" 8 ").unwrap().meters(), 8);
        assert!(parse_diameter("4").is_err());
        assert!(parse_diameter("6.5").is_err());
    }
}
