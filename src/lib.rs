//! HWO Navigator
//!
//! Ranks known exoplanets as direct-imaging targets for the Habitable
//! Worlds Observatory at a chosen telescope diameter.

pub mod calculator;
pub mod catalog;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;

pub use calculator::{score, ScoreReport};
pub use catalog::{find_latest_catalog, load_catalog, read_catalog};
pub use error::{DataLoadError, InvalidDiameter};
pub use models::{
    CandidateSummary, Catalog, DerivedMetrics, PlanetDetail, PlanetRecord, ScoredPlanet,
    TelescopeDiameter,
};
