pub mod integration;
pub mod interpolation;
pub mod profile;
pub mod statistics;

pub use integration::{Integrator, OddIntervalPolicy};
pub use interpolation::Interpolator;
pub use profile::{Profile, ProfileSynthesizer};
pub use statistics::ProfileStatistics;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: need at least {needed} points, found {found}")]
    InsufficientData { needed: usize, found: usize },

    #[error("No data available. Load raw or processed data first")]
    NoProfile,

    #[error("Invalid noise amplitude: {0}")]
    Noise(String),
}

/// Collapse a failed estimate to `0.0`, logging why.
///
/// A zero coming out of here does not mean the traffic was zero; check availability first.
pub fn or_sentinel(result: Result<f64, AnalysisError>) -> f64 {
    result.unwrap_or_else(|e| {
        log::warn!("{}", e);
        0.0
    })
}
