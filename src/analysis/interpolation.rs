use crate::analysis::{AnalysisError, Profile};

/// Hours closer than this to a profile point return that point verbatim.
pub const EXACT_MATCH_TOLERANCE: f64 = 0.01;

/// Upper bound for any estimate, in Mbps.
pub const DEFAULT_CEILING_MBPS: f64 = 10.0;

/// Replacement for a negative estimate, in Mbps.
pub const NEGATIVE_FLOOR_MBPS: f64 = 0.1;

/// Local estimator over a [`Profile`].
///
/// Only the two points bracketing the target contribute, so the estimate never
/// oscillates the way a single polynomial through every hour would.
pub struct Interpolator {
    ceiling_mbps: f64,
}

impl Interpolator {
    pub fn new() -> Self {
        Self {
            ceiling_mbps: DEFAULT_CEILING_MBPS,
        }
    }

    pub fn with_ceiling(ceiling_mbps: f64) -> Self {
        Self { ceiling_mbps }
    }

    pub fn ceiling_mbps(&self) -> f64 {
        self.ceiling_mbps
    }

    /// Estimate bandwidth at a fractional hour.
    ///
    /// Targets outside the profile's span take the nearest boundary value. Every
    /// result, exact matches included, is clamped to `[0.1, ceiling]` when it would
    /// otherwise fall below zero or above the ceiling. A profile point above the
    /// ceiling therefore comes back as the ceiling, not verbatim; raise it with
    /// [`Interpolator::with_ceiling`] to get such points back unchanged.
    pub fn interpolate(&self, profile: &Profile, target_hour: f64) -> Result<f64, AnalysisError> {
        if profile.is_empty() {
            return Err(AnalysisError::InsufficientData { needed: 1, found: 0 });
        }

        let hours = profile.hours();
        let bandwidth = profile.bandwidth();

        let last = hours.len() - 1;
        let exact = hours.iter().position(|&h| (h - target_hour).abs() < EXACT_MATCH_TOLERANCE);

        let raw = if let Some(i) = exact {
            bandwidth[i]
        } else if target_hour.is_nan() || target_hour <= hours[0] {
            bandwidth[0]
        } else if target_hour >= hours[last] {
            bandwidth[last]
        } else {
            // hours[0] < target < hours[last], so an upper neighbour exists past index 0
            let upper = hours.partition_point(|&h| h < target_hour);
            let lower = upper - 1;
            let (x0, y0) = (hours[lower], bandwidth[lower]);
            let (x1, y1) = (hours[upper], bandwidth[upper]);
            y0 + (y1 - y0) * (target_hour - x0) / (x1 - x0)
        };

        Ok(self.clamp(raw))
    }

    fn clamp(&self, value: f64) -> f64 {
        if value < 0.0 {
            NEGATIVE_FLOOR_MBPS
        } else {
            value.min(self.ceiling_mbps)
        }
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}
