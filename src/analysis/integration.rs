use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisError, Profile};

/// Minimum number of profile points Simpson's rule needs.
pub const MIN_POINTS: usize = 3;

/// What to do when the selected points span an odd number of intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OddIntervalPolicy {
    /// Drop the last point so the interval count is even. The dropped span is not integrated.
    #[default]
    DropLast,
    /// Apply Simpson's 3/8 rule to the trailing three intervals.
    ThreeEighths,
}

/// Composite Simpson quadrature over the points of a [`Profile`].
///
/// Integration runs over the selected samples themselves and assumes they are
/// evenly spaced, which holds for any contiguous slice of an hourly profile.
pub struct Integrator {
    odd_intervals: OddIntervalPolicy,
}

impl Integrator {
    pub fn new() -> Self {
        Self {
            odd_intervals: OddIntervalPolicy::default(),
        }
    }

    pub fn with_policy(odd_intervals: OddIntervalPolicy) -> Self {
        Self { odd_intervals }
    }

    pub fn policy(&self) -> OddIntervalPolicy {
        self.odd_intervals
    }

    /// Bandwidth-hours (Mbps x hour) over the profile points with `start <= hour <= end`.
    pub fn integrate(&self, profile: &Profile, start_hour: f64, end_hour: f64) -> Result<f64, AnalysisError> {
        let (x, y): (Vec<f64>, Vec<f64>) = profile
            .points()
            .filter(|&(hour, _)| hour >= start_hour && hour <= end_hour)
            .unzip();

        if x.len() < MIN_POINTS {
            return Err(AnalysisError::InsufficientData {
                needed: MIN_POINTS,
                found: x.len(),
            });
        }

        let intervals = x.len() - 1;
        if intervals % 2 == 0 {
            return Ok(simpson(&x, &y, intervals));
        }

        match self.odd_intervals {
            OddIntervalPolicy::DropLast => {
                log::debug!("Odd interval count {}, dropping hour {}", intervals, x[intervals]);
                Ok(simpson(&x, &y, intervals - 1))
            }
            OddIntervalPolicy::ThreeEighths => {
                let head = intervals - 3;
                let leading = if head > 0 { simpson(&x, &y, head) } else { 0.0 };
                Ok(leading + three_eighths(&x[head..], &y[head..]))
            }
        }
    }

    /// Integral over the whole day, hours 0 through 23.
    pub fn integrate_day(&self, profile: &Profile) -> Result<f64, AnalysisError> {
        self.integrate(profile, 0.0, 23.0)
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}

// Composite Simpson over x[0..=n]; n must be even and positive.
fn simpson(x: &[f64], y: &[f64], n: usize) -> f64 {
    let h = (x[n] - x[0]) / n as f64;
    let mut sum = y[0] + y[n];

    for i in (1..n).step_by(2) {
        sum += 4.0 * y[i];
    }
    for i in (2..n).step_by(2) {
        sum += 2.0 * y[i];
    }

    sum * h / 3.0
}

// Simpson's 3/8 rule over exactly four points.
fn three_eighths(x: &[f64], y: &[f64]) -> f64 {
    let h = (x[3] - x[0]) / 3.0;
    3.0 * h / 8.0 * (y[0] + 3.0 * y[1] + 3.0 * y[2] + y[3])
}
