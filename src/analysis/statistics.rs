use serde::Serialize;

use crate::analysis::Profile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStatistics {
    pub data_points: usize,
    pub average_mbps: f64,
    pub peak_mbps: f64,
    pub minimum_mbps: f64,
}

impl ProfileStatistics {
    /// `None` for an empty profile.
    pub fn from_profile(profile: &Profile) -> Option<Self> {
        let values = profile.bandwidth();
        if values.is_empty() {
            return None;
        }

        let peak_mbps = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let minimum_mbps = values.iter().copied().fold(f64::INFINITY, f64::min);
        let average_mbps = values.iter().sum::<f64>() / values.len() as f64;

        Some(Self {
            data_points: values.len(),
            average_mbps,
            peak_mbps,
            minimum_mbps,
        })
    }

    /// Peak over mean; `0.0` when the mean is zero.
    pub fn peak_to_average(&self) -> f64 {
        if self.average_mbps != 0.0 {
            self.peak_mbps / self.average_mbps
        } else {
            0.0
        }
    }
}
