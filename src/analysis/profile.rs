use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::analysis::AnalysisError;
use crate::traffic::TrafficPoint;

pub const HOURS_PER_DAY: usize = 24;

/// Standard deviation of the hourly perturbation, as a fraction of the mean bandwidth.
pub const DEFAULT_NOISE_RATIO: f64 = 0.1;

/// Lowest bandwidth a synthesized hour may take, in Mbps.
pub const MIN_HOURLY_MBPS: f64 = 0.1;

// (first hour, last hour, multiplier), bounds inclusive
const DAYPART_ADJUSTMENTS: [(u32, u32, f64); 4] = [
    (8, 10, 1.3),  // morning peak
    (14, 16, 1.2), // afternoon peak
    (19, 21, 1.4), // evening peak
    (0, 5, 0.3),   // night low
];

/// Hourly bandwidth curve. `hours` and `bandwidth` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    hours: Vec<f64>,
    bandwidth: Vec<f64>,
}

impl Profile {
    /// Build a profile from parallel columns.
    ///
    /// Hours must be finite and strictly increasing, bandwidth values finite.
    pub fn new(hours: Vec<f64>, bandwidth: Vec<f64>) -> Result<Self, String> {
        if hours.len() != bandwidth.len() {
            return Err(format!(
                "{} hours but {} bandwidth values",
                hours.len(),
                bandwidth.len()
            ));
        }
        if let Some(bad) = hours.iter().chain(bandwidth.iter()).find(|v| !v.is_finite()) {
            return Err(format!("non-finite value {}", bad));
        }
        if let Some(pair) = hours.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(format!("hours not increasing: {} then {}", pair[0], pair[1]));
        }

        Ok(Self { hours, bandwidth })
    }

    /// One point per whole hour of the day, starting at 0.
    pub fn hourly(bandwidth: Vec<f64>) -> Result<Self, String> {
        let hours = (0..bandwidth.len()).map(|h| h as f64).collect();
        Self::new(hours, bandwidth)
    }

    pub fn hours(&self) -> &[f64] {
        &self.hours
    }

    pub fn bandwidth(&self) -> &[f64] {
        &self.bandwidth
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.hours.iter().copied().zip(self.bandwidth.iter().copied())
    }
}

/// Turns an aggregated series into a stylized 24-hour profile.
pub struct ProfileSynthesizer {
    noise_ratio: f64,
}

impl ProfileSynthesizer {
    pub fn new() -> Self {
        Self {
            noise_ratio: DEFAULT_NOISE_RATIO,
        }
    }

    /// Use a different perturbation amplitude. `0.0` makes synthesis deterministic.
    pub fn with_noise_ratio(noise_ratio: f64) -> Self {
        Self { noise_ratio }
    }

    pub fn noise_ratio(&self) -> f64 {
        self.noise_ratio
    }

    /// Diurnal shape for a whole hour: a sine wave rising after 06:00, with fixed
    /// multipliers for the peak and night bands.
    pub fn diurnal_factor(hour: u32) -> f64 {
        let phase = PI * (hour as f64 - 6.0) / 12.0;
        let mut factor = 0.4 + 0.6 * (0.5 + 0.5 * phase.sin());

        for (first, last, multiplier) in DAYPART_ADJUSTMENTS {
            if (first..=last).contains(&hour) {
                factor *= multiplier;
            }
        }

        factor
    }

    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        points: &[TrafficPoint],
        rng: &mut R,
    ) -> Result<Profile, AnalysisError> {
        if points.is_empty() {
            return Err(AnalysisError::InsufficientData { needed: 1, found: 0 });
        }

        let average = points.iter().map(|p| p.bandwidth_mbps).sum::<f64>() / points.len() as f64;
        let sigma = (average * self.noise_ratio).abs();
        let noise = Normal::new(0.0, sigma).map_err(|e| AnalysisError::Noise(e.to_string()))?;

        let mut hours = Vec::with_capacity(HOURS_PER_DAY);
        let mut bandwidth = Vec::with_capacity(HOURS_PER_DAY);
        for hour in 0..HOURS_PER_DAY as u32 {
            let value = average * Self::diurnal_factor(hour) + noise.sample(rng);
            hours.push(hour as f64);
            bandwidth.push(value.max(MIN_HOURLY_MBPS));
        }

        log::info!(
            "Generated 24-hour traffic pattern from {} intervals (mean {:.3} Mbps)",
            points.len(),
            average
        );

        Ok(Profile { hours, bandwidth })
    }
}

impl Default for ProfileSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn series(values: &[f64]) -> Vec<TrafficPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &bandwidth_mbps)| TrafficPoint {
                timestamp: i as f64 * 300.0,
                bandwidth_mbps,
                packet_count: 1,
            })
            .collect()
    }

    #[test]
    fn test_profile_rejects_mismatched_columns() {
        assert!(Profile::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(Profile::new(vec![1.0, 1.0], vec![1.0, 2.0]).is_err());
        assert!(Profile::new(vec![0.0], vec![f64::NAN]).is_err());
        assert!(Profile::new(Vec::new(), Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_diurnal_factor_bands() {
        // 06:00 sits on the sine midpoint, just past the night band
        assert!((ProfileSynthesizer::diurnal_factor(6) - 0.7).abs() < 1e-12);
        assert!((ProfileSynthesizer::diurnal_factor(0) - 0.4 * 0.3).abs() < 1e-12);
        // 12:00 is the sine peak, no band
        assert!((ProfileSynthesizer::diurnal_factor(12) - 1.0).abs() < 1e-12);
        let base_20 = 0.4 + 0.6 * (0.5 + 0.5 * (PI * 14.0 / 12.0).sin());
        assert!((ProfileSynthesizer::diurnal_factor(20) - base_20 * 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_synthesize_empty_series() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = ProfileSynthesizer::new().synthesize(&[], &mut rng).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { needed: 1, found: 0 });
    }

    #[test]
    fn test_synthesize_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let profile = ProfileSynthesizer::new()
            .synthesize(&series(&[2.0, 4.0]), &mut rng)
            .unwrap();

        assert_eq!(profile.len(), HOURS_PER_DAY);
        assert_eq!(profile.bandwidth().len(), HOURS_PER_DAY);
        for (i, hour) in profile.hours().iter().enumerate() {
            assert_eq!(*hour, i as f64);
        }
        assert!(profile.bandwidth().iter().all(|&bw| bw >= MIN_HOURLY_MBPS));
    }

    #[test]
    fn test_synthesize_without_noise() {
        let mut rng = StdRng::seed_from_u64(0);
        let profile = ProfileSynthesizer::with_noise_ratio(0.0)
            .synthesize(&series(&[1.0, 3.0]), &mut rng)
            .unwrap();

        for (hour, bw) in profile.points() {
            let expected = (2.0 * ProfileSynthesizer::diurnal_factor(hour as u32)).max(MIN_HOURLY_MBPS);
            assert!((bw - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_synthesize_is_reproducible_with_seed() {
        let points = series(&[5.0, 6.0, 7.0]);
        let synthesizer = ProfileSynthesizer::new();
        let first = synthesizer.synthesize(&points, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = synthesizer.synthesize(&points, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_synthesize_floors_low_traffic() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = ProfileSynthesizer::with_noise_ratio(0.0)
            .synthesize(&series(&[0.0]), &mut rng)
            .unwrap();
        assert!(profile.bandwidth().iter().all(|&bw| bw == MIN_HOURLY_MBPS));
    }
}
