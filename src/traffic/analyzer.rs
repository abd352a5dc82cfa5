use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::analysis::{
    AnalysisError, Integrator, Interpolator, Profile, ProfileStatistics, ProfileSynthesizer,
};
use crate::capture::{DataError, PacketRecord, RawCsvReader};
use crate::config::AnalysisConfig;
use crate::dataset::{ExportWriter, ProcessedCsv};
use crate::traffic::{PacketAggregator, TrafficPoint};

/// Outcome of a successful raw load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub packets: usize,
    pub intervals: usize,
    pub profile_points: usize,
}

/// Owns the aggregated series and the current profile.
///
/// Every load replaces both wholesale; a failed load leaves them as they were.
/// Estimation methods only read the profile.
pub struct TrafficAnalyzer {
    aggregator: PacketAggregator,
    synthesizer: ProfileSynthesizer,
    interpolator: Interpolator,
    integrator: Integrator,
    rng: StdRng,
    series: Vec<TrafficPoint>,
    profile: Option<Profile>,
}

impl TrafficAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&AnalysisConfig::default())
    }

    pub fn with_config(config: &AnalysisConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            aggregator: PacketAggregator::new(),
            synthesizer: ProfileSynthesizer::with_noise_ratio(config.noise_ratio),
            interpolator: Interpolator::with_ceiling(config.interpolation_ceiling_mbps),
            integrator: Integrator::with_policy(config.odd_intervals),
            rng,
            series: Vec::new(),
            profile: None,
        }
    }

    pub fn load_raw(&mut self, path: &Path) -> Result<LoadSummary, DataError> {
        let records = RawCsvReader::read_file(path)?;
        self.ingest(&records)
    }

    /// Aggregate packets and synthesize a fresh profile from them.
    pub fn ingest(&mut self, records: &[PacketRecord]) -> Result<LoadSummary, DataError> {
        let series = self.aggregator.aggregate(records);
        let profile = self.synthesizer.synthesize(&series, &mut self.rng)?;

        let summary = LoadSummary {
            packets: records.len(),
            intervals: series.len(),
            profile_points: profile.len(),
        };
        self.series = series;
        self.profile = Some(profile);
        Ok(summary)
    }

    /// Replace the profile with one read from a processed CSV. The interval series is
    /// cleared since it no longer describes the profile.
    pub fn load_processed(&mut self, path: &Path) -> Result<usize, DataError> {
        let profile = ProcessedCsv::load(path)?;
        let points = profile.len();
        self.series.clear();
        self.profile = Some(profile);
        Ok(points)
    }

    pub fn save_processed(&self, path: &Path) -> Result<(), DataError> {
        ProcessedCsv::save(path, self.require_profile()?)
    }

    pub fn export(&self, path: &Path) -> Result<(), DataError> {
        ExportWriter::new(&self.interpolator).write(path, self.require_profile()?)
    }

    pub fn interpolate(&self, target_hour: f64) -> Result<f64, AnalysisError> {
        self.interpolator.interpolate(self.require_profile()?, target_hour)
    }

    pub fn integrate(&self, start_hour: f64, end_hour: f64) -> Result<f64, AnalysisError> {
        self.integrator.integrate(self.require_profile()?, start_hour, end_hour)
    }

    pub fn integrate_day(&self) -> Result<f64, AnalysisError> {
        self.integrator.integrate_day(self.require_profile()?)
    }

    pub fn statistics(&self) -> Option<ProfileStatistics> {
        self.profile.as_ref().and_then(ProfileStatistics::from_profile)
    }

    pub fn has_data(&self) -> bool {
        self.profile.is_some()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn series(&self) -> &[TrafficPoint] {
        &self.series
    }

    fn require_profile(&self) -> Result<&Profile, AnalysisError> {
        self.profile.as_ref().ok_or(AnalysisError::NoProfile)
    }
}

impl Default for TrafficAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
