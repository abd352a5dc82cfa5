use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::interpolation::DEFAULT_CEILING_MBPS;
use crate::analysis::profile::DEFAULT_NOISE_RATIO;
use crate::analysis::OddIntervalPolicy;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub raw_data: PathBuf,
    pub processed_data: PathBuf,
    pub export: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub noise_ratio: f64,
    pub seed: Option<u64>,
    pub interpolation_ceiling_mbps: f64,
    pub odd_intervals: OddIntervalPolicy,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_data: PathBuf::from("data/raw/output1.csv"),
            processed_data: PathBuf::from("data/processed/network_traffic_timeseries.csv"),
            export: PathBuf::from("data/results/analysis_output.csv"),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            noise_ratio: DEFAULT_NOISE_RATIO,
            seed: None,
            interpolation_ceiling_mbps: DEFAULT_CEILING_MBPS,
            odd_intervals: OddIntervalPolicy::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let analysis = &self.analysis;
        anyhow::ensure!(
            analysis.noise_ratio.is_finite() && analysis.noise_ratio >= 0.0,
            "noise_ratio must be a non-negative number, got {}",
            analysis.noise_ratio
        );
        anyhow::ensure!(
            analysis.interpolation_ceiling_mbps > 0.0,
            "interpolation_ceiling_mbps must be positive, got {}",
            analysis.interpolation_ceiling_mbps
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[analysis]\nseed = 9\n").unwrap();
        assert_eq!(config.analysis.seed, Some(9));
        assert_eq!(config.analysis.noise_ratio, 0.1);
        assert_eq!(config.analysis.odd_intervals, OddIntervalPolicy::DropLast);
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn test_odd_interval_policy_names() {
        let config: Config = toml::from_str("[analysis]\nodd_intervals = \"three-eighths\"\n").unwrap();
        assert_eq!(config.analysis.odd_intervals, OddIntervalPolicy::ThreeEighths);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyzer.toml");
        let mut config = Config::default();
        config.analysis.seed = Some(123);
        config.paths.export = PathBuf::from("out/report.csv");

        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_negative_noise() {
        let mut config = Config::default();
        config.analysis.noise_ratio = -0.5;
        assert!(config.validate().is_err());
    }
}
