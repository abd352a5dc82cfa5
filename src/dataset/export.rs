use std::path::Path;

use crate::analysis::{AnalysisError, Interpolator, Profile};
use crate::capture::DataError;
use crate::dataset::write_replacing;

/// Hours whose estimates are published alongside the profile (the half hours of the peaks).
pub const REFERENCE_HOURS: [f64; 4] = [8.5, 12.5, 15.5, 20.5];

pub const EXPORT_HEADER: &str =
    "Time_Hour,Bandwidth_Mbps,Interpolated_8.5,Interpolated_12.5,Interpolated_15.5,Interpolated_20.5";

/// Writes the profile plus reference estimates. Only the first data row carries the
/// estimates; every later row leaves those four columns empty.
pub struct ExportWriter<'a> {
    interpolator: &'a Interpolator,
}

impl<'a> ExportWriter<'a> {
    pub fn new(interpolator: &'a Interpolator) -> Self {
        Self { interpolator }
    }

    pub fn render(&self, profile: &Profile) -> Result<String, AnalysisError> {
        let estimates = REFERENCE_HOURS
            .iter()
            .map(|&hour| self.interpolator.interpolate(profile, hour))
            .collect::<Result<Vec<f64>, _>>()?;

        let mut out = format!("{}\n", EXPORT_HEADER);
        for (row, (hour, bw)) in profile.points().enumerate() {
            out.push_str(&format!("{},{}", hour, bw));
            if row == 0 {
                for estimate in &estimates {
                    out.push_str(&format!(",{}", estimate));
                }
            } else {
                out.push_str(",,,,");
            }
            out.push('\n');
        }

        Ok(out)
    }

    pub fn write(&self, path: &Path, profile: &Profile) -> Result<(), DataError> {
        let content = self.render(profile)?;
        write_replacing(path, &content)?;
        log::info!("Results exported to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sparse_layout() {
        let interpolator = Interpolator::new();
        let profile = Profile::hourly(vec![1.0; 24]).unwrap();
        let content = ExportWriter::new(&interpolator).render(&profile).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 25);
        assert_eq!(lines[0], EXPORT_HEADER);
        assert_eq!(lines[1], "0,1,1,1,1,1");
        assert_eq!(lines[2], "1,1,,,,");
        assert!(lines.iter().all(|line| line.split(',').count() == 6));
    }

    #[test]
    fn test_estimates_in_first_row() {
        let interpolator = Interpolator::new();
        let profile = Profile::hourly((0..24).map(|h| h as f64 / 4.0).collect()).unwrap();
        let content = ExportWriter::new(&interpolator).render(&profile).unwrap();
        let first: Vec<&str> = content.lines().nth(1).unwrap().split(',').collect();

        assert_eq!(&first[2..], &["2.125", "3.125", "3.875", "5.125"]);
    }

    #[test]
    fn test_empty_profile_is_an_error() {
        let interpolator = Interpolator::new();
        let profile = Profile::new(Vec::new(), Vec::new()).unwrap();
        assert!(ExportWriter::new(&interpolator).render(&profile).is_err());
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("analysis_output.csv");
        let interpolator = Interpolator::new();
        let profile = Profile::hourly(vec![2.0; 24]).unwrap();

        ExportWriter::new(&interpolator).write(&path, &profile).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(EXPORT_HEADER));
    }
}
