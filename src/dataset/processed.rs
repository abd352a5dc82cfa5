use std::fs;
use std::path::Path;

use crate::analysis::Profile;
use crate::capture::DataError;
use crate::dataset::write_replacing;

pub const PROCESSED_HEADER: &str = "Time_Hour,Bandwidth_Mbps";

/// `Time_Hour,Bandwidth_Mbps` persistence for a [`Profile`].
pub struct ProcessedCsv;

impl ProcessedCsv {
    pub fn load(path: &Path) -> Result<Profile, DataError> {
        let content = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;

        let mut hours = Vec::new();
        let mut bandwidth = Vec::new();

        for (idx, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let (hour, bw) = Self::parse_line(line).map_err(|reason| DataError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                reason,
            })?;
            hours.push(hour);
            bandwidth.push(bw);
        }

        let profile = Profile::new(hours, bandwidth).map_err(|reason| DataError::InvalidProfile {
            path: path.to_path_buf(),
            reason,
        })?;

        log::info!("Loaded {} processed data points from {}", profile.len(), path.display());
        Ok(profile)
    }

    fn parse_line(line: &str) -> Result<(f64, f64), String> {
        let mut fields = line.split(',').map(str::trim);
        let hour = fields.next().unwrap_or_default();
        let bw = fields.next().unwrap_or_default();

        let hour: f64 = hour.parse().map_err(|_| format!("invalid hour '{}'", hour))?;
        let bw: f64 = bw.parse().map_err(|_| format!("invalid bandwidth '{}'", bw))?;
        Ok((hour, bw))
    }

    pub fn render(profile: &Profile) -> String {
        let mut out = format!("{}\n", PROCESSED_HEADER);
        for (hour, bw) in profile.points() {
            out.push_str(&format!("{},{}\n", hour, bw));
        }
        out
    }

    pub fn save(path: &Path, profile: &Profile) -> Result<(), DataError> {
        write_replacing(path, &Self::render(profile))?;
        log::info!("Processed data saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let profile = Profile::hourly(vec![0.5, 1.25]).unwrap();
        assert_eq!(ProcessedCsv::render(&profile), "Time_Hour,Bandwidth_Mbps\n0,0.5\n1,1.25\n");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed").join("series.csv");
        let profile = Profile::hourly((0..24).map(|h| 0.1 + h as f64 / 7.0).collect()).unwrap();

        ProcessedCsv::save(&path, &profile).unwrap();
        assert_eq!(ProcessedCsv::load(&path).unwrap(), profile);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        ProcessedCsv::save(&path, &Profile::hourly(vec![1.0; 24]).unwrap()).unwrap();
        ProcessedCsv::save(&path, &Profile::hourly(vec![2.0, 3.0]).unwrap()).unwrap();

        assert_eq!(ProcessedCsv::load(&path).unwrap().bandwidth(), &[2.0, 3.0]);
    }

    #[test]
    fn test_header_only_is_empty_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        fs::write(&path, "Time_Hour,Bandwidth_Mbps\n").unwrap();
        assert!(ProcessedCsv::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");

        fs::write(&path, "Time_Hour,Bandwidth_Mbps\n0,1.0\n1,fast\n").unwrap();
        assert!(matches!(ProcessedCsv::load(&path), Err(DataError::Parse { line: 3, .. })));

        fs::write(&path, "Time_Hour,Bandwidth_Mbps\n2,1.0\n1,2.0\n").unwrap();
        assert!(matches!(ProcessedCsv::load(&path), Err(DataError::InvalidProfile { .. })));
    }
}
