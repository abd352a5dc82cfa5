use std::io::{self, BufRead, Write};

use crate::analysis::or_sentinel;
use crate::config::PathsConfig;
use crate::dataset::export::REFERENCE_HOURS;
use crate::traffic::TrafficAnalyzer;
use crate::ui::report;
use crate::utils::{format_bandwidth, format_mbps};

const LOAD_FIRST: &str = "Please load data first (option 1 or 2).";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    LoadRaw,
    LoadProcessed,
    Statistics,
    HourlyTable,
    InterpolationTest,
    IntegrationTest,
    Export,
    InteractivePrediction,
    CompleteReport,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::LoadRaw),
            "2" => Some(MenuChoice::LoadProcessed),
            "3" => Some(MenuChoice::Statistics),
            "4" => Some(MenuChoice::HourlyTable),
            "5" => Some(MenuChoice::InterpolationTest),
            "6" => Some(MenuChoice::IntegrationTest),
            "7" => Some(MenuChoice::Export),
            "8" => Some(MenuChoice::InteractivePrediction),
            "9" => Some(MenuChoice::CompleteReport),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    fn needs_data(self) -> bool {
        !matches!(self, MenuChoice::LoadRaw | MenuChoice::LoadProcessed | MenuChoice::Exit)
    }
}

/// Numbered-menu session over any line-oriented input and output.
pub struct Session<'a, R, W> {
    analyzer: &'a mut TrafficAnalyzer,
    paths: PathsConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(analyzer: &'a mut TrafficAnalyzer, paths: PathsConfig, input: R, output: W) -> Self {
        Self {
            analyzer,
            paths,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.print_header()?;

        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                break;
            }
            if choice.needs_data() && !self.analyzer.has_data() {
                writeln!(self.output, "{}", LOAD_FIRST)?;
                continue;
            }
            self.dispatch(choice)?;
        }

        writeln!(self.output, "\nThank you for using the Network Traffic Analyzer!")?;
        writeln!(self.output, "Analysis complete.")?;
        self.output.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        match choice {
            MenuChoice::LoadRaw => self.load_raw(),
            MenuChoice::LoadProcessed => self.load_processed(),
            MenuChoice::Statistics => report::write_statistics(&mut self.output, self.analyzer),
            MenuChoice::HourlyTable => report::write_hourly_table(&mut self.output, self.analyzer),
            MenuChoice::InterpolationTest => report::write_interpolation_test(&mut self.output, self.analyzer),
            MenuChoice::IntegrationTest => report::write_integration_summary(&mut self.output, self.analyzer),
            MenuChoice::Export => self.export(),
            MenuChoice::InteractivePrediction => self.interactive_prediction(),
            MenuChoice::CompleteReport => report::write_complete_report(&mut self.output, self.analyzer),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn load_raw(&mut self) -> io::Result<()> {
        let path = self.paths.raw_data.clone();
        writeln!(self.output, "\nLoading raw data from {}...", path.display())?;

        match self.analyzer.load_raw(&path) {
            Ok(summary) => {
                let mean = self.analyzer.series().iter().map(|p| p.bandwidth_mbps).sum::<f64>()
                    / summary.intervals.max(1) as f64;
                writeln!(
                    self.output,
                    "Loaded {} packets into {} intervals (mean {}).",
                    summary.packets,
                    summary.intervals,
                    format_bandwidth(mean)
                )?;
                writeln!(self.output, "Raw data loaded and processed successfully!")?;

                let processed = self.paths.processed_data.clone();
                match self.analyzer.save_processed(&processed) {
                    Ok(()) => writeln!(self.output, "Processed data saved to {}", processed.display()),
                    Err(e) => writeln!(self.output, "Failed to save processed data: {}", e),
                }
            }
            Err(e) => {
                log::error!("Raw load failed: {}", e);
                writeln!(self.output, "Failed to load raw data: {}", e)
            }
        }
    }

    fn load_processed(&mut self) -> io::Result<()> {
        let path = self.paths.processed_data.clone();
        writeln!(self.output, "\nLoading processed data from {}...", path.display())?;

        match self.analyzer.load_processed(&path) {
            Ok(points) => {
                writeln!(self.output, "Loaded {} processed data points.", points)?;
                writeln!(self.output, "Processed data loaded successfully!")
            }
            Err(e) => {
                log::error!("Processed load failed: {}", e);
                writeln!(self.output, "Failed to load processed data: {}", e)
            }
        }
    }

    fn export(&mut self) -> io::Result<()> {
        let path = self.paths.export.clone();
        match self.analyzer.export(&path) {
            Ok(()) => writeln!(self.output, "Results exported to {}", path.display()),
            Err(e) => writeln!(self.output, "Export failed: {}", e),
        }
    }

    fn interactive_prediction(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "\nEnter time (0-24 hours) for bandwidth prediction: ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match line.trim().parse::<f64>() {
                Ok(target) if (0.0..=24.0).contains(&target) => self.predict(target)?,
                _ => writeln!(self.output, "Invalid time. Please enter a value between 0 and 24.")?,
            }

            write!(self.output, "Continue prediction? (y/n): ")?;
            self.output.flush()?;
            match self.read_line()? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
                _ => return Ok(()),
            }
        }
    }

    fn predict(&mut self, target: f64) -> io::Result<()> {
        let prediction = or_sentinel(self.analyzer.interpolate(target));
        writeln!(
            self.output,
            "Predicted bandwidth at {:.2} h = {}",
            target,
            format_mbps(prediction, 3)
        )?;

        let hour_before = target.floor();
        let hour_after = hour_before + 1.0;
        if hour_after <= 23.0 {
            let before = or_sentinel(self.analyzer.interpolate(hour_before));
            let after = or_sentinel(self.analyzer.interpolate(hour_after));
            writeln!(
                self.output,
                "  Reference: {}:00 = {}, {}:00 = {}",
                hour_before,
                format_mbps(before, 3),
                hour_after,
                format_mbps(after, 3)
            )?;
        }
        Ok(())
    }

    fn print_header(&mut self) -> io::Result<()> {
        let rule = "=".repeat(50);
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "  NETWORK TRAFFIC ANALYZER")?;
        writeln!(self.output, "  Interpolation & Simpson Integration over capture data")?;
        writeln!(self.output, "{}", rule)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- ANALYSIS OPTIONS ---")?;
        writeln!(self.output, "1. Load and process raw data ({})", self.paths.raw_data.display())?;
        writeln!(self.output, "2. Load processed data")?;
        writeln!(self.output, "3. Display traffic statistics")?;
        writeln!(self.output, "4. Show hourly data table")?;
        writeln!(
            self.output,
            "5. Run interpolation test ({} reference hours)",
            REFERENCE_HOURS.len()
        )?;
        writeln!(self.output, "6. Run Simpson integration analysis")?;
        writeln!(self.output, "7. Export results to CSV")?;
        writeln!(self.output, "8. Interactive prediction mode")?;
        writeln!(self.output, "9. Complete analysis report")?;
        writeln!(self.output, "0. Exit")?;
        write!(self.output, "Choice: ")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Profile;
    use crate::config::AnalysisConfig;
    use crate::dataset::ProcessedCsv;
    use std::fs;
    use std::path::Path;

    fn paths(dir: &Path) -> PathsConfig {
        PathsConfig {
            raw_data: dir.join("raw").join("output1.csv"),
            processed_data: dir.join("processed").join("series.csv"),
            export: dir.join("results").join("analysis_output.csv"),
        }
    }

    fn run_session(analyzer: &mut TrafficAnalyzer, paths: PathsConfig, input: &str) -> String {
        let mut output = Vec::new();
        Session::new(analyzer, paths, input.as_bytes(), &mut output).run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1\n"), Some(MenuChoice::LoadRaw));
        assert_eq!(MenuChoice::parse(" 0 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("42"), None);
        assert!(!MenuChoice::LoadProcessed.needs_data());
        assert!(MenuChoice::Export.needs_data());
    }

    #[test]
    fn test_requires_data_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = TrafficAnalyzer::new();
        let text = run_session(&mut analyzer, paths(dir.path()), "3\n9\nx\n0\n");

        assert_eq!(text.matches(LOAD_FIRST).count(), 2);
        assert!(text.contains("Invalid choice. Please try again."));
        assert!(text.contains("Analysis complete."));
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = TrafficAnalyzer::new();
        let text = run_session(&mut analyzer, paths(dir.path()), "");
        assert!(text.contains("Analysis complete."));
    }

    #[test]
    fn test_load_raw_saves_processed() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(dir.path());
        fs::create_dir_all(paths.raw_data.parent().unwrap()).unwrap();
        fs::write(
            &paths.raw_data,
            "Timestamp,Source IP,Destination IP,Protocol,Length\n100.0,1.2.3.4,5.6.7.8,TCP,1500\n",
        )
        .unwrap();

        let mut analyzer = TrafficAnalyzer::with_config(&AnalysisConfig {
            seed: Some(4),
            ..AnalysisConfig::default()
        });
        let text = run_session(&mut analyzer, paths.clone(), "1\n7\n0\n");

        assert!(text.contains("Raw data loaded and processed successfully!"));
        assert_eq!(analyzer.series()[0].packet_count, 1);
        assert_eq!(ProcessedCsv::load(&paths.processed_data).unwrap().len(), 24);
        assert!(paths.export.exists());
    }

    #[test]
    fn test_missing_raw_file_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut analyzer = TrafficAnalyzer::new();
        let text = run_session(&mut analyzer, paths(dir.path()), "1\n0\n");
        assert!(text.contains("Failed to load raw data"));
        assert!(!analyzer.has_data());
    }

    #[test]
    fn test_interactive_prediction() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(dir.path());
        ProcessedCsv::save(&paths.processed_data, &Profile::hourly(vec![1.0; 24]).unwrap()).unwrap();

        let mut analyzer = TrafficAnalyzer::new();
        let text = run_session(&mut analyzer, paths, "2\n8\n5.5\ny\n30\nY\n23.5\nn\n0\n");

        assert!(text.contains("Loaded 24 processed data points."));
        assert!(text.contains("Predicted bandwidth at 5.50 h = 1.000 Mbps"));
        assert!(text.contains("Reference: 5:00 = 1.000 Mbps, 6:00 = 1.000 Mbps"));
        assert!(text.contains("Invalid time. Please enter a value between 0 and 24."));
        assert!(text.contains("Predicted bandwidth at 23.50 h = 1.000 Mbps"));
        assert_eq!(text.matches("Reference:").count(), 1);
    }
}
