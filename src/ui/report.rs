use std::io::{self, Write};

use serde::Serialize;

use crate::analysis::{or_sentinel, ProfileStatistics};
use crate::dataset::REFERENCE_HOURS;
use crate::traffic::TrafficAnalyzer;
use crate::utils::{format_clock, format_consumption, format_mbps, percentage};

/// Hours sampled in the detailed interpolation table.
pub const DETAIL_HOURS: [f64; 10] = [0.5, 2.5, 6.5, 9.5, 11.5, 13.5, 16.5, 18.5, 21.5, 23.5];

#[derive(Debug, Clone, Copy)]
pub struct TimePeriod {
    pub name: &'static str,
    pub start: f64,
    pub end: f64,
}

pub const DAY_PERIODS: [TimePeriod; 3] = [
    TimePeriod { name: "Morning (6-12)", start: 6.0, end: 12.0 },
    TimePeriod { name: "Afternoon (12-18)", start: 12.0, end: 18.0 },
    TimePeriod { name: "Evening (18-24)", start: 18.0, end: 24.0 },
];

// Off-Peak wraps midnight; only its evening part is integrated
pub const REPORT_PERIODS: [TimePeriod; 6] = [
    TimePeriod { name: "Night (0-6)", start: 0.0, end: 6.0 },
    TimePeriod { name: "Morning (6-12)", start: 6.0, end: 12.0 },
    TimePeriod { name: "Afternoon (12-18)", start: 12.0, end: 18.0 },
    TimePeriod { name: "Evening (18-24)", start: 18.0, end: 24.0 },
    TimePeriod { name: "Peak Hours (8-10)", start: 8.0, end: 10.0 },
    TimePeriod { name: "Off-Peak (22-6)", start: 22.0, end: 24.0 },
];

#[derive(Debug, Clone, Serialize)]
pub struct HourEstimate {
    pub hour: f64,
    pub bandwidth_mbps: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodConsumption {
    pub name: String,
    pub start_hour: f64,
    pub end_hour: f64,
    pub consumption_mbps_hours: f64,
    pub share_of_day_percent: f64,
    pub average_mbps: f64,
}

/// Everything the complete report prints, in a serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub statistics: Option<ProfileStatistics>,
    pub peak_to_average: f64,
    pub reference_estimates: Vec<HourEstimate>,
    pub detail_estimates: Vec<HourEstimate>,
    pub daily_consumption_mbps_hours: f64,
    pub periods: Vec<PeriodConsumption>,
}

impl AnalysisReport {
    pub fn build(analyzer: &TrafficAnalyzer) -> Self {
        let estimate = |hour: f64| HourEstimate {
            hour,
            bandwidth_mbps: or_sentinel(analyzer.interpolate(hour)),
        };
        let daily = or_sentinel(analyzer.integrate(0.0, 24.0));

        let periods = REPORT_PERIODS
            .iter()
            .map(|period| {
                let consumption = or_sentinel(analyzer.integrate(period.start, period.end));
                PeriodConsumption {
                    name: period.name.to_string(),
                    start_hour: period.start,
                    end_hour: period.end,
                    consumption_mbps_hours: consumption,
                    share_of_day_percent: percentage(consumption, daily),
                    average_mbps: consumption / (period.end - period.start),
                }
            })
            .collect();

        let statistics = analyzer.statistics();
        Self {
            peak_to_average: statistics.as_ref().map_or(0.0, ProfileStatistics::peak_to_average),
            statistics,
            reference_estimates: REFERENCE_HOURS.iter().map(|&h| estimate(h)).collect(),
            detail_estimates: DETAIL_HOURS.iter().map(|&h| estimate(h)).collect(),
            daily_consumption_mbps_hours: daily,
            periods,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Printed in place of statistics when the profile has no points.
pub const NO_STATISTICS: &str = "Insufficient data: the loaded profile has no points.";

pub fn write_statistics<W: Write>(out: &mut W, analyzer: &TrafficAnalyzer) -> io::Result<()> {
    let Some(stats) = analyzer.statistics() else {
        log::warn!("No statistics to report");
        return writeln!(out, "{}", NO_STATISTICS);
    };

    writeln!(out, "\n=== TRAFFIC STATISTICS ===")?;
    writeln!(out, "Data points: {}", stats.data_points)?;
    writeln!(out, "Average bandwidth: {}", format_mbps(stats.average_mbps, 2))?;
    writeln!(out, "Peak bandwidth: {}", format_mbps(stats.peak_mbps, 2))?;
    writeln!(out, "Minimum bandwidth: {}", format_mbps(stats.minimum_mbps, 2))?;
    writeln!(out, "Peak-to-average ratio: {:.2}", stats.peak_to_average())
}

pub fn write_hourly_table<W: Write>(out: &mut W, analyzer: &TrafficAnalyzer) -> io::Result<()> {
    writeln!(out, "\n=== HOURLY BANDWIDTH DATA ===")?;
    writeln!(out, "Time (hr)\tBandwidth (Mbps)")?;
    writeln!(out, "--------------------------------")?;

    if let Some(profile) = analyzer.profile() {
        for (hour, bw) in profile.points() {
            writeln!(out, "{:.1}\t\t{:.3}", hour, bw)?;
        }
    }
    Ok(())
}

pub fn write_interpolation_test<W: Write>(out: &mut W, analyzer: &TrafficAnalyzer) -> io::Result<()> {
    writeln!(out, "\n=== INTERPOLATION TEST ===")?;
    for hour in REFERENCE_HOURS {
        let predicted = or_sentinel(analyzer.interpolate(hour));
        writeln!(out, "Bandwidth at {} = {}", format_clock(hour), format_mbps(predicted, 3))?;
    }
    Ok(())
}

pub fn write_integration_summary<W: Write>(out: &mut W, analyzer: &TrafficAnalyzer) -> io::Result<()> {
    writeln!(out, "\n=== SIMPSON INTEGRATION ANALYSIS ===")?;
    let total = or_sentinel(analyzer.integrate_day());
    writeln!(out, "Total bandwidth consumption (24h): {}", format_consumption(total, 3))?;
    writeln!(out, "Average bandwidth: {}", format_mbps(total / 24.0, 3))
}

/// Statistics, reference estimates and the per-period integration summary.
pub fn write_results<W: Write>(out: &mut W, analyzer: &TrafficAnalyzer) -> io::Result<()> {
    writeln!(out, "\n=== NETWORK TRAFFIC ANALYSIS RESULTS ===")?;
    write_statistics(out, analyzer)?;

    writeln!(out, "\n=== INTERPOLATION PREDICTIONS ===")?;
    for hour in REFERENCE_HOURS {
        let predicted = or_sentinel(analyzer.interpolate(hour));
        writeln!(out, "Predicted bandwidth at {} = {}", format_clock(hour), format_mbps(predicted, 3))?;
    }

    writeln!(out, "\n=== SIMPSON INTEGRATION RESULTS ===")?;
    let total = or_sentinel(analyzer.integrate_day());
    writeln!(out, "Total bandwidth consumption (24h): {}", format_consumption(total, 3))?;
    writeln!(out, "Integrated average bandwidth: {}", format_mbps(total / 24.0, 3))?;

    writeln!(out, "\nBandwidth consumption by time period:")?;
    for period in DAY_PERIODS {
        let consumption = or_sentinel(analyzer.integrate(period.start, period.end));
        writeln!(out, "{}: {}", period.name, format_consumption(consumption, 3))?;
    }
    Ok(())
}

pub fn write_complete_report<W: Write>(out: &mut W, analyzer: &TrafficAnalyzer) -> io::Result<()> {
    let rule = "=".repeat(50);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "           COMPLETE ANALYSIS REPORT")?;
    writeln!(out, "{}", rule)?;

    write_results(out, analyzer)?;
    let report = AnalysisReport::build(analyzer);

    writeln!(out, "\n=== DETAILED INTERPOLATION ANALYSIS ===")?;
    writeln!(out, "Time\tPredicted Bandwidth (Mbps)")?;
    writeln!(out, "----\t-------------------------")?;
    for estimate in &report.detail_estimates {
        writeln!(out, "{}\t{:.3}", format_clock(estimate.hour), estimate.bandwidth_mbps)?;
    }

    writeln!(out, "\n=== INTEGRATION ANALYSIS BY TIME PERIODS ===")?;
    for period in &report.periods {
        writeln!(out, "{}:", period.name)?;
        writeln!(out, "  Total consumption: {}", format_consumption(period.consumption_mbps_hours, 2))?;
        writeln!(out, "  Percentage of daily: {:.2}%", period.share_of_day_percent)?;
        writeln!(out, "  Average in period: {}", format_mbps(period.average_mbps, 2))?;
        writeln!(out)?;
    }

    writeln!(out, "=== SUMMARY STATISTICS ===")?;
    writeln!(out, "Total daily consumption: {}", format_consumption(report.daily_consumption_mbps_hours, 2))?;
    if let Some(stats) = &report.statistics {
        writeln!(out, "Overall average bandwidth: {}", format_mbps(stats.average_mbps, 2))?;
        writeln!(out, "Peak bandwidth: {}", format_mbps(stats.peak_mbps, 2))?;
        writeln!(out, "Minimum bandwidth: {}", format_mbps(stats.minimum_mbps, 2))?;
    }
    writeln!(out, "Peak utilization factor: {:.2}", report.peak_to_average)
}
