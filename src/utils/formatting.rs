
/// Format a rate given in Mbps, scaling to Kbps or Gbps when that reads better
pub fn format_bandwidth(mbps: f64) -> String {
    let bits_per_sec = mbps * 1e6;
    const UNITS: &[&str] = &["bps", "Kbps", "Mbps", "Gbps", "Tbps"];
    let mut rate = bits_per_sec.abs();
    let mut unit_index = 0;

    while rate >= 1000.0 && unit_index < UNITS.len() - 1 {
        rate /= 1000.0;
        unit_index += 1;
    }
    if bits_per_sec < 0.0 {
        rate = -rate;
    }

    if unit_index == 0 {
        format!("{:.0} {}", rate, UNITS[unit_index])
    } else {
        format!("{:.2} {}", rate, UNITS[unit_index])
    }
}

/// Fixed-unit Mbps with the given number of decimals
pub fn format_mbps(mbps: f64, decimals: usize) -> String {
    format!("{:.*} Mbps", decimals, mbps)
}

/// Bandwidth-hours
pub fn format_consumption(mbps_hours: f64, decimals: usize) -> String {
    format!("{:.*} Mbps×hour", decimals, mbps_hours)
}

/// Fractional hour as a clock time, e.g. 8.5 -> "08:30"
pub fn format_clock(hour: f64) -> String {
    let total_minutes = (hour * 60.0).round().max(0.0) as u64;
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Percentage of `part` in `whole`, `0.0` when `whole` is zero
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole != 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
