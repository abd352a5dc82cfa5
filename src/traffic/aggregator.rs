use std::collections::BTreeMap;

use crate::capture::PacketRecord;

/// Width of one aggregation window in seconds (5 minutes).
pub const INTERVAL_SECS: f64 = 300.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalBucket {
    pub interval_index: i64,
    // sum of i64 lengths; i128 so it cannot overflow
    pub total_bytes: i128,
    pub packet_count: u64,
}

/// Bandwidth observed over one interval bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficPoint {
    pub timestamp: f64, // start of the interval, seconds
    pub bandwidth_mbps: f64,
    pub packet_count: u64,
}

pub struct PacketAggregator {
    interval_secs: f64,
}

impl PacketAggregator {
    pub fn new() -> Self {
        Self {
            interval_secs: INTERVAL_SECS,
        }
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    /// Bucket packets into fixed windows anchored at the earliest timestamp.
    ///
    /// Input order does not matter; the result is ordered by interval index.
    pub fn aggregate(&self, records: &[PacketRecord]) -> Vec<TrafficPoint> {
        if records.is_empty() {
            return Vec::new();
        }

        let min_timestamp = records
            .iter()
            .map(|record| record.timestamp)
            .fold(f64::INFINITY, f64::min);

        let buckets = self.bucket(records, min_timestamp);

        let points: Vec<TrafficPoint> = buckets
            .values()
            .map(|bucket| TrafficPoint {
                timestamp: min_timestamp + bucket.interval_index as f64 * self.interval_secs,
                bandwidth_mbps: Self::to_mbps(bucket.total_bytes as f64, self.interval_secs),
                packet_count: bucket.packet_count,
            })
            .collect();

        log::info!("Aggregated {} packets into {} time intervals", records.len(), points.len());
        points
    }

    fn bucket(&self, records: &[PacketRecord], min_timestamp: f64) -> BTreeMap<i64, IntervalBucket> {
        let mut buckets: BTreeMap<i64, IntervalBucket> = BTreeMap::new();

        for record in records {
            let interval_index = ((record.timestamp - min_timestamp) / self.interval_secs).floor() as i64;
            let bucket = buckets.entry(interval_index).or_insert_with(|| IntervalBucket {
                interval_index,
                ..IntervalBucket::default()
            });
            bucket.total_bytes += i128::from(record.length);
            bucket.packet_count += 1;
        }

        buckets
    }

    /// Bytes over `interval_secs` seconds to megabits per second.
    pub fn to_mbps(bytes: f64, interval_secs: f64) -> f64 {
        (bytes * 8.0) / (interval_secs * 1e6)
    }
}

impl Default for PacketAggregator {
    fn default() -> Self {
        Self::new()
    }
}
