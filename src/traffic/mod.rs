pub mod aggregator;
pub mod analyzer;

pub use aggregator::{IntervalBucket, PacketAggregator, TrafficPoint, INTERVAL_SECS};
pub use analyzer::{LoadSummary, TrafficAnalyzer};
