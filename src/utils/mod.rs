pub mod formatting;

pub use formatting::{format_bandwidth, format_clock, format_consumption, format_mbps, percentage};
