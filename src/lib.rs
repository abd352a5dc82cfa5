// Library exports for traffic-analyzer
pub mod analysis;
pub mod capture;
pub mod config;
pub mod dataset;
pub mod traffic;
pub mod ui;
pub mod utils;

pub use analysis::{integration, interpolation, profile, statistics};
pub use capture::raw_csv;
pub use config::settings;
pub use dataset::{export, processed};
pub use traffic::{aggregator, analyzer};
pub use ui::{menu, report};
pub use utils::formatting;

// Error types
pub use anyhow::{Error, Result};
