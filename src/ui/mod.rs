pub mod menu;
pub mod report;

pub use menu::{MenuChoice, Session};
pub use report::AnalysisReport;
