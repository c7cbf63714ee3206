pub mod config;
pub mod detection;
pub mod fixtures;
pub mod monitor;
pub mod report;
pub mod statistics;
pub mod store;
pub mod types;

pub use config::Config;
pub use detection::Classifier;
pub use monitor::{ActiveThreat, ThreatFilter, ThreatMonitor};
pub use report::{ReportData, ReportFormat};
pub use statistics::DetectionStats;
pub use store::{CategoryFilter, IndicatorSource, IndicatorStore};
pub use types::{Category, ClassificationResult, IndicatorRecord, ThreatLevel};
