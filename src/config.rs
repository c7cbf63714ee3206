use crate::report::ReportFormat;
use crate::store::IndicatorStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// YAML list of indicator records; the built-in database when unset.
    #[serde(default)]
    pub indicator_database: Option<String>,
    #[serde(default = "default_scan_delay_ms")]
    pub scan_delay_ms: u64,
    #[serde(default = "default_report_delay_ms")]
    pub report_delay_ms: u64,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub interval_seconds: u64,
    pub max_affected_increment: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: String,
    pub default_format: ReportFormat,
}

fn default_scan_delay_ms() -> u64 {
    1500
}

fn default_report_delay_ms() -> u64 {
    2000
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 5,
            max_affected_increment: 10,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            default_format: ReportFormat::Text,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indicator_database: None,
            scan_delay_ms: default_scan_delay_ms(),
            report_delay_ms: default_report_delay_ms(),
            monitor: MonitorConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {path}"))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {path}"))?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {path}"))?;
        Ok(())
    }

    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }

    pub fn report_delay(&self) -> Duration {
        Duration::from_millis(self.report_delay_ms)
    }

    pub fn monitor_interval(&self) -> Duration {
        // a zero period would make the ticker panic
        Duration::from_secs(self.monitor.interval_seconds.max(1))
    }

    pub fn load_store(&self) -> anyhow::Result<IndicatorStore> {
        match &self.indicator_database {
            Some(path) => IndicatorStore::from_file(path),
            None => Ok(IndicatorStore::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phishguard.yaml");
        let path = path.to_str().unwrap();

        let mut config = Config::default();
        config.scan_delay_ms = 0;
        config.report.default_format = ReportFormat::Csv;
        config.to_file(path).unwrap();

        assert_eq!(Config::from_file(path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_yaml::from_str("scan_delay_ms: 10\n").unwrap();
        assert_eq!(config.scan_delay_ms, 10);
        assert_eq!(config.report_delay_ms, 2000);
        assert_eq!(config.monitor, MonitorConfig::default());
        assert!(config.indicator_database.is_none());
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = serde_yaml::from_str("monitor:\n  interval_seconds: 2\n").unwrap();
        assert_eq!(config.monitor.interval_seconds, 2);
        assert_eq!(config.monitor.max_affected_increment, 10);

        let config: Config = serde_yaml::from_str("report:\n  default_format: json\n").unwrap();
        assert_eq!(config.report.default_format, ReportFormat::Json);
        assert_eq!(config.report.output_dir, ".");
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "scan_delay_ms: [not a number\n").unwrap();
        let path = path.to_str().unwrap();

        let err = Config::from_file(path).unwrap_err();
        assert!(format!("{err:#}").contains(path));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut config = Config::default();
        config.monitor.interval_seconds = 0;
        assert_eq!(config.monitor_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_custom_indicator_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("indicators.yaml");
        let mut records = crate::fixtures::phishing_database();
        records.truncate(2);
        std::fs::write(&db_path, serde_yaml::to_string(&records).unwrap()).unwrap();

        let config = Config {
            indicator_database: Some(db_path.to_str().unwrap().to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_store().unwrap().len(), 2);

        let missing = Config {
            indicator_database: Some(dir.path().join("nope.yaml").to_str().unwrap().to_string()),
            ..Config::default()
        };
        assert!(missing.load_store().is_err());
    }
}
