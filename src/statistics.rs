use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionStats {
    pub accuracy: f64,
    pub total_scans: u64,
    pub threats_blocked: u64,
    pub last_update: DateTime<Utc>,
    pub model_version: String,
}

impl DetectionStats {
    /// Share of scans that were blocked, in percent.
    pub fn block_rate(&self) -> f64 {
        if self.total_scans == 0 {
            return 0.0;
        }
        self.threats_blocked as f64 / self.total_scans as f64 * 100.0
    }

    pub fn summary_lines(&self, now: DateTime<Utc>) -> Vec<String> {
        vec![
            format!("  Accuracy Rate:   {:.1}%", self.accuracy),
            format!("  Total Scans:     {}", format_number(self.total_scans)),
            format!(
                "  Threats Blocked: {} ({:.1}% of total scans)",
                format_number(self.threats_blocked),
                self.block_rate()
            ),
            format!(
                "  Model:           {} (updated {})",
                self.model_version,
                format_last_update(self.last_update, now)
            ),
        ]
    }
}

/// Compact counts: 1.2M, 109.8K, 950.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

pub fn format_last_update(last_update: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{}h ago", (now - last_update).num_hours())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::Duration;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1.0K");
        assert_eq!(format_number(109_814), "109.8K");
        assert_eq!(format_number(1_247_893), "1.2M");
    }

    #[test]
    fn test_block_rate() {
        let stats = fixtures::detection_stats();
        assert!((stats.block_rate() - 8.8).abs() < 0.05);

        let empty = DetectionStats {
            total_scans: 0,
            threats_blocked: 0,
            ..stats
        };
        assert_eq!(empty.block_rate(), 0.0);
    }

    #[test]
    fn test_last_update() {
        let now = Utc::now();
        assert_eq!(format_last_update(now - Duration::minutes(90), now), "1h ago");
        assert_eq!(format_last_update(now, now), "0h ago");
    }

    #[test]
    fn test_summary() {
        let stats = fixtures::detection_stats();
        let lines = stats.summary_lines(stats.last_update + Duration::hours(3));
        assert!(lines[0].contains("97.8%"));
        assert!(lines[1].contains("1.2M"));
        assert!(lines[2].contains("8.8%"));
        assert!(lines[3].contains("3h ago"));
    }
}
