use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of the input being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Url,
    Email,
    Phone,
    AreaCode,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Url,
        Category::Email,
        Category::Phone,
        Category::AreaCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Url => "url",
            Category::Email => "email",
            Category::Phone => "phone",
            Category::AreaCode => "area_code",
        }
    }

    /// Human-facing label used in reports and listings
    pub fn label(&self) -> &'static str {
        match self {
            Category::Url => "URL",
            Category::Email => "Email",
            Category::Phone => "Phone",
            Category::AreaCode => "Area Code",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Url => "🌐",
            Category::Email => "✉️",
            Category::Phone => "📞",
            Category::AreaCode => "🔢",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "url" => Ok(Category::Url),
            "email" => Ok(Category::Email),
            "phone" => Ok(Category::Phone),
            "area_code" | "area-code" | "areacode" => Ok(Category::AreaCode),
            other => bail!("Unknown category '{other}' (expected url, email, phone or area_code)"),
        }
    }
}

/// Three-tier verdict. `Dangerous` is only reachable through a known indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    Safe,
    Suspicious,
    Dangerous,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Safe => "safe",
            ThreatLevel::Suspicious => "suspicious",
            ThreatLevel::Dangerous => "dangerous",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            ThreatLevel::Safe => "✅ Safe",
            ThreatLevel::Suspicious => "⚠️ Suspicious",
            ThreatLevel::Dangerous => "❌ Dangerous",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub id: String,
    pub category: Category,
    pub value: String,
    pub threat_level: ThreatLevel,
    pub confidence: u8,
    pub indicators: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub report_count: u32,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub id: String,
    pub input: String,
    pub category: Category,
    pub verdict: ThreatLevel,
    pub confidence: u8,
    pub explanation: String,
    pub indicators: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ClassificationResult {
    /// True when two results agree on everything except id and timestamp.
    pub fn same_verdict(&self, other: &ClassificationResult) -> bool {
        self.verdict == other.verdict
            && self.confidence == other.confidence
            && self.explanation == other.explanation
            && self.indicators == other.indicators
    }
}
