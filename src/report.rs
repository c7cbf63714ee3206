use crate::types::{ClassificationResult, ThreatLevel};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ANALYZER_VERSION: &str = "PhishGuard AI v1.2.4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text/plain",
            ReportFormat::Json => "application/json",
            ReportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            // the dashboard's "PDF Report" option has always been plain text
            "text" | "txt" | "pdf" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => bail!("Unknown report format '{other}' (expected text, json or csv)"),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub id: String,
    pub target: String,
    pub kind: String,
    pub threat_level: ThreatLevel,
    pub confidence: u8,
    pub indicators: Vec<String>,
    pub recommendation: String,
    pub generated_at: DateTime<Utc>,
}

pub fn recommendation_for(level: ThreatLevel) -> &'static str {
    match level {
        ThreatLevel::Dangerous => "Block immediately and report to security team",
        ThreatLevel::Suspicious => "Monitor for additional reports and consider blocking",
        ThreatLevel::Safe => "No action required; continue routine monitoring",
    }
}

impl ReportData {
    pub fn from_result(result: &ClassificationResult) -> Self {
        Self {
            id: result.id.clone(),
            target: result.input.trim().to_string(),
            kind: result.category.label().to_string(),
            threat_level: result.verdict,
            confidence: result.confidence,
            indicators: result.indicators.clone(),
            recommendation: recommendation_for(result.verdict).to_string(),
            generated_at: result.timestamp,
        }
    }

    fn analysis_sentence(&self) -> String {
        format!(
            "Advanced AI analysis detected this {} as {} with {}% confidence.",
            self.kind.to_lowercase(),
            self.threat_level,
            self.confidence
        )
    }

    /// Render the report body. `now` stamps the generation time.
    pub fn render(&self, format: ReportFormat, now: DateTime<Utc>) -> Result<String> {
        match format {
            ReportFormat::Json => self.render_json(now),
            ReportFormat::Csv => Ok(self.render_csv(now)),
            ReportFormat::Text => Ok(self.render_text(now)),
        }
    }

    fn render_json(&self, now: DateTime<Utc>) -> Result<String> {
        let indicators_clause = if self.indicators.is_empty() {
            "The system identified no threat indicators.".to_string()
        } else {
            format!(
                "The system identified multiple threat indicators including {}.",
                self.indicators.join(", ")
            )
        };
        let document = json!({
            "report": {
                "id": self.id,
                "generated_at": now.to_rfc3339(),
                "target": self.target,
                "type": self.kind,
                "threat_assessment": {
                    "level": self.threat_level,
                    "confidence": self.confidence,
                    "indicators": self.indicators,
                },
                "recommendation": self.recommendation,
                "ai_analysis": format!("{} {}", self.analysis_sentence(), indicators_clause),
            }
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn render_csv(&self, now: DateTime<Utc>) -> String {
        let mut csv = String::new();
        csv.push_str("Target,Type,Threat Level,Confidence,Indicators,Recommendation,Generated At\n");
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}",
            csv_quote(&self.target),
            csv_quote(&self.kind),
            csv_quote(self.threat_level.as_str()),
            self.confidence,
            csv_quote(&self.indicators.join("; ")),
            csv_quote(&self.recommendation),
            csv_quote(&now.to_rfc3339())
        ));
        csv
    }

    fn render_text(&self, now: DateTime<Utc>) -> String {
        let indicators = if self.indicators.is_empty() {
            "• None".to_string()
        } else {
            self.indicators
                .iter()
                .map(|i| format!("• {i}"))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "PHISHING THREAT REPORT\n\
             Generated: {generated}\n\
             \n\
             TARGET INFORMATION\n\
             Target: {target}\n\
             Type: {kind}\n\
             Report ID: {id}\n\
             \n\
             THREAT ASSESSMENT\n\
             Threat Level: {level}\n\
             Confidence Score: {confidence}%\n\
             \n\
             DETECTED INDICATORS\n\
             {indicators}\n\
             \n\
             AI ANALYSIS\n\
             {analysis}\n\
             \n\
             RECOMMENDATION\n\
             {recommendation}\n\
             \n\
             TECHNICAL DETAILS\n\
             Analysis performed using {version}\n\
             Scan completed at: {completed}\n\
             \n\
             This report was generated automatically by the PhishGuard anti-phishing system.",
            generated = now.format("%Y-%m-%d %H:%M:%S UTC"),
            target = self.target,
            kind = self.kind,
            id = self.id,
            level = self.threat_level.as_str().to_uppercase(),
            confidence = self.confidence,
            indicators = indicators,
            analysis = self.analysis_sentence(),
            recommendation = self.recommendation,
            version = ANALYZER_VERSION,
            completed = now.to_rfc3339(),
        )
    }
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// `threat-report-<target>.<ext>` with every non-alphanumeric character
/// of the target replaced by '-'.
pub fn report_filename(target: &str, format: ReportFormat) -> String {
    let safe: String = target
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("threat-report-{}.{}", safe, format.extension())
}

/// Render and write the report into `dir`, returning the written path.
pub fn write_report(
    report: &ReportData,
    format: ReportFormat,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let content = report.render(format, now)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;

    let path = dir.join(report_filename(&report.target, format));
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    log::info!(
        "Wrote {} report ({}) to {}",
        format,
        format.mime_type(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Classifier;
    use crate::fixtures;
    use crate::types::Category;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_filename_sanitizing() {
        assert_eq!(
            report_filename("paypa1-security.com", ReportFormat::Json),
            "threat-report-paypa1-security-com.json"
        );
        assert_eq!(
            report_filename("security@amazom-support.net", ReportFormat::Csv),
            "threat-report-security-amazom-support-net.csv"
        );
        assert_eq!(
            report_filename("+1-888-555-0199", ReportFormat::Text),
            "threat-report--1-888-555-0199.txt"
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("pdf".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_json_layout() {
        let report = &fixtures::sample_reports()[0];
        let body = report.render(ReportFormat::Json, fixed_now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        let inner = &value["report"];
        assert_eq!(inner["target"], "paypa1-security.com");
        assert_eq!(inner["type"], "URL");
        assert_eq!(inner["threat_assessment"]["level"], "dangerous");
        assert_eq!(inner["threat_assessment"]["confidence"], 95);
        assert_eq!(inner["threat_assessment"]["indicators"][0], "Typosquatting");
        assert!(inner["ai_analysis"]
            .as_str()
            .unwrap()
            .starts_with("Advanced AI analysis detected this url as dangerous with 95% confidence."));
    }

    #[test]
    fn test_csv_layout() {
        let report = &fixtures::sample_reports()[2];
        let body = report.render(ReportFormat::Csv, fixed_now()).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Target,Type,Threat Level,Confidence,Indicators,Recommendation,Generated At"
        );
        assert!(lines[1].starts_with("\"+1-888-555-0199\",\"Phone\",\"suspicious\",78,"));
        assert!(lines[1].contains("\"Toll-Free Spoofing; Multiple Reports; Robocall Pattern\""));
    }

    #[test]
    fn test_csv_escapes_quotes() {
        let mut report = fixtures::sample_reports().remove(0);
        report.recommendation = "Say \"no\"".to_string();
        let body = report.render(ReportFormat::Csv, fixed_now()).unwrap();
        assert!(body.contains("\"Say \"\"no\"\"\""));
    }

    #[test]
    fn test_text_layout() {
        let report = &fixtures::sample_reports()[1];
        let body = report.render(ReportFormat::Text, fixed_now()).unwrap();

        assert!(body.starts_with("PHISHING THREAT REPORT\nGenerated: 2024-01-21 12:00:00 UTC"));
        assert!(body.contains("Threat Level: DANGEROUS"));
        assert!(body.contains("Confidence Score: 92%"));
        assert!(body.contains("• Domain Spoofing\n• Suspicious TLD\n• Mass Distribution"));
        assert!(body.contains("RECOMMENDATION\nAdd to spam filter"));
        assert!(body.contains(ANALYZER_VERSION));
    }

    #[test]
    fn test_report_from_scan() {
        let result = Classifier::default().classify("  secure-update.com ", Category::Url);
        let report = ReportData::from_result(&result);

        assert_eq!(report.target, "secure-update.com");
        assert_eq!(report.kind, "URL");
        assert_eq!(report.threat_level, ThreatLevel::Suspicious);
        assert_eq!(report.confidence, 72);
        assert_eq!(
            report.recommendation,
            recommendation_for(ThreatLevel::Suspicious)
        );
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = &fixtures::sample_reports()[0];
        let path = write_report(report, ReportFormat::Json, dir.path(), fixed_now()).unwrap();

        assert!(path.ends_with("threat-report-paypa1-security-com.json"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("\"paypa1-security.com\""));
    }
}
