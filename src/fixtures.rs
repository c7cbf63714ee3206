//! Built-in dashboard data: the indicator database, the active threat
//! campaigns, detection statistics and the sample reports.
//!
//! Values within one category are ordered so that no earlier record
//! contains a later record's value, which keeps every record reachable
//! through the substring lookup.

use crate::monitor::{ActiveThreat, Severity, ThreatKind, ThreatStatus};
use crate::report::ReportData;
use crate::statistics::DetectionStats;
use crate::types::{Category, IndicatorRecord, ThreatLevel};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn instant(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    category: Category,
    value: &str,
    threat_level: ThreatLevel,
    confidence: u8,
    indicators: &[&str],
    description: &str,
    report_count: u32,
    first_seen: NaiveDate,
    last_seen: NaiveDate,
    region: Option<&str>,
) -> IndicatorRecord {
    IndicatorRecord {
        id: id.to_string(),
        category,
        value: value.to_string(),
        threat_level,
        confidence,
        indicators: tags(indicators),
        description: description.to_string(),
        report_count,
        first_seen,
        last_seen,
        region: region.map(str::to_string),
    }
}

pub fn phishing_database() -> Vec<IndicatorRecord> {
    vec![
        record(
            "1",
            Category::Url,
            "paypa1-security.com",
            ThreatLevel::Dangerous,
            95,
            &["Typosquatting", "SSL Certificate Mismatch", "Recent Domain Registration"],
            "Typosquatting domain impersonating the PayPal login page",
            1247,
            date(2024, 1, 15),
            date(2024, 1, 21),
            None,
        ),
        record(
            "2",
            Category::Url,
            "amaz0n-verify.tk",
            ThreatLevel::Dangerous,
            97,
            &["Character Substitution", "Free TLD", "Credential Harvesting"],
            "Fake Amazon account verification page harvesting credentials",
            2089,
            date(2024, 1, 10),
            date(2024, 1, 21),
            None,
        ),
        record(
            "3",
            Category::Url,
            "micros0ft-update.ml",
            ThreatLevel::Dangerous,
            93,
            &["Brand Impersonation", "Malware Distribution", "Free TLD"],
            "Serves a fake Windows update bundling a remote access trojan",
            856,
            date(2024, 1, 12),
            date(2024, 1, 20),
            None,
        ),
        record(
            "4",
            Category::Url,
            "bankofamerica-secure.cf",
            ThreatLevel::Suspicious,
            81,
            &["Brand Impersonation", "Uncommon TLD"],
            "Lookalike banking domain, no credential form observed yet",
            134,
            date(2024, 1, 18),
            date(2024, 1, 21),
            None,
        ),
        record(
            "5",
            Category::Email,
            "security@amazom-support.net",
            ThreatLevel::Dangerous,
            92,
            &["Domain Spoofing", "Suspicious TLD", "Mass Distribution"],
            "Sends fake order confirmations linking to credential harvesting pages",
            3412,
            date(2024, 1, 8),
            date(2024, 1, 21),
            None,
        ),
        record(
            "6",
            Category::Email,
            "no-reply@apple-id-verify.ga",
            ThreatLevel::Dangerous,
            89,
            &["Brand Impersonation", "Free TLD", "Urgency Language"],
            "Apple ID lock notices requesting payment details",
            1567,
            date(2024, 1, 11),
            date(2024, 1, 20),
            None,
        ),
        record(
            "7",
            Category::Email,
            "billing@netfl1x-account.com",
            ThreatLevel::Suspicious,
            74,
            &["Character Substitution", "Billing Pretext"],
            "Subscription renewal failures pointing to an unverified billing page",
            412,
            date(2024, 1, 16),
            date(2024, 1, 21),
            None,
        ),
        record(
            "8",
            Category::Phone,
            "+1-876-555-0143",
            ThreatLevel::Dangerous,
            88,
            &["Lottery Scam", "International Premium", "Multiple Reports"],
            "Caller claims the recipient won a lottery and requests a release fee",
            978,
            date(2024, 1, 5),
            date(2024, 1, 21),
            Some("Jamaica"),
        ),
        record(
            "9",
            Category::Phone,
            "+1-800-555-7777",
            ThreatLevel::Suspicious,
            71,
            &["Fake Tech Support", "Robocall Pattern"],
            "Robocalls impersonating a software vendor's support desk",
            289,
            date(2024, 1, 14),
            date(2024, 1, 19),
            Some("United States"),
        ),
        record(
            "10",
            Category::AreaCode,
            "+876",
            ThreatLevel::Dangerous,
            90,
            &["Lottery Scams", "One-Ring Fraud", "High Report Volume"],
            "Caribbean area code heavily used in lottery and one-ring callback scams",
            5621,
            date(2023, 11, 2),
            date(2024, 1, 21),
            Some("Jamaica"),
        ),
        record(
            "11",
            Category::AreaCode,
            "+809",
            ThreatLevel::Dangerous,
            86,
            &["One-Ring Fraud", "Premium Rate"],
            "Missed-call scams prompting expensive international callbacks",
            3304,
            date(2023, 12, 9),
            date(2024, 1, 20),
            Some("Dominican Republic"),
        ),
        record(
            "12",
            Category::AreaCode,
            "+473",
            ThreatLevel::Suspicious,
            70,
            &["Premium Rate", "Callback Scam"],
            "Occasional one-ring callback campaigns",
            187,
            date(2024, 1, 3),
            date(2024, 1, 17),
            Some("Grenada"),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn campaign(
    id: &str,
    name: &str,
    kind: ThreatKind,
    targets: &[&str],
    severity: Severity,
    affected_users: u64,
    first_detected: DateTime<Utc>,
    status: ThreatStatus,
    description: &str,
) -> ActiveThreat {
    ActiveThreat {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        targets: tags(targets),
        severity,
        affected_users,
        first_detected,
        status,
        description: description.to_string(),
    }
}

pub fn active_threats() -> Vec<ActiveThreat> {
    vec![
        campaign(
            "1",
            "PayPal Credential Harvest Campaign",
            ThreatKind::Phishing,
            &["paypa1-security.com", "paypal-verify.tk"],
            Severity::Critical,
            3421,
            instant(2024, 1, 21, 6, 0),
            ThreatStatus::Active,
            "Mass email campaign directing users to a cloned PayPal login page",
        ),
        campaign(
            "2",
            "Amazon Order Confirmation Scam",
            ThreatKind::Scam,
            &["security@amazom-support.net", "amaz0n-verify.tk"],
            Severity::High,
            1876,
            instant(2024, 1, 20, 14, 30),
            ThreatStatus::Active,
            "Fake order confirmations urging recipients to dispute unknown purchases",
        ),
        campaign(
            "3",
            "Caribbean Lottery Call Wave",
            ThreatKind::Scam,
            &["+1-876-555-0143", "+876"],
            Severity::High,
            642,
            instant(2024, 1, 19, 9, 15),
            ThreatStatus::Contained,
            "Calls announcing lottery winnings in exchange for a processing fee",
        ),
        campaign(
            "4",
            "Fake Windows Update Dropper",
            ThreatKind::Malware,
            &["micros0ft-update.ml"],
            Severity::Critical,
            918,
            instant(2024, 1, 20, 22, 45),
            ThreatStatus::Active,
            "Drive-by download disguised as a critical security update",
        ),
        campaign(
            "5",
            "Crypto Giveaway Spam Burst",
            ThreatKind::Spam,
            &["giveaway-btc.ga"],
            Severity::Medium,
            2210,
            instant(2024, 1, 17, 11, 0),
            ThreatStatus::Resolved,
            "Bulk messages promising doubled cryptocurrency deposits",
        ),
        campaign(
            "6",
            "Tax Refund SMS Phish",
            ThreatKind::Phishing,
            &["+1-800-555-7777"],
            Severity::Low,
            153,
            instant(2024, 1, 18, 16, 20),
            ThreatStatus::Contained,
            "Text messages offering a pending tax refund behind a login link",
        ),
    ]
}

pub fn detection_stats() -> DetectionStats {
    DetectionStats {
        accuracy: 97.8,
        total_scans: 1_247_893,
        threats_blocked: 109_814,
        last_update: instant(2024, 1, 21, 7, 30),
        model_version: "PhishGuard v1.2.4".to_string(),
    }
}

pub fn sample_reports() -> Vec<ReportData> {
    vec![
        ReportData {
            id: "1".to_string(),
            target: "paypa1-security.com".to_string(),
            kind: "URL".to_string(),
            threat_level: ThreatLevel::Dangerous,
            confidence: 95,
            indicators: tags(&[
                "Typosquatting",
                "SSL Certificate Mismatch",
                "Recent Domain Registration",
            ]),
            recommendation: "Block immediately and report to security team".to_string(),
            generated_at: instant(2024, 1, 21, 10, 30),
        },
        ReportData {
            id: "2".to_string(),
            target: "security@amazom-support.net".to_string(),
            kind: "Email".to_string(),
            threat_level: ThreatLevel::Dangerous,
            confidence: 92,
            indicators: tags(&["Domain Spoofing", "Suspicious TLD", "Mass Distribution"]),
            recommendation: "Add to spam filter and educate users about this threat".to_string(),
            generated_at: instant(2024, 1, 21, 9, 15),
        },
        ReportData {
            id: "3".to_string(),
            target: "+1-888-555-0199".to_string(),
            kind: "Phone".to_string(),
            threat_level: ThreatLevel::Suspicious,
            confidence: 78,
            indicators: tags(&["Toll-Free Spoofing", "Multiple Reports", "Robocall Pattern"]),
            recommendation: "Monitor for additional reports and consider blocking".to_string(),
            generated_at: instant(2024, 1, 21, 8, 45),
        },
    ]
}
