//! Active threat campaigns and the simulated live feed that keeps their
//! affected-user counters moving.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    Phishing,
    Scam,
    Malware,
    Spam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatStatus {
    Active,
    Contained,
    Resolved,
}

impl ThreatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatKind::Phishing => "phishing",
            ThreatKind::Scam => "scam",
            ThreatKind::Malware => "malware",
            ThreatKind::Spam => "spam",
        }
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl ThreatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatStatus::Active => "active",
            ThreatStatus::Contained => "contained",
            ThreatStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ThreatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for ThreatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveThreat {
    pub id: String,
    pub name: String,
    pub kind: ThreatKind,
    pub targets: Vec<String>,
    pub severity: Severity,
    pub affected_users: u64,
    pub first_detected: DateTime<Utc>,
    pub status: ThreatStatus,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatFilter {
    All,
    Active,
    High,
    Critical,
}

impl ThreatFilter {
    pub fn accepts(&self, threat: &ActiveThreat) -> bool {
        match self {
            ThreatFilter::All => true,
            ThreatFilter::Active => threat.status == ThreatStatus::Active,
            ThreatFilter::High => threat.severity == Severity::High,
            ThreatFilter::Critical => threat.severity == Severity::Critical,
        }
    }
}

impl FromStr for ThreatFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ThreatFilter::All),
            "active" => Ok(ThreatFilter::Active),
            "high" => Ok(ThreatFilter::High),
            "critical" => Ok(ThreatFilter::Critical),
            other => bail!("Unknown threat filter '{other}' (expected all, active, high or critical)"),
        }
    }
}

pub fn filter_threats(threats: &[ActiveThreat], filter: ThreatFilter) -> Vec<&ActiveThreat> {
    threats.iter().filter(|t| filter.accepts(t)).collect()
}

/// "Just now", "5h ago" or "3d ago".
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - then).num_hours();
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// One simulated feed update: active campaigns pick up
/// `[0, max_increment)` newly affected users each.
pub fn apply_activity_tick<R: Rng>(threats: &mut [ActiveThreat], rng: &mut R, max_increment: u64) {
    if max_increment == 0 {
        return;
    }
    for threat in threats.iter_mut() {
        if threat.status == ThreatStatus::Active {
            threat.affected_users += rng.gen_range(0..max_increment);
        }
    }
}

pub fn render_threat(threat: &ActiveThreat, now: DateTime<Utc>) -> String {
    format!(
        "⚠️  {} [{} | {}]\n    {}\n    Type: {}  Users: {}  Detected: {}\n    Targets: {}",
        threat.name,
        threat.severity.to_string().to_uppercase(),
        threat.status.to_string().to_uppercase(),
        threat.description,
        threat.kind,
        threat.affected_users,
        format_time_ago(threat.first_detected, now),
        threat.targets.join(", ")
    )
}

pub struct ThreatMonitor {
    threats: Vec<ActiveThreat>,
    interval: Duration,
    max_increment: u64,
    running: Arc<AtomicBool>,
}

impl ThreatMonitor {
    pub fn new(threats: Vec<ActiveThreat>, interval: Duration, max_increment: u64) -> Self {
        Self {
            threats,
            interval,
            max_increment,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn threats(&self) -> &[ActiveThreat] {
        &self.threats
    }

    /// Handle that stops `run` after the current tick when cleared.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Ticks until stopped or until `max_ticks` updates have been applied,
    /// handing the filtered view to `on_tick` after each one.
    pub async fn run<F>(&mut self, filter: ThreatFilter, max_ticks: Option<u64>, mut on_tick: F)
    where
        F: FnMut(u64, &[&ActiveThreat]),
    {
        let mut ticker = interval(self.interval);
        // the first tick completes immediately
        ticker.tick().await;

        let mut tick = 0u64;
        while self.running.load(Ordering::SeqCst) {
            if max_ticks.is_some_and(|max| tick >= max) {
                break;
            }
            ticker.tick().await;
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            apply_activity_tick(&mut self.threats, &mut rand::thread_rng(), self.max_increment);
            tick += 1;
            log::debug!("Monitor tick {tick}");

            let view = filter_threats(&self.threats, filter);
            on_tick(tick, &view);
        }
        log::info!("Threat monitor stopped after {tick} updates");
    }
}
