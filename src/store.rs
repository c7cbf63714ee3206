use crate::fixtures;
use crate::types::{Category, IndicatorRecord};
use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Read-only access to known indicators.
///
/// The classifier only needs ordered iteration; `lookup` has a default
/// first-match implementation that a backing store may replace with an
/// index as long as it returns the same record.
pub trait IndicatorSource: Send + Sync {
    fn records(&self) -> &[IndicatorRecord];

    /// First record of `category` whose lower-cased value contains `needle`.
    /// `needle` is expected to be normalized already.
    fn lookup(&self, category: Category, needle: &str) -> Option<&IndicatorRecord> {
        self.records()
            .iter()
            .find(|r| r.category == category && r.value.to_lowercase().contains(needle))
    }
}

/// Category selector used by the database listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn accepts(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.parse()?))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorStore {
    records: Vec<IndicatorRecord>,
}

impl Default for IndicatorStore {
    fn default() -> Self {
        Self::new(fixtures::phishing_database())
    }
}

impl IndicatorStore {
    pub fn new(records: Vec<IndicatorRecord>) -> Self {
        Self { records }
    }

    /// Load a YAML list of indicator records, keeping file order.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read indicator database: {}", path.display()))?;
        let records: Vec<IndicatorRecord> = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse indicator database: {}", path.display()))?;

        for record in &records {
            if record.confidence > 100 {
                bail!(
                    "Indicator '{}' has confidence {} (must be 0-100)",
                    record.value,
                    record.confidence
                );
            }
        }

        log::info!(
            "Loaded {} indicators from {}",
            records.len(),
            path.display()
        );
        Ok(Self::new(records))
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(&self.records)?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive search over value and description, in stored order.
    /// An empty query matches everything.
    pub fn search(&self, query: &str, filter: CategoryFilter) -> Vec<&IndicatorRecord> {
        let query = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                let matches_search = r.value.to_lowercase().contains(&query)
                    || r.description.to_lowercase().contains(&query);
                matches_search && filter.accepts(r.category)
            })
            .collect()
    }
}

impl IndicatorSource for IndicatorStore {
    fn records(&self) -> &[IndicatorRecord] {
        &self.records
    }
}
