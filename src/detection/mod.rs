pub mod heuristics;

use crate::store::{IndicatorSource, IndicatorStore};
use crate::types::{Category, ClassificationResult, ThreatLevel};
use chrono::Utc;

pub const DEFAULT_CONFIDENCE: u8 = 85;
pub const DEFAULT_EXPLANATION: &str = "No known threats detected";

/// Verdict fields before the result is stamped with input and time.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub verdict: ThreatLevel,
    pub confidence: u8,
    pub explanation: String,
    pub indicators: Vec<String>,
}

impl Assessment {
    fn clean() -> Self {
        Self {
            verdict: ThreatLevel::Safe,
            confidence: DEFAULT_CONFIDENCE,
            explanation: DEFAULT_EXPLANATION.to_string(),
            indicators: Vec::new(),
        }
    }
}

pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

pub struct Classifier<S: IndicatorSource = IndicatorStore> {
    source: S,
}

impl Default for Classifier<IndicatorStore> {
    fn default() -> Self {
        Self::new(IndicatorStore::default())
    }
}

impl<S: IndicatorSource> Classifier<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Known indicators first, then the category's heuristics.
    pub fn assess(&self, input: &str, category: Category) -> Assessment {
        let needle = normalize(input);

        if !needle.is_empty() {
            if let Some(record) = self.source.lookup(category, &needle) {
                log::debug!(
                    "'{}' matched known {} indicator '{}' ({})",
                    needle,
                    category,
                    record.value,
                    record.threat_level
                );
                return Assessment {
                    verdict: record.threat_level,
                    confidence: record.confidence,
                    explanation: record.description.clone(),
                    indicators: record.indicators.clone(),
                };
            }
        }

        let rule = heuristics::rule_for(category);
        if rule.fires(&needle) {
            log::debug!("'{}' tripped {} heuristics", needle, category);
            return Assessment {
                verdict: ThreatLevel::Suspicious,
                confidence: rule.confidence,
                explanation: rule.explanation.to_string(),
                indicators: rule.indicators.iter().map(|s| s.to_string()).collect(),
            };
        }

        log::debug!("'{}' is clean as {}", needle, category);
        Assessment::clean()
    }

    pub fn classify(&self, input: &str, category: Category) -> ClassificationResult {
        let assessment = self.assess(input, category);
        let timestamp = Utc::now();

        ClassificationResult {
            id: timestamp.timestamp_millis().to_string(),
            input: input.to_string(),
            category,
            verdict: assessment.verdict,
            confidence: assessment.confidence,
            explanation: assessment.explanation,
            indicators: assessment.indicators,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndicatorRecord;

    fn classifier() -> Classifier {
        Classifier::default()
    }

    #[test]
    fn test_known_indicators_round_trip() {
        let classifier = classifier();
        for record in classifier.source().records() {
            let result = classifier.classify(&record.value, record.category);
            assert_eq!(result.verdict, record.threat_level, "{}", record.value);
            assert_eq!(result.confidence, record.confidence);
            assert_eq!(result.indicators, record.indicators);
            assert_eq!(result.explanation, record.description);
        }
    }

    #[test]
    fn test_url_heuristics() {
        let result = classifier().classify("secure-update.com", Category::Url);
        assert_eq!(result.verdict, ThreatLevel::Suspicious);
        assert_eq!(result.confidence, 72);
        assert!(result
            .indicators
            .contains(&"Suspicious Domain Pattern".to_string()));
        assert!(result.indicators.contains(&"Uncommon TLD".to_string()));
    }

    #[test]
    fn test_clean_email() {
        let result = classifier().classify("friend@gmail.com", Category::Email);
        assert_eq!(result.verdict, ThreatLevel::Safe);
        assert_eq!(result.confidence, 85);
        assert_eq!(result.explanation, DEFAULT_EXPLANATION);
        assert!(result.indicators.is_empty());
    }

    #[test]
    fn test_only_ascii_digits_count() {
        let classifier = classifier();
        for (input, category) in [
            ("\u{0661}\u{0662}example.com", Category::Url),
            ("bob@mail\u{0663}world.com", Category::Email),
            ("\u{0663}\u{0663}\u{0663}\u{0663}", Category::Phone),
        ] {
            let result = classifier.classify(input, category);
            assert_eq!(result.verdict, ThreatLevel::Safe, "{input}");
            assert_eq!(result.confidence, DEFAULT_CONFIDENCE);
        }
    }

    #[test]
    fn test_area_code_heuristics() {
        let result = classifier().classify("+900", Category::AreaCode);
        assert_eq!(result.verdict, ThreatLevel::Suspicious);
        assert_eq!(result.confidence, 76);
        assert_eq!(result.indicators, vec!["High-Risk Region", "Premium Rate"]);
    }

    #[test]
    fn test_toll_free_phone() {
        let result = classifier().classify("1-888-555-0199", Category::Phone);
        assert_eq!(result.verdict, ThreatLevel::Suspicious);
        assert_eq!(result.confidence, 64);
    }

    #[test]
    fn test_clean_inputs_per_category() {
        let classifier = classifier();
        let cases = [
            ("example.org", Category::Url),
            ("friend@gmail.com", Category::Email),
            ("555-0142", Category::Phone),
            ("+44", Category::AreaCode),
        ];
        for (input, category) in cases {
            let result = classifier.classify(input, category);
            assert_eq!(result.verdict, ThreatLevel::Safe, "{input}");
            assert_eq!(result.confidence, 85);
            assert!(result.indicators.is_empty());
        }
    }

    #[test]
    fn test_heuristics_never_reach_dangerous() {
        let classifier = Classifier::new(IndicatorStore::new(Vec::new()));
        let inputs = [
            "paypa1-security.com",
            "secure-login.tk",
            "security@amazom-support.net",
            "1-800-999-9999",
            "+876",
            "",
            "   ",
        ];
        for category in Category::ALL {
            for input in inputs {
                let result = classifier.classify(input, category);
                assert_ne!(result.verdict, ThreatLevel::Dangerous);
            }
        }
    }

    #[test]
    fn test_idempotent_apart_from_time() {
        let classifier = classifier();
        let first = classifier.classify("amaz0n-verify.tk", Category::Url);
        let second = classifier.classify("amaz0n-verify.tk", Category::Url);
        assert!(first.same_verdict(&second));
    }

    #[test]
    fn test_normalization() {
        let classifier = classifier();
        let padded = classifier.classify("  PayPa1-Security.com  ", Category::Url);
        let plain = classifier.classify("paypa1-security.com", Category::Url);
        assert!(padded.same_verdict(&plain));
        assert_eq!(padded.verdict, ThreatLevel::Dangerous);
        // original input is kept for display
        assert_eq!(padded.input, "  PayPa1-Security.com  ");
        assert_eq!(padded.category, Category::Url);
    }

    #[test]
    fn test_substring_lookup_is_recall_biased() {
        // a fragment of a known value resolves to that record
        let result = classifier().classify("amazom", Category::Email);
        assert_eq!(result.verdict, ThreatLevel::Dangerous);
        assert_eq!(result.confidence, 92);
    }

    #[test]
    fn test_empty_input_falls_through() {
        let classifier = classifier();
        for category in Category::ALL {
            let result = classifier.classify("   ", category);
            assert_eq!(result.verdict, ThreatLevel::Safe);
            assert_eq!(result.confidence, 85);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive_on_stored_value() {
        let store = IndicatorStore::new(vec![IndicatorRecord {
            value: "EVIL-Example.COM".to_string(),
            ..crate::fixtures::phishing_database().remove(0)
        }]);
        let result = Classifier::new(store).classify("evil-example", Category::Url);
        assert_eq!(result.verdict, ThreatLevel::Dangerous);
    }

    struct SingleRecord(Vec<IndicatorRecord>);

    impl IndicatorSource for SingleRecord {
        fn records(&self) -> &[IndicatorRecord] {
            &self.0
        }
    }

    #[test]
    fn test_custom_source() {
        let mut record = crate::fixtures::phishing_database().remove(0);
        record.value = "tracker.example".to_string();
        record.threat_level = ThreatLevel::Suspicious;
        record.confidence = 55;
        let classifier = Classifier::new(SingleRecord(vec![record]));

        let result = classifier.classify("tracker.example", Category::Url);
        assert_eq!(result.verdict, ThreatLevel::Suspicious);
        assert_eq!(result.confidence, 55);
    }
}
