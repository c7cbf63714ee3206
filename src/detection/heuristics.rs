use crate::types::Category;
use lazy_static::lazy_static;
use regex::Regex;

/// A single boolean check against normalized input.
#[derive(Debug)]
pub enum PatternTest {
    Pattern(Regex),
    /// Input must equal one of the listed tokens exactly.
    OneOf(&'static [&'static str]),
    /// A run of at least `min_run` identical ASCII digits.
    RepeatedDigit { min_run: usize },
}

impl PatternTest {
    pub fn matches(&self, input: &str) -> bool {
        match self {
            PatternTest::Pattern(regex) => regex.is_match(input),
            PatternTest::OneOf(tokens) => tokens.iter().any(|t| *t == input),
            PatternTest::RepeatedDigit { min_run } => has_repeated_digit(input, *min_run),
        }
    }
}

fn has_repeated_digit(input: &str, min_run: usize) -> bool {
    let mut previous = None;
    let mut run = 0;
    for c in input.chars() {
        if c.is_ascii_digit() && Some(c) == previous {
            run += 1;
        } else {
            run = 1;
        }
        if c.is_ascii_digit() && run >= min_run {
            return true;
        }
        previous = Some(c);
    }
    false
}

/// The suspicious outcome a category falls into when any of its tests fire.
#[derive(Debug)]
pub struct HeuristicRule {
    pub confidence: u8,
    pub indicators: [&'static str; 2],
    pub explanation: &'static str,
    pub tests: Vec<PatternTest>,
}

impl HeuristicRule {
    /// OR over the tests, stopping at the first hit.
    pub fn fires(&self, input: &str) -> bool {
        self.tests.iter().any(|test| test.matches(input))
    }
}

const LOW_TRUST_TLDS: &str = r"(?i)\.(tk|ml|ga|cf)$";

pub const HIGH_RISK_AREA_CODES: &[&str] = &["+876", "+809", "+900", "+284", "+649"];

fn pattern(expr: &str) -> PatternTest {
    PatternTest::Pattern(Regex::new(expr).unwrap())
}

lazy_static! {
    static ref URL_RULE: HeuristicRule = HeuristicRule {
        confidence: 72,
        indicators: ["Suspicious Domain Pattern", "Uncommon TLD"],
        explanation: "URL shows suspicious characteristics but is not in known threat database",
        tests: vec![
            // digits are common in typosquatted hosts
            pattern(r"[0-9]"),
            pattern(r"(?i)secure|verify|update|confirm"),
            pattern(LOW_TRUST_TLDS),
        ],
    };
    static ref EMAIL_RULE: HeuristicRule = HeuristicRule {
        confidence: 68,
        indicators: ["Suspicious Domain", "Character Substitution"],
        explanation: "Email address shows patterns common in phishing attempts",
        tests: vec![
            pattern(r"@.*[0-9]+.*\."),
            pattern(r"(?i)noreply|no-reply|support|security"),
            pattern(LOW_TRUST_TLDS),
        ],
    };
    static ref PHONE_RULE: HeuristicRule = HeuristicRule {
        confidence: 64,
        indicators: ["Toll-Free Pattern", "Sequential Numbers"],
        explanation: "Phone number format associated with scam calls",
        tests: vec![
            pattern(r"1-800-|1-888-|1-877-"),
            PatternTest::RepeatedDigit { min_run: 4 },
        ],
    };
    static ref AREA_CODE_RULE: HeuristicRule = HeuristicRule {
        confidence: 76,
        indicators: ["High-Risk Region", "Premium Rate"],
        explanation: "Area code frequently associated with scam operations",
        tests: vec![PatternTest::OneOf(HIGH_RISK_AREA_CODES)],
    };
}

pub fn rule_for(category: Category) -> &'static HeuristicRule {
    match category {
        Category::Url => &URL_RULE,
        Category::Email => &EMAIL_RULE,
        Category::Phone => &PHONE_RULE,
        Category::AreaCode => &AREA_CODE_RULE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_compile() {
        for category in Category::ALL {
            let rule = rule_for(category);
            assert!(!rule.tests.is_empty());
            assert!(rule.confidence <= 100);
        }
    }

    #[test]
    fn test_url_rule() {
        let rule = rule_for(Category::Url);
        assert!(rule.fires("g00gle.com"));
        assert!(rule.fires("account-verify.net"));
        assert!(rule.fires("free-stuff.tk"));
        assert!(!rule.fires("example.com"));
        assert!(!rule.fires("free-stuff.tk.com"));
        assert!(!rule.fires("\u{0661}\u{0662}example.com"));
    }

    #[test]
    fn test_email_rule() {
        let rule = rule_for(Category::Email);
        assert!(rule.fires("alice@mail2world.com"));
        assert!(rule.fires("support@example.com"));
        assert!(rule.fires("bob@prizes.ml"));
        assert!(!rule.fires("friend@gmail.com"));
        // digits in the local part alone do not count
        assert!(!rule.fires("alice99@gmail.com"));
        assert!(!rule.fires("bob@mail\u{0663}world.com"));
    }

    #[test]
    fn test_phone_rule() {
        let rule = rule_for(Category::Phone);
        assert!(rule.fires("1-877-555-0100"));
        assert!(rule.fires("555-0000"));
        assert!(!rule.fires("555-0100"));
        assert!(!rule.fires("+44 20 7946 0958"));
    }

    #[test]
    fn test_area_code_rule_is_exact() {
        let rule = rule_for(Category::AreaCode);
        for code in HIGH_RISK_AREA_CODES {
            assert!(rule.fires(code));
        }
        assert!(!rule.fires("876"));
        assert!(!rule.fires("+8765"));
    }

    #[test]
    fn test_repeated_digit_runs() {
        assert!(has_repeated_digit("1111", 4));
        assert!(has_repeated_digit("12-99999", 4));
        assert!(!has_repeated_digit("111-1", 4));
        assert!(!has_repeated_digit("aaaa", 4));
        assert!(!has_repeated_digit("", 4));
    }
}
