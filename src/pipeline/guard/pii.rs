use std::sync::LazyLock;

use regex::Regex;

/// One PII pattern and the placeholder that replaces it.
struct PiiPattern {
    name: &'static str,
    regex: &'static LazyLock<Regex>,
    placeholder: &'static str,
}

static SSN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap());
static CARD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{16}\b").unwrap());
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{3}-\d{3}-\d{4}\b").unwrap());

/// SSN and card patterns run before email/phone so the narrower digit shapes
/// are claimed first.
const PII_PATTERNS: &[PiiPattern] = &[
    PiiPattern { name: "ssn", regex: &SSN, placeholder: "[SSN]" },
    PiiPattern { name: "card", regex: &CARD, placeholder: "[CARD]" },
    PiiPattern { name: "email", regex: &EMAIL, placeholder: "[EMAIL]" },
    PiiPattern { name: "phone", regex: &PHONE, placeholder: "[PHONE]" },
];

/// Replaces PII spans with fixed placeholder tokens.
pub struct PiiScrubber;

impl PiiScrubber {
    /// Scrub `text`, returning the scrubbed copy and, per pattern that fired,
    /// its name and replacement count. Matched values are never returned or
    /// logged — only pattern names and counts.
    pub fn scrub(text: &str) -> (String, Vec<(&'static str, usize)>) {
        let mut scrubbed = text.to_string();
        let mut replaced = Vec::new();

        for pattern in PII_PATTERNS {
            let count = pattern.regex.find_iter(&scrubbed).count();
            if count > 0 {
                scrubbed = pattern
                    .regex
                    .replace_all(&scrubbed, pattern.placeholder)
                    .into_owned();
                replaced.push((pattern.name, count));
            }
        }

        (scrubbed, replaced)
    }
}
