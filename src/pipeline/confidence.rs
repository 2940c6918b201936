use std::sync::LazyLock;

use regex::Regex;

/// Point caps for the three confidence components.
pub mod caps {
    /// Extracted test results and medications, 10 points each.
    pub const ENTITIES: f64 = 50.0;

    /// Medical keywords present in the text, 5 points each.
    pub const KEYWORDS: f64 = 30.0;

    /// Numeric tokens in the text, 2 points each.
    pub const NUMBERS: f64 = 20.0;

    pub const MAX: f64 = 100.0;
}

static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("valid numeric token regex"));

/// Heuristic extraction-richness score in `[0, 100]`.
///
/// `keywords` are counted once each if present anywhere in the text
/// (case-insensitive substring).
pub fn compute_confidence(text: &str, entity_count: usize, keywords: &[String]) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let lower = text.to_lowercase();
    let keyword_hits = keywords
        .iter()
        .filter(|k| lower.contains(k.to_lowercase().as_str()))
        .count();
    let numbers = NUMERIC_TOKEN.find_iter(text).count();

    let entities = (entity_count as f64 * 10.0).min(caps::ENTITIES);
    let terms = (keyword_hits as f64 * 5.0).min(caps::KEYWORDS);
    let numeric = (numbers as f64 * 2.0).min(caps::NUMBERS);

    (entities + terms + numeric).clamp(0.0, caps::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        ["patient", "doctor", "test", "result", "normal", "abnormal", "medication"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(compute_confidence("", 0, &keywords()), 0.0);
        assert_eq!(compute_confidence("   ", 3, &keywords()), 0.0);
    }

    #[test]
    fn glucose_line() {
        // One entity (10) + no keywords + one number (2).
        assert_eq!(compute_confidence("Glucose: 180 mg/dL", 1, &keywords()), 12.0);
    }

    #[test]
    fn components_are_capped() {
        let text = format!(
            "patient doctor test result normal abnormal medication {}",
            "1 ".repeat(50)
        );
        assert_eq!(compute_confidence(&text, 20, &keywords()), 100.0);
    }

    #[test]
    fn keywords_count_once_each() {
        let once = compute_confidence("patient", 0, &keywords());
        let thrice = compute_confidence("patient patient patient", 0, &keywords());
        assert_eq!(once, 5.0);
        assert_eq!(thrice, 5.0);
    }

    #[test]
    fn abnormal_also_contains_normal() {
        assert_eq!(compute_confidence("abnormal", 0, &keywords()), 10.0);
    }

    #[test]
    fn monotonic_in_entities_up_to_cap() {
        let text = "Patient test result 1 2 3";
        let mut previous = 0.0;
        for n in 0..10 {
            let score = compute_confidence(text, n, &keywords());
            assert!(score >= previous);
            assert!((0.0..=100.0).contains(&score));
            previous = score;
        }
        assert_eq!(
            compute_confidence(text, 5, &keywords()),
            compute_confidence(text, 9, &keywords())
        );
    }
}
