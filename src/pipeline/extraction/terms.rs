use super::{context_window, EntityExtractor};
use crate::models::RiskSeverity;

/// First occurrence of a concerning vocabulary term, with surrounding text.
#[derive(Debug, Clone, PartialEq)]
pub struct TermHit {
    pub term: String,
    pub severity: RiskSeverity,
    pub context: String,
}

impl EntityExtractor {
    /// One hit per vocabulary term present, in vocabulary order.
    pub fn find_concerning_terms(&self, text: &str) -> Vec<TermHit> {
        self.concerning
            .iter()
            .filter_map(|(regex, term)| {
                let m = regex.find(text)?;
                Some(TermHit {
                    term: term.term.clone(),
                    severity: term.severity,
                    context: context_window(text, m.start(), m.end(), self.context_window)
                        .trim()
                        .to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_extractor;
    use crate::config::AnalyzerConfig;
    use crate::models::RiskSeverity;

    #[test]
    fn reports_each_term_once_with_context() {
        let text = "Results are elevated. Values remain elevated. Urgent review advised.";
        let hits = test_extractor().find_concerning_terms(text);
        let terms: Vec<&str> = hits.iter().map(|h| h.term.as_str()).collect();
        assert_eq!(terms, vec!["elevated", "urgent"]);
        assert_eq!(hits[1].severity, RiskSeverity::Severe);
        assert!(hits[0].context.contains("Results are elevated"));
    }

    #[test]
    fn whole_words_only() {
        // "highlight" and "below" contain vocabulary words but are not hits.
        let hits = test_extractor().find_concerning_terms("Highlight the section below");
        assert!(hits.is_empty());
    }

    #[test]
    fn context_is_bounded() {
        let padding = "x ".repeat(100);
        let text = format!("{padding}critical {padding}");
        let hits = test_extractor().find_concerning_terms(&text);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "critical");
        let radius = AnalyzerConfig::default().context_window_chars;
        assert!(hits[0].context.contains("critical"));
        assert!(hits[0].context.len() <= 2 * radius + "critical".len());
        assert!(hits[0].context.len() < text.len());
    }
}
