use regex::Regex;

use super::{compile, context_window, title_case, word_bounded, EntityExtractor};
use crate::knowledge::KnowledgeError;
use crate::models::Medication;

/// Alternation over every known substance name, each optionally followed by
/// a dose. `None` when the vocabulary is empty.
pub(crate) fn lexicon_pattern(vocabulary: &[String]) -> Result<Option<Regex>, KnowledgeError> {
    if vocabulary.is_empty() {
        return Ok(None);
    }
    let names = vocabulary
        .iter()
        .map(|name| word_bounded(name))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"({names})(?:\s*(\d+(?:\.\d+)?)\s*(mg|g|ml|mcg)\b)?");
    compile("substance_lexicon", &pattern).map(Some)
}

impl EntityExtractor {
    /// Run every medication family over the text, then the substance lexicon.
    /// Overlapping matches from different families are all kept.
    pub fn extract_medications(&self, text: &str) -> Vec<Medication> {
        let mut found = Vec::new();

        for family in &self.medication_families {
            for caps in family.captures_iter(text) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let dosage = match (caps.get(2), caps.get(3)) {
                    (Some(dose), Some(unit)) => format!("{} {}", dose.as_str(), unit.as_str()),
                    _ => String::new(),
                };
                found.push(self.medication(text, name.as_str(), dosage, whole));
            }
        }

        if let Some(lexicon) = &self.lexicon {
            for caps in lexicon.captures_iter(text) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let dosage = match (caps.get(2), caps.get(3)) {
                    (Some(dose), Some(unit)) => format!("{} {}", dose.as_str(), unit.as_str()),
                    _ => String::new(),
                };
                found.push(self.medication(text, name.as_str(), dosage, whole));
            }
        }

        found
    }

    fn medication(&self, text: &str, name: &str, dosage: String, whole: regex::Match<'_>) -> Medication {
        Medication {
            name: title_case(name),
            dosage,
            frequency: self.extract_frequency(text, whole.start(), whole.end()),
            raw_match: whole.as_str().to_string(),
            offset: whole.start(),
        }
    }

    /// First frequency phrase near `start..end`, else the default.
    pub fn extract_frequency(&self, text: &str, start: usize, end: usize) -> String {
        let window = context_window(text, start, end, self.context_window);
        self.frequencies
            .iter()
            .find_map(|regex| regex.find(window))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| self.default_frequency.clone())
    }
}
