pub mod dedup;
pub mod imaging;
pub mod labs;
pub mod medications;
pub mod sanitize;
pub mod terms;
pub mod vitals;

pub use dedup::*;
pub use sanitize::*;
pub use terms::TermHit;

use regex::{Regex, RegexBuilder};

use crate::config::AnalyzerConfig;
use crate::knowledge::{ConcerningTerm, KnowledgeBase, KnowledgeError};
use crate::models::{ReportType, TestKind};

/// A numeric value found in text, not yet judged against a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
    pub kind: TestKind,
    pub raw_match: String,
    pub offset: usize,
}

struct NamedPattern {
    name: String,
    regex: Regex,
}

/// Compiled pattern library built from a `KnowledgeBase`.
///
/// Construction compiles every regex once; extraction itself never fails.
/// Misses produce empty lists and unparseable numbers are skipped.
pub struct EntityExtractor {
    labs: Vec<NamedPattern>,
    vitals: Vec<NamedPattern>,
    blood_pressure: Regex,
    medication_families: Vec<Regex>,
    lexicon: Option<Regex>,
    frequencies: Vec<Regex>,
    default_frequency: String,
    imaging: Vec<Regex>,
    concerning: Vec<(Regex, ConcerningTerm)>,
    report_types: Vec<(ReportType, Regex)>,
    context_window: usize,
    min_finding_chars: usize,
}

/// Case-insensitive regex; a failure names the pattern that broke.
pub(crate) fn compile(name: &str, pattern: &str) -> Result<Regex, KnowledgeError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| KnowledgeError::InvalidPattern {
            name: name.to_string(),
            source,
        })
}

impl EntityExtractor {
    pub fn new(kb: &KnowledgeBase, config: &AnalyzerConfig) -> Result<Self, KnowledgeError> {
        let labs = kb
            .lab_tests
            .iter()
            .map(|t| {
                Ok(NamedPattern {
                    name: t.display_name.clone(),
                    regex: compile(&t.id, &t.pattern)?,
                })
            })
            .collect::<Result<Vec<_>, KnowledgeError>>()?;

        let vitals = kb
            .vital_signs
            .iter()
            .map(|v| {
                Ok(NamedPattern {
                    name: v.display_name.clone(),
                    regex: compile(&v.id, &v.pattern)?,
                })
            })
            .collect::<Result<Vec<_>, KnowledgeError>>()?;

        let medication_families = kb
            .medication_patterns
            .iter()
            .enumerate()
            .map(|(i, p)| compile(&format!("medication_patterns[{i}]"), p))
            .collect::<Result<Vec<_>, _>>()?;

        let frequencies = kb
            .frequency_patterns
            .iter()
            .enumerate()
            .map(|(i, p)| compile(&format!("frequency_patterns[{i}]"), p))
            .collect::<Result<Vec<_>, _>>()?;

        let imaging = kb
            .imaging_patterns
            .iter()
            .enumerate()
            .map(|(i, p)| compile(&format!("imaging_patterns[{i}]"), p))
            .collect::<Result<Vec<_>, _>>()?;

        let concerning = kb
            .concerning_terms
            .iter()
            .map(|t| {
                Ok((compile(&t.term, &word_bounded(&t.term))?, t.clone()))
            })
            .collect::<Result<Vec<_>, KnowledgeError>>()?;

        let report_types = kb
            .report_type_keywords
            .iter()
            .map(|k| Ok((k.report_type, compile(k.report_type.as_str(), &k.pattern)?)))
            .collect::<Result<Vec<_>, KnowledgeError>>()?;

        Ok(Self {
            labs,
            vitals,
            blood_pressure: compile("blood_pressure", &kb.blood_pressure.pattern)?,
            medication_families,
            lexicon: medications::lexicon_pattern(&kb.substance_vocabulary())?,
            frequencies,
            default_frequency: kb.default_frequency.clone(),
            imaging,
            concerning,
            report_types,
            context_window: config.context_window_chars,
            min_finding_chars: config.min_finding_chars,
        })
    }

    /// Guess the report type from keywords; `General` when nothing matches.
    pub fn sniff_report_type(&self, text: &str) -> ReportType {
        self.report_types
            .iter()
            .find(|(_, regex)| regex.is_match(text))
            .map(|(report_type, _)| *report_type)
            .unwrap_or(ReportType::General)
    }
}

/// Escaped literal with `\b` on each edge that starts or ends with a word character.
pub(crate) fn word_bounded(literal: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let head = if literal.chars().next().is_some_and(is_word) { r"\b" } else { "" };
    let tail = if literal.chars().last().is_some_and(is_word) { r"\b" } else { "" };
    format!("{head}{}{tail}", regex::escape(literal))
}

/// Slice of `text` reaching `radius` bytes either side of `start..end`,
/// widened to the nearest char boundaries.
pub(crate) fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let mut lo = start.saturating_sub(radius);
    while !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = end.saturating_add(radius).min(text.len());
    while !text.is_char_boundary(hi) {
        hi += 1;
    }
    &text[lo..hi]
}

/// `"metformin"` -> `"Metformin"`, `"ace inhibitor"` -> `"Ace Inhibitor"`.
pub(crate) fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) fn test_extractor() -> EntityExtractor {
    let kb = KnowledgeBase::bundled().unwrap();
    EntityExtractor::new(&kb, &AnalyzerConfig::default()).unwrap()
}
