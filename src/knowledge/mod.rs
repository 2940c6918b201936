//! Reference knowledge base: normal ranges, vital bands, medication metadata,
//! interaction pairs, vocabularies and recommendation rule tables.
//!
//! Pure data. Loaded once (bundled JSON or a file on disk) and shared
//! read-only by the analyzer and the recommendation engine.

pub mod recommendation;
pub mod reference;
pub mod rules;

pub use recommendation::*;
pub use reference::*;
pub use rules::*;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::models::MedicationInfo;

const BUNDLED_KNOWLEDGE_BASE: &str = include_str!("../../resources/knowledge_base.json");

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge base load failed ({0}): {1}")]
    Load(String, String),

    #[error("Knowledge base parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Invalid pattern for {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub version: String,
    pub lab_tests: Vec<LabTestReference>,
    pub vital_signs: Vec<VitalReference>,
    pub blood_pressure: BloodPressureReference,
    /// Independent medication pattern families; groups are name, dose, unit.
    pub medication_patterns: Vec<String>,
    pub frequency_patterns: Vec<String>,
    pub default_frequency: String,
    /// Group 1 is the finding fragment.
    pub imaging_patterns: Vec<String>,
    pub imaging_concerning_terms: Vec<String>,
    pub medications: Vec<MedicationReference>,
    pub interactions: Vec<InteractionPair>,
    pub insight_rules: Vec<InsightRule>,
    pub risk_rules: Vec<RiskRule>,
    pub concerning_terms: Vec<ConcerningTerm>,
    pub confidence_keywords: Vec<String>,
    pub report_type_keywords: Vec<ReportTypeKeyword>,
    pub recommendations: RecommendationRules,
}

impl KnowledgeBase {
    /// The knowledge base compiled into the binary.
    pub fn bundled() -> Result<Self, KnowledgeError> {
        Self::from_json("bundled knowledge_base.json", BUNDLED_KNOWLEDGE_BASE)
    }

    /// Load a knowledge base from a JSON file.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| KnowledgeError::Load(path.display().to_string(), e.to_string()))?;
        Self::from_json(&path.display().to_string(), &json)
    }

    fn from_json(source: &str, json: &str) -> Result<Self, KnowledgeError> {
        let kb: Self = serde_json::from_str(json)
            .map_err(|e| KnowledgeError::Parse(source.to_string(), e.to_string()))?;
        tracing::debug!(
            source,
            version = %kb.version,
            lab_tests = kb.lab_tests.len(),
            medications = kb.medications.len(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    /// Pick the knowledge base for a host process: explicit path from the
    /// environment, then an override in the app data directory, then bundled.
    pub fn resolve() -> Result<Self, KnowledgeError> {
        if let Ok(path) = std::env::var(config::KNOWLEDGE_BASE_ENV) {
            return Self::load(&PathBuf::from(path));
        }
        if let Some(path) = config::knowledge_base_override() {
            if path.is_file() {
                return Self::load(&path);
            }
        }
        Self::bundled()
    }

    /// Exact lookup on a normalized test identifier.
    pub fn lab_test(&self, id: &str) -> Option<&LabTestReference> {
        self.lab_tests.iter().find(|t| t.id == id)
    }

    pub fn vital(&self, id: &str) -> Option<&VitalReference> {
        self.vital_signs.iter().find(|v| v.id == id)
    }

    /// Exact lowercase lookup in the medication table.
    pub fn medication_info(&self, name: &str) -> Option<&MedicationInfo> {
        let lower = name.to_lowercase();
        self.medications
            .iter()
            .find(|m| m.name.to_lowercase() == lower)
            .map(|m| &m.info)
    }

    /// Every substance name the knowledge base knows about, lowercased and
    /// deduplicated, longest first.
    pub fn substance_vocabulary(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .medications
            .iter()
            .map(|m| m.name.to_lowercase())
            .chain(
                self.interactions
                    .iter()
                    .flat_map(|i| [i.first.to_lowercase(), i.second.to_lowercase()]),
            )
            .collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup();
        names
    }
}
