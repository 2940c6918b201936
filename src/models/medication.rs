use serde::{Deserialize, Serialize};

/// A medication mention extracted from report text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default = "as_directed")]
    pub frequency: String,
    #[serde(default)]
    pub raw_match: String,
    #[serde(default)]
    pub offset: usize,
}

fn as_directed() -> String {
    "as directed".to_string()
}

impl Medication {
    pub fn span(&self) -> (usize, usize) {
        (self.offset, self.offset + self.raw_match.len())
    }
}

/// Reference metadata for a known medication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationInfo {
    pub category: String,
    pub purpose: String,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub interactions: Vec<String>,
}
