use serde::{Deserialize, Serialize};

use super::enums::RiskSeverity;

/// A derived flag indicating elevated health risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    #[serde(rename = "type")]
    pub risk_type: String,
    pub description: String,
    pub severity: RiskSeverity,
    /// Substances involved, for drug interactions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drugs: Vec<String>,
    /// Matched vocabulary term, for concerning-term flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

pub const DRUG_INTERACTION: &str = "drug_interaction";
pub const IMAGING_FINDING: &str = "imaging_finding";
pub const CONCERNING_TERM: &str = "concerning_term";

impl RiskFactor {
    pub fn new(risk_type: &str, description: &str, severity: RiskSeverity) -> Self {
        Self {
            risk_type: risk_type.to_string(),
            description: description.to_string(),
            severity,
            drugs: Vec::new(),
            term: None,
            context: None,
        }
    }

    pub fn is_interaction(&self) -> bool {
        self.risk_type == DRUG_INTERACTION
    }
}
