use serde::{Deserialize, Serialize};

use crate::models::{MedicationInfo, ResultStatus, RiskSeverity, TestResult};

/// Matches a test result by name keyword and status.
///
/// Empty `keywords` matches any name; empty `statuses` matches any status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionMatch {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<ResultStatus>,
}

impl ConditionMatch {
    pub fn matches(&self, result: &TestResult) -> bool {
        self.matches_name(&result.name)
            && (self.statuses.is_empty() || self.statuses.contains(&result.status))
    }

    pub fn matches_name(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.keywords.is_empty() || self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

/// Note attached to a flagged test result of a known family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRule {
    pub when: ConditionMatch,
    pub concern: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRule {
    pub when: ConditionMatch,
    pub risk_type: String,
    pub severity: RiskSeverity,
    pub description: String,
}

/// Two substances (or classes) that should not be combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPair {
    pub first: String,
    pub second: String,
    pub warning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationReference {
    pub name: String,
    #[serde(flatten)]
    pub info: MedicationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcerningTerm {
    pub term: String,
    pub severity: RiskSeverity,
}

/// Keyword sniffed from raw text when no usable report-type hint is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTypeKeyword {
    pub report_type: crate::models::ReportType,
    pub pattern: String,
}
