use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::ReportType;
use super::lab::TestResult;
use super::medication::{Medication, MedicationInfo};
use super::risk::RiskFactor;

/// Key under which every analysis records its report category.
pub const REPORT_CATEGORY_KEY: &str = "report_category";

/// Clinical note attached to a flagged test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInsight {
    pub concern: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// One entry of the `insights` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insight {
    Category(String),
    Clinical(ClinicalInsight),
    Medication(MedicationInfo),
}

/// Structured facts derived from one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub report_type: ReportType,
    #[serde(default)]
    pub insights: BTreeMap<String, Insight>,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub confidence: f64,
    pub processing_time_seconds: f64,
}

impl AnalysisResult {
    pub fn empty(report_type: ReportType) -> Self {
        let mut insights = BTreeMap::new();
        insights.insert(
            REPORT_CATEGORY_KEY.to_string(),
            Insight::Category(report_type.category_label().to_string()),
        );
        Self {
            report_type,
            insights,
            test_results: Vec::new(),
            medications: Vec::new(),
            findings: Vec::new(),
            risk_factors: Vec::new(),
            recommendations: Vec::new(),
            confidence: 0.0,
            processing_time_seconds: 0.0,
        }
    }

    pub fn clinical_insight(&self, name: &str) -> Option<&ClinicalInsight> {
        match self.insights.get(name) {
            Some(Insight::Clinical(insight)) => Some(insight),
            _ => None,
        }
    }
}

/// Degraded result returned when an analysis aborts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub error: String,
    pub confidence: f64,
    pub processing_time_seconds: f64,
}

/// What the analyzer hands back to its caller. Never an `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Failed(AnalysisFailure),
    Completed(AnalysisResult),
}

impl AnalysisOutcome {
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Completed(result) => result.confidence,
            Self::Failed(failure) => failure.confidence,
        }
    }

    pub fn processing_time_seconds(&self) -> f64 {
        match self {
            Self::Completed(result) => result.processing_time_seconds,
            Self::Failed(failure) => failure.processing_time_seconds,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Failed(_) => None,
        }
    }

    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Failed(_) => None,
        }
    }
}
