//! Recommendation synthesis.
//!
//! Turns an `AnalysisResult` into dietary, lifestyle, medication, follow-up,
//! emergency and wellness guidance. Each category lives in its own module and
//! reads only its slice of the knowledge-base rule tables. When no
//! condition-specific rule fires, the category still gets its general entry:
//! no signal is read as "apparently healthy".

pub mod dietary;
pub mod emergency;
pub mod follow_up;
pub mod lifestyle;
pub mod medication;
pub mod wellness;

use std::sync::Arc;

use crate::knowledge::KnowledgeBase;
use crate::models::{
    AnalysisOutcome, AnalysisResult, Medication, RecommendationResult, RiskFactor, TestResult,
};

// ─── Input ───────────────────────────────────────────────────────────────────

/// The parts of an analysis the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct ReportFacts<'a> {
    pub test_results: &'a [TestResult],
    pub medications: &'a [Medication],
    pub risk_factors: &'a [RiskFactor],
}

impl<'a> ReportFacts<'a> {
    pub fn from_analysis(analysis: &'a AnalysisResult) -> Self {
        Self {
            test_results: &analysis.test_results,
            medications: &analysis.medications,
            risk_factors: &analysis.risk_factors,
        }
    }

    pub fn empty() -> Self {
        Self {
            test_results: &[],
            medications: &[],
            risk_factors: &[],
        }
    }

    /// True when any medication name contains one of `keywords`
    /// (lowercase substring).
    pub(crate) fn has_medication(&self, keywords: &[String]) -> bool {
        self.medications.iter().any(|med| {
            let name = med.name.to_lowercase();
            keywords.iter().any(|k| name.contains(k.to_lowercase().as_str()))
        })
    }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Stateless apart from the shared, read-only knowledge base.
pub struct RecommendationEngine {
    kb: Arc<KnowledgeBase>,
}

impl RecommendationEngine {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    pub fn generate(&self, analysis: &AnalysisResult) -> RecommendationResult {
        self.generate_from_facts(ReportFacts::from_analysis(analysis))
    }

    /// For callers holding pre-parsed parts instead of a full analysis.
    pub fn generate_from_parts(
        &self,
        test_results: &[TestResult],
        medications: &[Medication],
        risk_factors: &[RiskFactor],
    ) -> RecommendationResult {
        self.generate_from_facts(ReportFacts {
            test_results,
            medications,
            risk_factors,
        })
    }

    /// A failed analysis carries no facts, so only general entries come back.
    pub fn generate_for_outcome(&self, outcome: &AnalysisOutcome) -> RecommendationResult {
        match outcome.result() {
            Some(analysis) => self.generate(analysis),
            None => self.generate_from_facts(ReportFacts::empty()),
        }
    }

    fn generate_from_facts(&self, facts: ReportFacts<'_>) -> RecommendationResult {
        let rules = &self.kb.recommendations;
        let result = RecommendationResult {
            dietary: dietary::recommend(&rules.dietary, &facts),
            lifestyle: lifestyle::recommend(&rules.lifestyle, &facts),
            medication_management: medication::recommend(&self.kb, &rules.medication, &facts),
            follow_up: follow_up::recommend(&rules.follow_up, &facts),
            emergency_signs: emergency::recommend(&rules.emergency, &facts),
            general_wellness: wellness::recommend(&rules.wellness),
        };

        tracing::debug!(
            dietary = result.dietary.len(),
            lifestyle = result.lifestyle.len(),
            medication = result.medication_management.len(),
            follow_up = result.follow_up.len(),
            emergency = result.emergency_signs.len(),
            wellness = result.general_wellness.len(),
            "Recommendations generated"
        );
        result
    }
}
