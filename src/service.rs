//! Single entry point pairing the analyzer with the recommendation engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::knowledge::KnowledgeBase;
use crate::models::{AnalysisOutcome, RecommendationResult};
use crate::pipeline::{explain, AnalysisError, ReportAnalyzer};
use crate::recommendation::RecommendationEngine;

const EXPLANATION_UNAVAILABLE: &str =
    "Sorry, I couldn't generate a detailed explanation at this time.";

/// Everything produced for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub analysis: AnalysisOutcome,
    pub recommendations: RecommendationResult,
    pub explanation: String,
}

/// Analyzer and recommendation engine sharing one knowledge base.
pub struct MediGuide {
    analyzer: ReportAnalyzer,
    engine: RecommendationEngine,
}

impl MediGuide {
    pub fn new(kb: Arc<KnowledgeBase>, config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        Ok(Self {
            analyzer: ReportAnalyzer::new(Arc::clone(&kb), config)?,
            engine: RecommendationEngine::new(kb),
        })
    }

    /// Bundled knowledge base and default settings.
    pub fn with_defaults() -> Result<Self, AnalysisError> {
        Self::new(Arc::new(KnowledgeBase::bundled()?), AnalyzerConfig::default())
    }

    pub fn analyzer(&self) -> &ReportAnalyzer {
        &self.analyzer
    }

    pub fn process(&self, text: Option<&str>, report_type: Option<&str>, query: &str) -> ReportBundle {
        let analysis = self.analyzer.analyze(text, report_type);
        let recommendations = self.engine.generate_for_outcome(&analysis);
        let explanation = match analysis.result() {
            Some(result) => explain(result, query),
            None => EXPLANATION_UNAVAILABLE.to_string(),
        };
        ReportBundle {
            analysis,
            recommendations,
            explanation,
        }
    }
}
