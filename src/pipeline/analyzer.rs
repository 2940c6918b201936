use std::sync::Arc;
use std::time::Instant;

use super::classify::classify_measurement;
use super::confidence::compute_confidence;
use super::extraction::{deduplicate, normalize_text, EntityExtractor};
use super::insight::{
    apply_test_insights, check_interactions, imaging_risks, medication_metadata, term_risks,
};
use super::AnalysisError;
use crate::config::AnalyzerConfig;
use crate::knowledge::KnowledgeBase;
use crate::models::{
    AnalysisFailure, AnalysisOutcome, AnalysisResult, Insight, Medication, ReportType, TestResult,
};

/// Sequences normalization, extraction, classification, derivation and
/// scoring for one report at a time.
///
/// Holds only read-only state, so one instance can serve concurrent callers.
pub struct ReportAnalyzer {
    kb: Arc<KnowledgeBase>,
    extractor: EntityExtractor,
    config: AnalyzerConfig,
}

impl ReportAnalyzer {
    /// Compiles every knowledge-base pattern up front.
    pub fn new(kb: Arc<KnowledgeBase>, config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        let extractor = EntityExtractor::new(&kb, &config)?;
        tracing::debug!(
            kb_version = %kb.version,
            deduplicate = config.deduplicate_entities,
            "Report analyzer ready"
        );
        Ok(Self {
            kb,
            extractor,
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one report. Never fails: aborted runs come back as
    /// `AnalysisOutcome::Failed` with zero confidence.
    ///
    /// `None` or blank text is not an error and yields an empty result.
    pub fn analyze(&self, text: Option<&str>, report_type: Option<&str>) -> AnalysisOutcome {
        let start = Instant::now();
        let raw = text.unwrap_or_default();
        let _span = tracing::info_span!(
            "analyze_report",
            input_len = raw.len(),
            hint = report_type.unwrap_or("none")
        )
        .entered();

        match self.run(raw, report_type) {
            Ok(mut analysis) => {
                analysis.processing_time_seconds = start.elapsed().as_secs_f64();
                tracing::info!(
                    report_type = %analysis.report_type,
                    tests = analysis.test_results.len(),
                    medications = analysis.medications.len(),
                    findings = analysis.findings.len(),
                    risks = analysis.risk_factors.len(),
                    confidence = analysis.confidence,
                    "Report analysis complete"
                );
                AnalysisOutcome::Completed(analysis)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Report analysis aborted");
                AnalysisOutcome::Failed(AnalysisFailure {
                    error: e.to_string(),
                    confidence: 0.0,
                    processing_time_seconds: start.elapsed().as_secs_f64(),
                })
            }
        }
    }

    fn run(&self, raw: &str, hint: Option<&str>) -> Result<AnalysisResult, AnalysisError> {
        let len = raw.chars().count();
        if len > self.config.max_input_chars {
            return Err(AnalysisError::InputTooLarge {
                len,
                max: self.config.max_input_chars,
            });
        }

        let text = normalize_text(raw);
        let report_type = self.resolve_report_type(hint, &text);
        let mut analysis = AnalysisResult::empty(report_type);
        if text.is_empty() {
            return Ok(analysis);
        }

        match report_type {
            ReportType::BloodTest => self.analyze_blood_test(&text, &mut analysis),
            ReportType::Prescription => self.analyze_prescription(&text, &mut analysis),
            ReportType::XRay => self.analyze_imaging(&text, &mut analysis),
            ReportType::General => self.analyze_general(&text, &mut analysis),
        }

        analysis.confidence = compute_confidence(
            &text,
            analysis.test_results.len() + analysis.medications.len(),
            &self.kb.confidence_keywords,
        );
        Ok(analysis)
    }

    /// A recognized, specific hint wins; otherwise sniff the text.
    fn resolve_report_type(&self, hint: Option<&str>, text: &str) -> ReportType {
        let hinted = hint.and_then(|h| {
            let h = h.trim().to_lowercase();
            match h.as_str() {
                "x-ray" | "xray" | "imaging" => Some(ReportType::XRay),
                other => other.parse::<ReportType>().ok(),
            }
        });
        match hinted {
            Some(report_type) if report_type != ReportType::General => report_type,
            _ => self.extractor.sniff_report_type(text),
        }
    }

    fn lab_results(&self, text: &str) -> Vec<TestResult> {
        self.extractor
            .extract_lab_values(text)
            .into_iter()
            .map(|m| classify_measurement(&self.kb, m))
            .collect()
    }

    fn vital_results(&self, text: &str) -> Vec<TestResult> {
        self.extractor
            .extract_vital_signs(text)
            .into_iter()
            .map(|m| classify_measurement(&self.kb, m))
            .collect()
    }

    fn medications(&self, text: &str) -> Vec<Medication> {
        let found = self.extractor.extract_medications(text);
        if self.config.deduplicate_entities {
            deduplicate(found)
        } else {
            found
        }
    }

    fn set_test_results(&self, analysis: &mut AnalysisResult, results: Vec<TestResult>) {
        analysis.test_results = if self.config.deduplicate_entities {
            deduplicate(results)
        } else {
            results
        };
    }

    fn attach_medication_facts(&self, analysis: &mut AnalysisResult) {
        analysis
            .risk_factors
            .extend(check_interactions(&self.kb, &analysis.medications));
        for (name, info) in medication_metadata(&self.kb, &analysis.medications) {
            analysis.insights.insert(name, Insight::Medication(info));
        }
    }

    fn analyze_blood_test(&self, text: &str, analysis: &mut AnalysisResult) {
        let results = self.lab_results(text);
        self.set_test_results(analysis, results);
        apply_test_insights(&self.kb, analysis);
    }

    fn analyze_prescription(&self, text: &str, analysis: &mut AnalysisResult) {
        analysis.medications = self.medications(text);
        self.attach_medication_facts(analysis);
    }

    fn analyze_imaging(&self, text: &str, analysis: &mut AnalysisResult) {
        analysis.findings = self.extractor.extract_imaging_findings(text);
        analysis
            .risk_factors
            .extend(imaging_risks(&self.kb, &analysis.findings));
    }

    fn analyze_general(&self, text: &str, analysis: &mut AnalysisResult) {
        let mut results = self.lab_results(text);
        results.extend(self.vital_results(text));
        self.set_test_results(analysis, results);
        apply_test_insights(&self.kb, analysis);

        analysis.medications = self.medications(text);
        self.attach_medication_facts(analysis);

        analysis.findings = self.extractor.extract_imaging_findings(text);
        analysis
            .risk_factors
            .extend(term_risks(self.extractor.find_concerning_terms(text)));
    }
}
