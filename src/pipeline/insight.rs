//! Insight and risk derivation from classified values, medications,
//! imaging findings and concerning terms.

use crate::knowledge::KnowledgeBase;
use crate::models::{
    AnalysisResult, ClinicalInsight, Insight, Medication, MedicationInfo, RiskFactor,
    RiskSeverity, TestResult, CONCERNING_TERM, DRUG_INTERACTION, IMAGING_FINDING,
};

use super::extraction::TermHit;

/// Clinical note for a flagged result of a known family, first rule wins.
pub fn clinical_insight(kb: &KnowledgeBase, result: &TestResult) -> Option<ClinicalInsight> {
    if !result.status.is_flagged() {
        return None;
    }
    kb.insight_rules
        .iter()
        .find(|rule| rule.when.matches(result))
        .map(|rule| ClinicalInsight {
            concern: rule.concern.clone(),
            recommendations: rule.recommendations.clone(),
        })
}

/// At most one risk factor per flagged result.
pub fn assess_risk(kb: &KnowledgeBase, result: &TestResult) -> Option<RiskFactor> {
    if !result.status.is_flagged() {
        return None;
    }
    kb.risk_rules
        .iter()
        .find(|rule| rule.when.matches(result))
        .map(|rule| RiskFactor::new(&rule.risk_type, &rule.description, rule.severity))
}

/// Attach insights, risk factors and the merged recommendation list for
/// every flagged test result already on `analysis`.
pub fn apply_test_insights(kb: &KnowledgeBase, analysis: &mut AnalysisResult) {
    let mut risks = Vec::new();
    for result in &analysis.test_results {
        if let Some(insight) = clinical_insight(kb, result) {
            for rec in &insight.recommendations {
                if !analysis.recommendations.contains(rec) {
                    analysis.recommendations.push(rec.clone());
                }
            }
            analysis
                .insights
                .insert(result.name.clone(), Insight::Clinical(insight));
        }
        if let Some(risk) = assess_risk(kb, result) {
            risks.push(risk);
        }
    }
    analysis.risk_factors.extend(risks);
}

/// Names a medication answers to: its own, plus its knowledge-base category
/// so that class-level pairs such as "ace inhibitor" apply.
fn medication_aliases(kb: &KnowledgeBase, medications: &[Medication]) -> Vec<String> {
    let mut aliases = Vec::new();
    for med in medications {
        aliases.push(med.name.to_lowercase());
        if let Some(info) = kb.medication_info(&med.name) {
            aliases.push(info.category.to_lowercase());
        }
    }
    aliases
}

/// One moderate risk per interaction pair whose members both appear
/// (substring match) among the extracted medications.
pub fn check_interactions(kb: &KnowledgeBase, medications: &[Medication]) -> Vec<RiskFactor> {
    let aliases = medication_aliases(kb, medications);
    let present = |substance: &str| {
        let needle = substance.to_lowercase();
        aliases.iter().any(|alias| alias.contains(&needle))
    };

    kb.interactions
        .iter()
        .filter(|pair| present(&pair.first) && present(&pair.second))
        .map(|pair| {
            tracing::debug!(first = %pair.first, second = %pair.second, "Drug interaction detected");
            let mut risk = RiskFactor::new(
                DRUG_INTERACTION,
                &format!(
                    "Potential interaction between {} and {}: {}",
                    pair.first, pair.second, pair.warning
                ),
                RiskSeverity::Moderate,
            );
            risk.drugs = vec![pair.first.to_lowercase(), pair.second.to_lowercase()];
            risk
        })
        .collect()
}

/// Metadata for each distinct known medication, keyed by lowercase name.
pub fn medication_metadata(
    kb: &KnowledgeBase,
    medications: &[Medication],
) -> Vec<(String, MedicationInfo)> {
    let mut seen: Vec<(String, MedicationInfo)> = Vec::new();
    for med in medications {
        let key = med.name.to_lowercase();
        if seen.iter().any(|(name, _)| *name == key) {
            continue;
        }
        if let Some(info) = kb.medication_info(&key) {
            seen.push((key, info.clone()));
        }
    }
    seen
}

pub fn is_concerning_finding(kb: &KnowledgeBase, finding: &str) -> Option<String> {
    let lower = finding.to_lowercase();
    kb.imaging_concerning_terms
        .iter()
        .find(|term| lower.contains(term.to_lowercase().as_str()))
        .cloned()
}

/// A `requires_attention` flag for each finding mentioning a concerning word.
pub fn imaging_risks(kb: &KnowledgeBase, findings: &[String]) -> Vec<RiskFactor> {
    findings
        .iter()
        .filter_map(|finding| {
            let term = is_concerning_finding(kb, finding)?;
            let mut risk = RiskFactor::new(
                IMAGING_FINDING,
                &format!("Imaging finding requires attention: {finding}"),
                RiskSeverity::RequiresAttention,
            );
            risk.term = Some(term);
            Some(risk)
        })
        .collect()
}

pub fn term_risks(hits: Vec<TermHit>) -> Vec<RiskFactor> {
    hits.into_iter()
        .map(|hit| {
            let mut risk = RiskFactor::new(
                CONCERNING_TERM,
                &format!("Concerning term found: {}", hit.term),
                hit.severity,
            );
            risk.term = Some(hit.term);
            risk.context = Some(hit.context);
            risk
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReportType, ResultStatus, TestKind};

    fn kb() -> KnowledgeBase {
        KnowledgeBase::bundled().unwrap()
    }

    fn result(name: &str, value: f64, status: ResultStatus) -> TestResult {
        TestResult {
            name: name.into(),
            value,
            unit: String::new(),
            reference_range: "N/A".into(),
            status,
            kind: TestKind::Lab,
            raw_match: String::new(),
            offset: 0,
        }
    }

    fn med(name: &str) -> Medication {
        Medication {
            name: name.into(),
            dosage: String::new(),
            frequency: "as directed".into(),
            raw_match: name.into(),
            offset: 0,
        }
    }

    #[test]
    fn high_glucose_yields_diabetes_insight_and_risk() {
        let kb = kb();
        let glucose = result("Glucose", 180.0, ResultStatus::High);
        let insight = clinical_insight(&kb, &glucose).unwrap();
        assert!(insight.concern.contains("Elevated blood sugar"));
        let risk = assess_risk(&kb, &glucose).unwrap();
        assert_eq!(risk.risk_type, "diabetes_risk");
        assert_eq!(risk.severity, RiskSeverity::Moderate);
    }

    #[test]
    fn normal_and_unknown_results_produce_nothing() {
        let kb = kb();
        for status in [ResultStatus::Normal, ResultStatus::Unknown] {
            let r = result("Glucose", 90.0, status);
            assert!(clinical_insight(&kb, &r).is_none());
            assert!(assess_risk(&kb, &r).is_none());
        }
    }

    #[test]
    fn unlisted_family_has_no_insight() {
        let kb = kb();
        let r = result("Creatinine", 2.0, ResultStatus::High);
        assert!(clinical_insight(&kb, &r).is_none());
        assert!(assess_risk(&kb, &r).is_none());
    }

    #[test]
    fn critical_value_without_family_rule() {
        let r = result("Creatinine", 6.0, ResultStatus::Critical);
        let risk = assess_risk(&kb(), &r).unwrap();
        assert_eq!(risk.risk_type, "critical_value");
        assert_eq!(risk.severity, RiskSeverity::Severe);
    }

    #[test]
    fn low_hemoglobin_and_blood_pressure() {
        let kb = kb();
        let hb = result("Hemoglobin", 9.0, ResultStatus::Low);
        assert_eq!(assess_risk(&kb, &hb).unwrap().risk_type, "anemia_risk");
        assert!(clinical_insight(&kb, &hb).unwrap().concern.contains("anemia"));

        let bp = result("Systolic BP", 150.0, ResultStatus::Abnormal);
        assert_eq!(assess_risk(&kb, &bp).unwrap().risk_type, "hypertension_risk");
        assert!(clinical_insight(&kb, &bp).is_some());
    }

    #[test]
    fn apply_merges_recommendations_without_duplicates() {
        let kb = kb();
        let mut analysis = AnalysisResult::empty(ReportType::BloodTest);
        analysis.test_results = vec![
            result("Glucose", 180.0, ResultStatus::High),
            result("Cholesterol", 240.0, ResultStatus::High),
            result("HDL", 55.0, ResultStatus::Normal),
        ];
        apply_test_insights(&kb, &mut analysis);
        assert!(analysis.clinical_insight("Glucose").is_some());
        assert!(analysis.clinical_insight("Cholesterol").is_some());
        assert!(analysis.clinical_insight("HDL").is_none());
        assert_eq!(analysis.risk_factors.len(), 2);
        let exercise = analysis
            .recommendations
            .iter()
            .filter(|r| *r == "Regular exercise")
            .count();
        assert_eq!(exercise, 1);
    }

    #[test]
    fn metformin_and_alcohol_interact_once() {
        let risks = check_interactions(&kb(), &[med("Metformin"), med("Alcohol"), med("Metformin")]);
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].risk_type, DRUG_INTERACTION);
        assert_eq!(risks[0].severity, RiskSeverity::Moderate);
        assert_eq!(risks[0].drugs, vec!["metformin".to_string(), "alcohol".to_string()]);
    }

    #[test]
    fn interaction_matches_by_substring_and_category() {
        let kb = kb();
        let risks = check_interactions(&kb, &[med("Warfarin Sodium"), med("Aspirin")]);
        assert_eq!(risks.len(), 1);
        // Lisinopril is an ACE inhibitor in the medication table.
        let risks = check_interactions(&kb, &[med("Lisinopril"), med("Potassium")]);
        assert_eq!(risks.len(), 1);
        assert!(risks[0].description.contains("hyperkalemia"));
    }

    #[test]
    fn single_medication_has_no_interaction() {
        assert!(check_interactions(&kb(), &[med("Warfarin")]).is_empty());
        assert!(check_interactions(&kb(), &[]).is_empty());
    }

    #[test]
    fn metadata_for_known_medications_only() {
        let meta = medication_metadata(&kb(), &[med("Metformin"), med("Metformin"), med("Paracetamol")]);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].0, "metformin");
        assert_eq!(meta[0].1.purpose, "blood sugar control");
    }

    #[test]
    fn imaging_findings_flagged_by_vocabulary() {
        let findings = vec![
            "A 2 cm mass in the right upper lobe".to_string(),
            "clear lung fields bilaterally".to_string(),
        ];
        let risks = imaging_risks(&kb(), &findings);
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].severity, RiskSeverity::RequiresAttention);
        assert_eq!(risks[0].term.as_deref(), Some("mass"));
    }

    #[test]
    fn term_hits_become_risks() {
        let risks = term_risks(vec![TermHit {
            term: "urgent".into(),
            severity: RiskSeverity::Severe,
            context: "Urgent review advised".into(),
        }]);
        assert_eq!(risks[0].risk_type, CONCERNING_TERM);
        assert_eq!(risks[0].context.as_deref(), Some("Urgent review advised"));
    }
}
