use crate::models::{AnalysisResult, ResultStatus};

const NO_INSIGHTS: &str = "No specific insights available for your query.";

fn status_description(status: ResultStatus) -> &'static str {
    match status {
        ResultStatus::Normal => "within normal range",
        ResultStatus::High => "above normal range - may require attention",
        ResultStatus::Low => "below normal range - may require attention",
        ResultStatus::Critical => "critically abnormal - requires immediate attention",
        ResultStatus::Abnormal => "outside normal range - may require attention",
        ResultStatus::Unknown => "status unknown",
    }
}

/// Plain-text summary of an analysis for a patient-facing answer.
pub fn explain(analysis: &AnalysisResult, query: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    let query = query.trim();
    if !query.is_empty() {
        lines.push(format!("Regarding your question: '{query}'"));
    }

    if !analysis.test_results.is_empty() {
        lines.push("\n**Test Results Explanation:**".to_string());
        for test in &analysis.test_results {
            lines.push(format!(
                "- {} ({})",
                test.display_value(),
                status_description(test.status)
            ));
        }
    }

    if !analysis.medications.is_empty() {
        lines.push("\n**Medication Information:**".to_string());
        for med in &analysis.medications {
            let detail = [med.dosage.as_str(), med.frequency.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("- {}: {detail}", med.name));
        }
    }

    if !analysis.risk_factors.is_empty() {
        lines.push("\n**Important Considerations:**".to_string());
        for risk in &analysis.risk_factors {
            lines.push(format!("- {}", risk.description));
        }
    }

    if lines.is_empty() {
        NO_INSIGHTS.to_string()
    } else {
        lines.join("\n")
    }
}
