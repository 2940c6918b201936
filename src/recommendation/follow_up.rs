use crate::knowledge::FollowUpRules;
use crate::models::Recommendation;

use super::ReportFacts;

/// General monitoring, escalation tiers by result status, then
/// condition-specific monitoring plans.
pub fn recommend(rules: &FollowUpRules, facts: &ReportFacts<'_>) -> Vec<Recommendation> {
    let mut out = vec![rules.general.clone()];

    for tier in &rules.escalation {
        let flagged: Vec<String> = facts
            .test_results
            .iter()
            .filter(|r| tier.statuses.contains(&r.status))
            .map(|r| r.display_value())
            .collect();
        if flagged.is_empty() {
            continue;
        }
        let mut rec = tier.recommendation.clone();
        if let Some(key) = &tier.list_key {
            rec.extend_list(key, flagged);
        }
        out.push(rec);
    }

    for plan in &rules.monitoring {
        let fires = facts
            .test_results
            .iter()
            .any(|r| plan.when.iter().any(|cond| cond.matches(r)));
        if fires {
            out.push(plan.recommendation.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::models::{ResultStatus, TestKind, TestResult};

    fn result(name: &str, value: f64, status: ResultStatus) -> TestResult {
        TestResult {
            name: name.into(),
            value,
            unit: "mg/dL".into(),
            reference_range: "N/A".into(),
            status,
            kind: TestKind::Lab,
            raw_match: String::new(),
            offset: 0,
        }
    }

    fn follow_up(tests: &[TestResult]) -> Vec<Recommendation> {
        let kb = KnowledgeBase::bundled().unwrap();
        let facts = ReportFacts {
            test_results: tests,
            ..ReportFacts::empty()
        };
        recommend(&kb.recommendations.follow_up, &facts)
    }

    #[test]
    fn critical_values_are_listed_for_urgent_follow_up() {
        let recs = follow_up(&[
            result("Glucose", 450.0, ResultStatus::Critical),
            result("Creatinine", 1.0, ResultStatus::Normal),
        ]);
        let urgent = recs.iter().find(|r| r.category == "Urgent Follow-up").unwrap();
        assert_eq!(
            urgent.list("critical_values"),
            Some(&["Glucose: 450 mg/dL".to_string()][..])
        );
        assert_eq!(urgent.text("urgency"), Some("Within 24-48 hours"));
        assert!(recs.iter().all(|r| r.category != "Routine Follow-up"));
        assert!(recs.iter().any(|r| r.category == "Diabetes Monitoring"));
    }

    #[test]
    fn routine_follow_up_lists_only_high_values() {
        let recs = follow_up(&[
            result("Glucose", 130.0, ResultStatus::High),
            result("Hemoglobin", 10.0, ResultStatus::Low),
        ]);
        let routine = recs.iter().find(|r| r.category == "Routine Follow-up").unwrap();
        assert_eq!(
            routine.list("values_to_review"),
            Some(&["Glucose: 130 mg/dL".to_string()][..])
        );

        let low_only = follow_up(&[result("Hemoglobin", 10.0, ResultStatus::Low)]);
        assert!(low_only.iter().all(|r| r.category != "Routine Follow-up"));
    }

    #[test]
    fn cardiovascular_monitoring_once_for_several_triggers() {
        let recs = follow_up(&[
            result("Cholesterol", 250.0, ResultStatus::High),
            result("Systolic BP", 150.0, ResultStatus::Abnormal),
        ]);
        let names: Vec<&str> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            names,
            vec!["Regular Health Monitoring", "Routine Follow-up", "Cardiovascular Monitoring"]
        );
    }
}
