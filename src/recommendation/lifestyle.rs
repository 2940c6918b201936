use crate::knowledge::LifestyleRules;
use crate::models::Recommendation;

use super::ReportFacts;

const ACTIVITIES_KEY: &str = "specific_activities";
const PRECAUTIONS_KEY: &str = "precautions";

/// Physical activity tailored by condition, then sleep, stress and
/// smoking-cessation entries.
pub fn recommend(rules: &LifestyleRules, facts: &ReportFacts<'_>) -> Vec<Recommendation> {
    let mut activity = rules.physical_activity.clone();
    for condition in &rules.conditions {
        if facts.test_results.iter().any(|r| condition.when.matches(r)) {
            activity.extend_list(ACTIVITIES_KEY, condition.activities.iter().cloned());
            activity.extend_list(PRECAUTIONS_KEY, condition.precautions.iter().cloned());
        }
    }

    let mut out = vec![activity];
    out.extend(rules.supporting.iter().cloned());
    out
}
