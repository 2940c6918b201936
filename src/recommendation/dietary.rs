use crate::knowledge::DietaryRules;
use crate::models::{DietaryRecommendation, TestResult};

use super::ReportFacts;

fn render_reasoning(template: &str, result: &TestResult) -> String {
    template
        .replace("{name}", &result.name)
        .replace("{value}", &result.value.to_string())
        .replace("{unit}", &result.unit)
        .replace(" )", ")")
}

/// One entry per diet rule that fires, reasoning filled from the first
/// matching result; the healthy-eating fallback when none fires.
pub fn recommend(rules: &DietaryRules, facts: &ReportFacts<'_>) -> Vec<DietaryRecommendation> {
    let mut out: Vec<DietaryRecommendation> = rules
        .rules
        .iter()
        .filter_map(|rule| {
            let result = facts.test_results.iter().find(|r| rule.when.matches(r))?;
            let mut rec = rule.template.clone();
            rec.reasoning = render_reasoning(&rule.template.reasoning, result);
            Some(rec)
        })
        .collect();

    if out.is_empty() {
        out.push(rules.fallback.clone());
    }
    out
}
