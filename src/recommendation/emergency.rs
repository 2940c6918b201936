use crate::knowledge::EmergencyRules;
use crate::models::EmergencySigns;

use super::ReportFacts;

/// General warning signs plus any condition or medication specific sets.
pub fn recommend(rules: &EmergencyRules, facts: &ReportFacts<'_>) -> Vec<EmergencySigns> {
    let mut out = vec![rules.general.clone()];
    for rule in &rules.rules {
        let by_test = facts.test_results.iter().any(|r| {
            let name = r.name.to_lowercase();
            rule.test_keywords
                .iter()
                .any(|k| name.contains(k.to_lowercase().as_str()))
        });
        let by_medication =
            !rule.medication_keywords.is_empty() && facts.has_medication(&rule.medication_keywords);
        if by_test || by_medication {
            out.push(rule.signs.clone());
        }
    }
    out
}
