use crate::knowledge::{KnowledgeBase, MedicationRules};
use crate::models::{Detail, Recommendation};

use super::ReportFacts;

/// Adherence advice, class-specific management for recognised medications,
/// and one precaution entry per detected drug interaction.
pub fn recommend(
    kb: &KnowledgeBase,
    rules: &MedicationRules,
    facts: &ReportFacts<'_>,
) -> Vec<Recommendation> {
    let mut out = vec![rules.adherence.clone()];

    for class in &rules.classes {
        let by_name = facts.has_medication(&class.keywords);
        let by_category = facts.medications.iter().any(|med| {
            kb.medication_info(&med.name).is_some_and(|info| {
                let category = info.category.to_lowercase();
                class.keywords.iter().any(|k| category.contains(k.as_str()))
            })
        });
        if by_name || by_category {
            out.push(class.recommendation.clone());
        }
    }

    for risk in facts.risk_factors.iter().filter(|r| r.is_interaction()) {
        let mut rec = rules.interaction_precautions.clone();
        rec.details
            .insert("warning".to_string(), Detail::Text(risk.description.clone()));
        rec.details
            .insert("drugs".to_string(), Detail::List(risk.drugs.clone()));
        out.push(rec);
    }

    out
}
