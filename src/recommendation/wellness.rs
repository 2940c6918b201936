use crate::models::Recommendation;

/// Wellness guidance does not depend on the report.
pub fn recommend(entries: &[Recommendation]) -> Vec<Recommendation> {
    entries.to_vec()
}
