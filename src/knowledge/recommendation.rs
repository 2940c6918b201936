use serde::{Deserialize, Serialize};

use super::rules::ConditionMatch;
use crate::models::{DietaryRecommendation, EmergencySigns, Recommendation, ResultStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRules {
    pub dietary: DietaryRules,
    pub lifestyle: LifestyleRules,
    pub medication: MedicationRules,
    pub follow_up: FollowUpRules,
    pub emergency: EmergencyRules,
    pub wellness: Vec<Recommendation>,
}

/// Diet-by-condition. `reasoning` may use `{name}`, `{value}` and `{unit}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryRules {
    pub rules: Vec<DietaryRule>,
    pub fallback: DietaryRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryRule {
    pub when: ConditionMatch,
    pub template: DietaryRecommendation,
}

/// Exercise-by-condition plus always-present lifestyle entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleRules {
    pub physical_activity: Recommendation,
    pub conditions: Vec<ActivityCondition>,
    pub supporting: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCondition {
    pub when: ConditionMatch,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub precautions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationRules {
    pub adherence: Recommendation,
    pub classes: Vec<MedicationClassRule>,
    /// Emitted once per drug-interaction risk factor.
    pub interaction_precautions: Recommendation,
}

/// Fires when any medication name contains one of `keywords`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationClassRule {
    pub keywords: Vec<String>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpRules {
    pub general: Recommendation,
    /// Checked in order; each tier fires once if any result has one of its statuses.
    pub escalation: Vec<EscalationTier>,
    pub monitoring: Vec<MonitoringRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationTier {
    pub statuses: Vec<ResultStatus>,
    /// When set, matching results are listed under this detail key.
    #[serde(default)]
    pub list_key: Option<String>,
    pub recommendation: Recommendation,
}

/// Fires when any test result satisfies any of `when`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringRule {
    pub when: Vec<ConditionMatch>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyRules {
    pub general: EmergencySigns,
    pub rules: Vec<EmergencyRule>,
}

/// Fires on any test whose name contains a `test_keywords` entry, or any
/// medication whose name contains a `medication_keywords` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyRule {
    #[serde(default)]
    pub test_keywords: Vec<String>,
    #[serde(default)]
    pub medication_keywords: Vec<String>,
    pub signs: EmergencySigns,
}
