use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Free-form extra field on a recommendation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    Text(String),
    List(Vec<String>),
}

/// Dietary guidance for one condition (or the healthy-eating fallback).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryRecommendation {
    pub category: String,
    pub foods_to_include: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub reasoning: String,
    /// Extra advice such as `meal_timing` or `cooking_tips`.
    #[serde(flatten)]
    pub tips: BTreeMap<String, String>,
}

/// Lifestyle, medication-management, follow-up and wellness records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    pub details: BTreeMap<String, Detail>,
}

impl Recommendation {
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.details.get(key) {
            Some(Detail::List(items)) => Some(items),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.details.get(key) {
            Some(Detail::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Append to a list detail, creating it when absent.
    pub fn extend_list<I>(&mut self, key: &str, items: I)
    where
        I: IntoIterator<Item = String>,
    {
        let entry = self
            .details
            .entry(key.to_string())
            .or_insert_with(|| Detail::List(Vec::new()));
        match entry {
            Detail::List(list) => list.extend(items),
            Detail::Text(_) => *entry = Detail::List(items.into_iter().collect()),
        }
    }
}

/// A group of warning signs and the action to take when they appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencySigns {
    pub category: String,
    pub signs: Vec<String>,
    pub action: String,
}

/// Every category is always populated; see `RecommendationEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub dietary: Vec<DietaryRecommendation>,
    pub lifestyle: Vec<Recommendation>,
    pub medication_management: Vec<Recommendation>,
    pub follow_up: Vec<Recommendation>,
    pub emergency_signs: Vec<EmergencySigns>,
    pub general_wellness: Vec<Recommendation>,
}

impl RecommendationResult {
    pub fn categories_populated(&self) -> bool {
        !self.dietary.is_empty()
            && !self.lifestyle.is_empty()
            && !self.medication_management.is_empty()
            && !self.follow_up.is_empty()
            && !self.emergency_signs.is_empty()
            && !self.general_wellness.is_empty()
    }
}
