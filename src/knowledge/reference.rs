use serde::{Deserialize, Serialize};

/// Normal band for a lab test, with optional critical thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub critical_low: Option<f64>,
    #[serde(default)]
    pub critical_high: Option<f64>,
}

/// One lab test: how to find it in text and how to judge the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTestReference {
    /// Normalized identifier (`lowercase_with_underscores`).
    pub id: String,
    pub display_name: String,
    /// Case-insensitive regex; group 1 is the numeric value.
    pub pattern: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub normal_range: Option<NormalRange>,
}

/// Inclusive two-tier band used for vital signs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReference {
    pub id: String,
    pub display_name: String,
    pub pattern: String,
    pub unit: String,
    pub band: Band,
}

/// Blood pressure is matched once and split into two components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureReference {
    /// Group 1 is systolic, group 2 diastolic.
    pub pattern: String,
    pub unit: String,
    pub systolic: Band,
    pub diastolic: Band,
}

pub const SYSTOLIC_ID: &str = "systolic_bp";
pub const DIASTOLIC_ID: &str = "diastolic_bp";
pub const SYSTOLIC_NAME: &str = "Systolic BP";
pub const DIASTOLIC_NAME: &str = "Diastolic BP";
