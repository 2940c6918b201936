use serde::{Deserialize, Serialize};

use super::enums::{ResultStatus, TestKind};

/// A classified numeric measurement pulled out of report text.
///
/// Lab values and vital signs share this shape; `kind` tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "not_available")]
    pub reference_range: String,
    pub status: ResultStatus,
    #[serde(default = "default_kind")]
    pub kind: TestKind,
    #[serde(default)]
    pub raw_match: String,
    /// Byte offset of `raw_match` in the normalized text.
    #[serde(default)]
    pub offset: usize,
}

fn not_available() -> String {
    "N/A".to_string()
}

fn default_kind() -> TestKind {
    TestKind::Lab
}

impl TestResult {
    /// `"Glucose: 180 mg/dL"`, without a trailing space when the unit is unknown.
    pub fn display_value(&self) -> String {
        if self.unit.is_empty() {
            format!("{}: {}", self.name, self.value)
        } else {
            format!("{}: {} {}", self.name, self.value, self.unit)
        }
    }

    /// Byte span of the match in the normalized text.
    pub fn span(&self) -> (usize, usize) {
        (self.offset, self.offset + self.raw_match.len())
    }
}
