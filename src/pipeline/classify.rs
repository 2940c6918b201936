//! Reference classifier: judges a measured value against the knowledge base.

use crate::knowledge::{Band, KnowledgeBase, LabTestReference, DIASTOLIC_ID, SYSTOLIC_ID};
use crate::models::{ResultStatus, TestKind, TestResult};

use super::extraction::Measurement;

/// Unit, reference range label and status for one value.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub unit: String,
    pub reference_range: String,
    pub status: ResultStatus,
}

impl Classification {
    fn unknown() -> Self {
        Self {
            unit: String::new(),
            reference_range: "N/A".to_string(),
            status: ResultStatus::Unknown,
        }
    }
}

/// `"Heart Rate"` -> `"heart_rate"`.
pub fn normalize_test_id(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Four-tier lab classification with inclusive normal bounds.
pub fn classify_lab(kb: &KnowledgeBase, name: &str, value: f64) -> Classification {
    let Some(reference) = kb.lab_test(&normalize_test_id(name)) else {
        tracing::debug!(test = name, "No reference range for test");
        return Classification::unknown();
    };
    Classification {
        unit: reference.unit.clone(),
        reference_range: range_label(reference),
        status: lab_status(reference, value),
    }
}

fn range_label(reference: &LabTestReference) -> String {
    match (&reference.range, &reference.normal_range) {
        (Some(label), _) => label.clone(),
        (None, Some(range)) => format!("{}-{}", range.min, range.max),
        (None, None) => "N/A".to_string(),
    }
}

fn lab_status(reference: &LabTestReference, value: f64) -> ResultStatus {
    let Some(range) = &reference.normal_range else {
        return ResultStatus::Unknown;
    };
    if value < range.min {
        match range.critical_low {
            Some(critical) if value < critical => ResultStatus::Critical,
            _ => ResultStatus::Low,
        }
    } else if value > range.max {
        match range.critical_high {
            Some(critical) if value > critical => ResultStatus::Critical,
            _ => ResultStatus::High,
        }
    } else {
        ResultStatus::Normal
    }
}

/// Two-tier vital classification; blood pressure components use their own bands.
pub fn classify_vital(kb: &KnowledgeBase, name: &str, value: f64) -> Classification {
    let id = normalize_test_id(name);
    let (unit, band): (&str, Band) = match id.as_str() {
        SYSTOLIC_ID => (kb.blood_pressure.unit.as_str(), kb.blood_pressure.systolic),
        DIASTOLIC_ID => (kb.blood_pressure.unit.as_str(), kb.blood_pressure.diastolic),
        _ => match kb.vital(&id) {
            Some(vital) => (vital.unit.as_str(), vital.band),
            None => {
                tracing::debug!(vital = name, "No band for vital sign");
                return Classification::unknown();
            }
        },
    };
    Classification {
        unit: unit.to_string(),
        reference_range: band.label(),
        status: if band.contains(value) {
            ResultStatus::Normal
        } else {
            ResultStatus::Abnormal
        },
    }
}

/// Turn an extracted measurement into a classified test result.
pub fn classify_measurement(kb: &KnowledgeBase, measurement: Measurement) -> TestResult {
    let classification = match measurement.kind {
        TestKind::Lab => classify_lab(kb, &measurement.name, measurement.value),
        TestKind::Vital => classify_vital(kb, &measurement.name, measurement.value),
    };
    TestResult {
        name: measurement.name,
        value: measurement.value,
        unit: classification.unit,
        reference_range: classification.reference_range,
        status: classification.status,
        kind: measurement.kind,
        raw_match: measurement.raw_match,
        offset: measurement.offset,
    }
}
