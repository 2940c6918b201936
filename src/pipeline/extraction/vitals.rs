use super::{EntityExtractor, Measurement};
use crate::knowledge::{DIASTOLIC_NAME, SYSTOLIC_NAME};
use crate::models::TestKind;

impl EntityExtractor {
    /// Vital signs. Each blood pressure reading becomes a systolic and a
    /// diastolic measurement sharing one raw match.
    pub fn extract_vital_signs(&self, text: &str) -> Vec<Measurement> {
        let mut found = self.extract_blood_pressure(text);

        for vital in &self.vitals {
            for caps in vital.regex.captures_iter(text) {
                let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let Some(value) = parse_finite(number.as_str()) else {
                    tracing::trace!(vital = %vital.name, raw = number.as_str(), "Skipping unparseable value");
                    continue;
                };
                found.push(Measurement {
                    name: vital.name.clone(),
                    value,
                    kind: TestKind::Vital,
                    raw_match: whole.as_str().to_string(),
                    offset: whole.start(),
                });
            }
        }
        found
    }

    fn extract_blood_pressure(&self, text: &str) -> Vec<Measurement> {
        let mut found = Vec::new();
        for caps in self.blood_pressure.captures_iter(text) {
            let (Some(whole), Some(sys), Some(dia)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let (Some(systolic), Some(diastolic)) =
                (parse_finite(sys.as_str()), parse_finite(dia.as_str()))
            else {
                tracing::trace!(raw = whole.as_str(), "Skipping unparseable blood pressure");
                continue;
            };
            for (name, value) in [(SYSTOLIC_NAME, systolic), (DIASTOLIC_NAME, diastolic)] {
                found.push(Measurement {
                    name: name.to_string(),
                    value,
                    kind: TestKind::Vital,
                    raw_match: whole.as_str().to_string(),
                    offset: whole.start(),
                });
            }
        }
        found
    }
}

/// Overflowing digit runs parse to infinity, which JSON cannot carry.
fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::super::test_extractor;
    use crate::models::TestKind;

    #[test]
    fn blood_pressure_splits_into_two() {
        let found = test_extractor().extract_vital_signs("BP 150/95");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Systolic BP");
        assert_eq!(found[0].value, 150.0);
        assert_eq!(found[1].name, "Diastolic BP");
        assert_eq!(found[1].value, 95.0);
        assert!(found.iter().all(|m| m.kind == TestKind::Vital));
        assert_eq!(found[0].raw_match, found[1].raw_match);
    }

    #[test]
    fn spelled_out_blood_pressure_with_spaces() {
        let found = test_extractor().extract_vital_signs("Blood pressure: 120 / 80 mmHg");
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].value, 80.0);
    }

    #[test]
    fn other_vitals() {
        let text = "HR 72, Temp 98.6, RR 16, SpO2 97, Weight 70 kg, Height 175 cm, BMI 22.9";
        let found = test_extractor().extract_vital_signs(text);
        let get = |name: &str| found.iter().find(|m| m.name == name).map(|m| m.value);
        assert_eq!(get("Heart Rate"), Some(72.0));
        assert_eq!(get("Temperature"), Some(98.6));
        assert_eq!(get("Respiratory Rate"), Some(16.0));
        assert_eq!(get("Oxygen Saturation"), Some(97.0));
        assert_eq!(get("Weight"), Some(70.0));
        assert_eq!(get("Height"), Some(175.0));
        assert_eq!(get("BMI"), Some(22.9));
    }

    #[test]
    fn overflowing_readings_are_dropped() {
        let huge = "9".repeat(400);
        let text = format!("BP {huge}/80, HR {huge}, Temp 98.6");
        let found = test_extractor().extract_vital_signs(&text);
        assert!(found.iter().all(|m| m.value.is_finite()));
        assert!(found.iter().all(|m| !m.name.ends_with("BP")));
        assert!(found.iter().all(|m| m.name != "Heart Rate"));
        assert!(found.iter().any(|m| m.name == "Temperature"));
    }

    #[test]
    fn lab_text_has_no_vitals() {
        assert!(test_extractor().extract_vital_signs("Glucose: 180 mg/dL").is_empty());
    }
}
