use super::{EntityExtractor, Measurement};
use crate::models::TestKind;

impl EntityExtractor {
    /// Every lab value match, in knowledge-base order then text order.
    /// Repeated matches of one test are all kept.
    pub fn extract_lab_values(&self, text: &str) -> Vec<Measurement> {
        let mut found = Vec::new();
        for lab in &self.labs {
            for caps in lab.regex.captures_iter(text) {
                let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                match number.as_str().parse::<f64>() {
                    Ok(value) if value.is_finite() => found.push(Measurement {
                        name: lab.name.clone(),
                        value,
                        kind: TestKind::Lab,
                        raw_match: whole.as_str().to_string(),
                        offset: whole.start(),
                    }),
                    _ => {
                        tracing::trace!(test = %lab.name, raw = number.as_str(), "Skipping unparseable value");
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_extractor;

    #[test]
    fn extracts_glucose_with_colon() {
        let found = test_extractor().extract_lab_values("Glucose: 180 mg/dL");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Glucose");
        assert_eq!(found[0].value, 180.0);
        assert_eq!(found[0].raw_match, "Glucose: 180");
        assert_eq!(found[0].offset, 0);
    }

    #[test]
    fn abbreviations_and_case_are_tolerated() {
        let text = "FBS 92 HGB 13.5 chol 210 TG 140 creat 0.9 BUN 15 PLT 250 SGPT 30 SGOT 25 A1c 5.9";
        let names: Vec<String> = test_extractor()
            .extract_lab_values(text)
            .into_iter()
            .map(|m| m.name)
            .collect();
        for expected in [
            "Glucose",
            "Hemoglobin",
            "Cholesterol",
            "Triglycerides",
            "Creatinine",
            "Urea",
            "Platelets",
            "ALT",
            "AST",
            "HbA1c",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[test]
    fn duplicate_mentions_are_kept() {
        let found = test_extractor().extract_lab_values("Glucose 110. Repeat glucose 112.");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value, 110.0);
        assert_eq!(found[1].value, 112.0);
    }

    #[test]
    fn decimal_values_parse() {
        let found = test_extractor().extract_lab_values("Creatinine: 1.35");
        assert_eq!(found[0].value, 1.35);
    }

    #[test]
    fn overflowing_values_are_dropped() {
        let text = format!("Glucose: {} Hemoglobin 13.5", "9".repeat(400));
        let found = test_extractor().extract_lab_values(&text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Hemoglobin");
        assert!(found.iter().all(|m| m.value.is_finite()));
    }

    #[test]
    fn no_match_is_empty() {
        assert!(test_extractor().extract_lab_values("Patient feels well").is_empty());
        assert!(test_extractor().extract_lab_values("").is_empty());
    }
}
