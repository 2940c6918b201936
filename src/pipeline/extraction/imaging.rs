use super::EntityExtractor;

impl EntityExtractor {
    /// Sentence fragments following finding/impression/conclusion,
    /// shows/demonstrates/reveals, or normal/abnormal/unremarkable phrasing.
    /// Fragments shorter than `min_finding_chars` are dropped as noise.
    pub fn extract_imaging_findings(&self, text: &str) -> Vec<String> {
        let mut findings = Vec::new();
        for pattern in &self.imaging {
            for caps in pattern.captures_iter(text) {
                let Some(fragment) = caps.get(1) else {
                    continue;
                };
                let finding = fragment.as_str().trim();
                if finding.chars().count() >= self.min_finding_chars {
                    findings.push(finding.to_string());
                }
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_extractor;

    #[test]
    fn finding_and_impression_fragments() {
        let text = "Chest X-ray. Findings: A 2 cm mass in the right upper lobe. Impression: suspicious lesion.";
        let findings = test_extractor().extract_imaging_findings(text);
        assert_eq!(
            findings,
            vec!["A 2 cm mass in the right upper lobe", "suspicious lesion"]
        );
    }

    #[test]
    fn reveals_phrasing() {
        let findings = test_extractor()
            .extract_imaging_findings("The scan reveals a hairline fracture of the radius.");
        assert_eq!(findings, vec!["a hairline fracture of the radius"]);
    }

    #[test]
    fn short_fragments_are_noise() {
        // "Impression: ok" leaves a two-character fragment.
        assert!(test_extractor()
            .extract_imaging_findings("Impression: ok.")
            .is_empty());
    }

    #[test]
    fn minimum_length_is_inclusive() {
        let extractor = test_extractor();
        // "no change" is nine characters, "clear lung" ten.
        assert!(extractor.extract_imaging_findings("Impression: no change.").is_empty());
        assert_eq!(
            extractor.extract_imaging_findings("Impression: clear lung."),
            vec!["clear lung"]
        );
    }

    #[test]
    fn unremarkable_phrasing() {
        let findings =
            test_extractor().extract_imaging_findings("Unremarkable cardiac silhouette and mediastinum.");
        assert_eq!(findings, vec!["cardiac silhouette and mediastinum"]);
    }
}
