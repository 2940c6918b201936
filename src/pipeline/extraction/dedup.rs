use crate::models::{Medication, TestResult};

/// An extracted entity with a name and a byte span in the normalized text.
pub trait Spanned {
    fn dedup_name(&self) -> String;
    fn span(&self) -> (usize, usize);
}

impl Spanned for TestResult {
    fn dedup_name(&self) -> String {
        self.name.to_lowercase()
    }

    fn span(&self) -> (usize, usize) {
        TestResult::span(self)
    }
}

impl Spanned for Medication {
    fn dedup_name(&self) -> String {
        self.name.to_lowercase()
    }

    fn span(&self) -> (usize, usize) {
        Medication::span(self)
    }
}

fn overlaps(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Collapse entities sharing a name whose spans overlap, keeping the first.
pub fn deduplicate<T: Spanned>(items: Vec<T>) -> Vec<T> {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let name = item.dedup_name();
        let duplicate = kept
            .iter()
            .any(|k| k.dedup_name() == name && overlaps(k.span(), item.span()));
        if !duplicate {
            kept.push(item);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str, raw: &str, offset: usize) -> Medication {
        Medication {
            name: name.into(),
            dosage: String::new(),
            frequency: "as directed".into(),
            raw_match: raw.into(),
            offset,
        }
    }

    #[test]
    fn overlapping_same_name_collapses() {
        let meds = vec![
            med("Metformin", "Tab Metformin 500 mg", 0),
            med("Metformin", "Metformin 500 mg", 4),
            med("Metformin", "Metformin", 40),
        ];
        let kept = deduplicate(meds);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].offset, 0);
        assert_eq!(kept[1].offset, 40);
    }

    #[test]
    fn different_names_survive_overlap() {
        let meds = vec![med("Metformin", "Metformin 500 mg", 0), med("Alcohol", "Alcohol", 2)];
        assert_eq!(deduplicate(meds).len(), 2);
    }

    #[test]
    fn adjacent_spans_do_not_overlap() {
        assert!(!overlaps((0, 5), (5, 9)));
        assert!(overlaps((0, 6), (5, 9)));
    }
}
