// File: src/core/validator.rs
//! Structural checks on a persisted conjugation record.

use crate::core::catalog::PatternId;
use crate::core::types::{Irregularity, VerbConjugation};

/// Returns every structural problem with `record`; empty means valid.
///
/// Never fails and never stops at the first problem.
pub fn validate_conjugation(record: &VerbConjugation) -> Vec<String> {
    let mut errors = Vec::new();

    if record.verb_id.trim().is_empty() {
        errors.push("verbId must not be empty".to_string());
    }
    if record.root_form.trim().is_empty() {
        errors.push("rootForm must not be empty".to_string());
    }
    if record.conjugations.is_empty() {
        errors.push("conjugations must contain at least one tense".to_string());
    }

    if record.patterns.is_empty() && !record.irregularities.is_empty() {
        errors.push("patterns must name at least one pattern when irregularities are given".to_string());
    }
    for pattern in &record.patterns {
        if pattern.parse::<PatternId>().is_err() {
            errors.push(format!("unrecognized pattern: {pattern:?}"));
        }
    }
    for tag in &record.irregularities {
        if tag.parse::<Irregularity>().is_err() {
            errors.push(format!("unrecognized irregularity: {tag:?}"));
        }
    }

    for (cell, form) in record.conjugations.cells() {
        if form.is_empty() {
            errors.push(format!("conjugation {cell} is empty"));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::generate_conjugations;
    use crate::core::types::ConjugationForms;

    fn valid_record() -> VerbConjugation {
        VerbConjugation::new(
            "verb-1",
            "كتب",
            generate_conjugations("كتب", "form1").unwrap(),
            vec!["form1".into()],
            vec![],
        )
    }

    #[test]
    fn valid_record_has_no_errors() {
        assert!(validate_conjugation(&valid_record()).is_empty());
    }

    #[test]
    fn empty_fields_are_each_reported() {
        let record = VerbConjugation::new("", "", ConjugationForms::new(), vec![], vec![]);
        let errors = validate_conjugation(&record);
        assert!(errors.len() >= 3, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("verbId")));
        assert!(errors.iter().any(|e| e.contains("rootForm")));
        assert!(errors.iter().any(|e| e.contains("conjugations")));
    }

    #[test]
    fn irregularities_require_a_pattern() {
        let mut record = valid_record();
        record.patterns.clear();
        record.irregularities = vec!["hollow".into()];
        let errors = validate_conjugation(&record);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("patterns"));
    }

    #[test]
    fn unknown_tags_and_patterns_are_reported() {
        let mut record = valid_record();
        record.patterns = vec!["form11".into()];
        record.irregularities = vec!["weak".into(), "geminate".into()];
        let errors = validate_conjugation(&record);
        assert_eq!(errors.len(), 2, "{errors:?}");
    }

    #[test]
    fn empty_cells_are_reported() {
        let mut record = valid_record();
        let cell = record.conjugations.cells().next().map(|(c, _)| c).unwrap();
        record.conjugations.insert(cell, "");
        let errors = validate_conjugation(&record);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("is empty"));
    }
}
