//! Property-based tests for veto.

use indexmap::IndexMap;
use proptest::prelude::*;
use veto::prelude::*;

#[derive(Default)]
struct ProfileValidator {
    errors: Option<Errors>,
}

impl Validator for ProfileValidator {
    fn define(checker: &mut Checker) -> Result<(), ConfigError> {
        checker.validates("name", checks! { presence: true, max_length: { with: 8 } })?;
        checker.validates("score", checks! { greater_than_or_equal_to: { with: 0 } })?;
        Ok(())
    }

    fn error_slot(&mut self) -> &mut Option<Errors> {
        &mut self.errors
    }
}

#[derive(Default)]
struct StrictProfileValidator {
    errors: Option<Errors>,
}

impl Validator for StrictProfileValidator {
    fn define(checker: &mut Checker) -> Result<(), ConfigError> {
        checker.inherit::<ProfileValidator>()?;
        checker.validates("email", checks! { presence: true })?;
        Ok(())
    }

    fn error_slot(&mut self) -> &mut Option<Errors> {
        &mut self.errors
    }
}

fn profile(name: &str, score: i64) -> IndexMap<String, Value> {
    [
        ("name".to_owned(), Value::from(name)),
        ("score".to_owned(), Value::from(score)),
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// IDEMPOTENCY: is_valid(x) twice yields the same errors
// ============================================================================

proptest! {
    #[test]
    fn revalidation_idempotent(name in ".{0,12}", score in -5i64..5) {
        let mut validator = ProfileValidator::default();
        let mut entity = profile(&name, score);

        let first_verdict = validator.is_valid(&mut entity).unwrap();
        let first = validator.errors().clone();
        let second_verdict = validator.is_valid(&mut entity).unwrap();

        prop_assert_eq!(first_verdict, second_verdict);
        prop_assert_eq!(&first, validator.errors());
    }
}

// ============================================================================
// ACCUMULATION: one key per violated attribute, verdict == no errors
// ============================================================================

proptest! {
    #[test]
    fn every_violation_recorded(name in "[a-z ]{0,12}", score in -5i64..5) {
        let mut validator = ProfileValidator::default();
        let valid = validator.is_valid(&mut profile(&name, score)).unwrap();

        let name_bad = name.trim().is_empty() || name.chars().count() > 8;
        let score_bad = score < 0;
        let errors = validator.errors();

        prop_assert_eq!(errors.contains_key("name"), name_bad);
        prop_assert_eq!(errors.contains_key("score"), score_bad);
        prop_assert_eq!(errors.len(), usize::from(name_bad) + usize::from(score_bad));
        prop_assert_eq!(valid, errors.is_empty());
    }
}

// ============================================================================
// INHERITANCE: the child's errors are a superset of the parent's
// ============================================================================

proptest! {
    #[test]
    fn derived_errors_extend_parent(name in ".{0,12}", score in -5i64..5) {
        let mut entity = profile(&name, score);

        let mut parent = ProfileValidator::default();
        parent.is_valid(&mut entity).unwrap();
        let mut child = StrictProfileValidator::default();
        child.is_valid(&mut entity).unwrap();

        let parent_errors = parent.errors().clone();
        let child_errors = child.errors();

        for (key, entries) in &parent_errors {
            prop_assert_eq!(child_errors.get(key), Some(entries.as_slice()));
        }
        prop_assert!(child_errors.contains_key("email"));
        prop_assert!(!parent_errors.contains_key("email"));
    }
}

// ============================================================================
// COERCION: numeric text behaves like the number it spells
// ============================================================================

proptest! {
    #[test]
    fn numeric_text_matches_number(n in -1_000i64..1_000, boundary in -1_000i64..1_000) {
        let check = GreaterThanOrEqualTo::new(boundary);

        let mut from_text = Errors::new();
        check.check("n", &Value::from(format!(" {n} ")), &mut from_text);
        let mut from_number = Errors::new();
        check.check("n", &Value::from(n), &mut from_number);

        prop_assert_eq!(&from_text, &from_number);
        prop_assert_eq!(from_text.is_empty(), n >= boundary);
    }

    #[test]
    fn max_length_counts_chars(s in "\\PC{0,20}", max in 0usize..20) {
        let mut errors = Errors::new();
        MaxLength::new(max).check("s", &Value::from(s.as_str()), &mut errors);
        prop_assert_eq!(errors.is_empty(), s.chars().count() <= max);
    }
}
