//! Benchmarks for checker evaluation
//!
//! Measures:
//! - Registration of a rule set through the check registry
//! - A full validation run on valid and invalid entities
//! - Overhead of inherited rule lists

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use veto::prelude::*;

#[derive(Default)]
struct UserValidator {
    errors: Option<Errors>,
}

impl Validator for UserValidator {
    fn define(checker: &mut Checker) -> Result<(), ConfigError> {
        checker.validates("name", checks! { presence: true, max_length: { with: 32 } })?;
        checker.validates("age", checks! { greater_than_or_equal_to: { with: 18 } })?;
        checker.with_options(options! { on: "contact" }, |scope| {
            scope.validates("email", checks! { presence: true })?;
            scope.validates("phone", checks! { max_length: { with: 15 } })?;
            Ok(())
        })?;
        Ok(())
    }

    fn error_slot(&mut self) -> &mut Option<Errors> {
        &mut self.errors
    }
}

#[derive(Default)]
struct AdminValidator {
    errors: Option<Errors>,
}

impl Validator for AdminValidator {
    fn define(checker: &mut Checker) -> Result<(), ConfigError> {
        checker.inherit::<UserValidator>()?;
        checker.validates("role", checks! { presence: true })?;
        Ok(())
    }

    fn error_slot(&mut self) -> &mut Option<Errors> {
        &mut self.errors
    }
}

fn user(name: &str, age: &str, email: &str) -> IndexMap<String, Value> {
    [
        ("name", Value::from(name)),
        ("age", Value::from(age)),
        ("email", Value::from(email)),
        ("phone", Value::from("+1 555 0100")),
        ("role", Value::from("admin")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v))
    .collect()
}

fn registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("checker/registration");

    group.bench_function("validates", |b| {
        b.iter(|| {
            let mut checker = Checker::new();
            checker
                .validates(
                    black_box("name"),
                    checks! { presence: true, max_length: { with: 32 } },
                )
                .map(|checker| checker.len())
        });
    });

    group.finish();
}

fn validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("checker/is_valid");

    group.bench_function("valid", |b| {
        let mut validator = UserValidator::default();
        let mut entity = user("Ada", "36", "ada@example.com");
        b.iter(|| validator.is_valid(black_box(&mut entity)));
    });

    group.bench_function("invalid", |b| {
        let mut validator = UserValidator::default();
        let mut entity = user("   ", "abc", "");
        b.iter(|| validator.is_valid(black_box(&mut entity)));
    });

    group.bench_function("inherited", |b| {
        let mut validator = AdminValidator::default();
        let mut entity = user("Ada", "36", "ada@example.com");
        b.iter(|| validator.is_valid(black_box(&mut entity)));
    });

    group.finish();
}

criterion_group!(benches, registration, validation);
criterion_main!(benches);
