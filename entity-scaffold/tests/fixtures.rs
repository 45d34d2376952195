//! Integration tests for fixture value generation
//!
//! Drives [`FixtureGenerator`] through mocked type capabilities.

use entity_scaffold::{
    EnumValueProvider, ErrorKind, FieldSpec, FixtureGenerator, FixtureSource, ScaffoldError,
    TypeRegistry,
};
use mockall::mock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

mock! {
    Types {}
    impl TypeRegistry for Types {
        fn exists(&self, name: &str) -> bool;
        fn is_subtype_of(&self, name: &str, base: &str) -> bool;
    }
}

mock! {
    Enums {}
    impl EnumValueProvider for Enums {
        fn values(&self, enum_type: &str) -> Option<Vec<String>>;
    }
}

const ENUM_BASE: &str = "App\\DBAL\\EnumType";
const ENUM_TYPES: [&str; 2] = ["order_status", "priority"];

fn owned(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(ToString::to_string).collect())
}

/// Helper to build a generator knowing the `order_status` and `priority` enums
fn generator() -> FixtureGenerator {
    let mut types = MockTypes::new();
    types
        .expect_is_subtype_of()
        .returning(|name, base| ENUM_TYPES.contains(&name) && base == ENUM_BASE);

    let mut enums = MockEnums::new();
    enums
        .expect_values()
        .withf(|enum_type| enum_type == "order_status")
        .returning(|_| owned(&["new", "paid", "shipped"]));
    enums
        .expect_values()
        .withf(|enum_type| enum_type == "priority")
        .returning(|_| owned(&["1", "2", "3"]));
    enums.expect_values().returning(|_| None);

    FixtureGenerator::new(Arc::new(types), Arc::new(enums))
        .with_enum_base_type(ENUM_BASE)
}

#[test]
fn test_enum_value_changes() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..20 {
        let next = generator
            .modify_value("paid", "order_status", "new", &mut rng)
            .unwrap();
        assert!(next == "new" || next == "shipped", "unexpected {next}");
    }
}

#[test]
fn test_numeric_enum_value_rotates_to_legal_value() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..20 {
        let next = generator
            .modify_value("1", "priority", "new", &mut rng)
            .unwrap();
        assert!(next == "2" || next == "3", "unexpected value {next}");
    }
}

#[test]
fn test_text_modifier() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(5);

    let spec = FieldSpec::new("Widget", "string");
    let modified = generator.modify_field(&spec, &mut rng).unwrap();
    assert_eq!(modified, "new Widget");

    let spec = FieldSpec::new("Widget", "string").with_modifier("edited");
    let modified = generator.modify_field(&spec, &mut rng).unwrap();
    assert_eq!(modified, "edited Widget");
}

#[test]
fn test_dates() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(5);
    let mut modify = |value: &str, declared_type: &str| {
        generator.modify_value(value, declared_type, "new", &mut rng)
    };

    assert_eq!(modify("2020-02-28", "date").unwrap(), "2020-02-29");
    assert_eq!(
        modify("2021-12-31 23:00:00", "datetime").unwrap(),
        "2022-01-01"
    );
    assert_eq!(modify("20240228", "date").unwrap(), "2024-02-29");

    let err = modify("not a date", "date").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(matches!(err, ScaffoldError::InvalidDate(_)));
}

#[test]
fn test_unknown_enum_type() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(5);

    let err = generator
        .get_enum_value("payment_method", "card", &mut rng)
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::UnknownEnumType(name) if name == "payment_method"));
}

#[test]
fn test_fixture_choices() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(9);

    let choices = FixtureSource::from(vec!["red".to_string(), "blue".to_string()]);
    for _ in 0..10 {
        let picked = generator.fixture(&choices, &mut rng);
        assert!(picked == "red" || picked == "blue");
    }

    let empty = FixtureSource::Choices(Vec::new());
    assert_eq!(generator.fixture(&empty, &mut rng), "");
}
