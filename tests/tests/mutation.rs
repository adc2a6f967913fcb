use indexmap::IndexMap;
use jiff::Timestamp;
use pretty_assertions::assert_eq;
use relmap::{Errors, Value};
use tests::mapping;
use tests::models::{Product, User};

fn values(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn changed_value_is_applied() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut user = User {
        name: "Alice".to_string(),
        ..User::default()
    };

    let changed = {
        let mut model = mapping.model(&mut user, &errors);
        model.apply_column_values(&values(&[("name", Value::from("Bob"))]))
    };

    assert!(changed);
    assert_eq!(user.name, "Bob");
    assert!(errors.is_empty());
}

#[test]
fn identical_value_is_not_a_change() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut user = User {
        name: "Alice".to_string(),
        ..User::default()
    };

    let changed = {
        let mut model = mapping.model(&mut user, &errors);
        model.apply_column_values(&values(&[("name", Value::from("Alice"))]))
    };

    assert!(!changed);
    assert_eq!(user.name, "Alice");
}

#[test]
fn unknown_columns_are_skipped_silently() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut user = User::default();

    let changed = {
        let mut model = mapping.model(&mut user, &errors);
        model.apply_column_values(&values(&[("shoe_size", Value::I64(43))]))
    };

    assert!(!changed);
    assert!(errors.is_empty());
}

#[test]
fn integers_are_coerced_between_widths() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut product = Product::default();

    let changed = {
        let mut model = mapping.model(&mut product, &errors);
        // An i64-shaped value lands in the record's i32 field.
        model.apply_column_values(&values(&[("stock", Value::I64(5))]))
    };

    assert!(changed);
    assert_eq!(product.stock, 5);
    assert!(errors.is_empty());
}

#[test]
fn equal_integers_across_widths_are_not_a_change() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut product = Product {
        stock: 5,
        ..Product::default()
    };

    let changed = {
        let mut model = mapping.model(&mut product, &errors);
        model.apply_column_values(&values(&[("stock", Value::I64(5))]))
    };

    assert!(!changed);
}

#[test]
fn update_timestamp_freshness_follows_any_change() {
    let mapping = mapping();
    let errors = Errors::new();
    let stale = Timestamp::from_second(1_609_459_200).unwrap();
    let mut user = User {
        name: "Alice".to_string(),
        updated_at: stale,
        ..User::default()
    };

    let changed = {
        let mut model = mapping.model(&mut user, &errors);
        // The caller's own updated_at value is stale; the stamp must come
        // from the clock because another field changed.
        model.apply_column_values(&values(&[
            ("name", Value::from("Bob")),
            ("updated_at", Value::Timestamp(stale)),
        ]))
    };

    assert!(changed);
    assert_eq!(user.name, "Bob");
    assert!(user.updated_at > stale);
}

#[test]
fn no_change_means_no_timestamp_stamp() {
    let mapping = mapping();
    let errors = Errors::new();
    let stale = Timestamp::from_second(1_609_459_200).unwrap();
    let mut user = User {
        name: "Alice".to_string(),
        updated_at: stale,
        ..User::default()
    };

    let changed = {
        let mut model = mapping.model(&mut user, &errors);
        model.apply_column_values(&values(&[
            ("name", Value::from("Alice")),
            ("updated_at", Value::Timestamp(stale)),
        ]))
    };

    assert!(!changed);
    assert_eq!(user.updated_at, stale);
}

#[test]
fn null_update_timestamp_entry_never_stamps() {
    let mapping = mapping();
    let errors = Errors::new();
    let stale = Timestamp::from_second(1_609_459_200).unwrap();
    let mut user = User {
        name: "Alice".to_string(),
        updated_at: stale,
        ..User::default()
    };

    let changed = {
        let mut model = mapping.model(&mut user, &errors);
        model.apply_column_values(&values(&[
            ("name", Value::from("Bob")),
            ("updated_at", Value::Null),
        ]))
    };

    assert!(changed);
    assert_eq!(user.name, "Bob");
    // The null entry does not drive the freshness stamp; the record rejects
    // it for the timestamp slot, which is reported rather than applied.
    assert_eq!(user.updated_at, stale);
    assert_eq!(errors.len(), 1);
}

#[test]
fn inconvertible_value_is_reported_not_applied() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut user = User {
        name: "Alice".to_string(),
        ..User::default()
    };

    let changed = {
        let mut model = mapping.model(&mut user, &errors);
        model.apply_column_values(&values(&[("name", Value::I64(1))]))
    };

    assert!(!changed);
    assert_eq!(user.name, "Alice");
    assert_eq!(errors.len(), 1);
}

#[test]
fn absent_record_reports_changed_unconditionally() {
    let mapping = mapping();
    let errors = Errors::new();

    let mut model = mapping.unbound_model(&errors);
    let changed = model.apply_column_values(&values(&[("name", Value::from("Bob"))]));

    assert!(changed);
    assert!(errors.is_empty());
}
