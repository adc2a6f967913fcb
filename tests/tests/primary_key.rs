use pretty_assertions::assert_eq;
use relmap::Errors;
use tests::mapping;
use tests::models::User;

#[test]
fn zero_valued_key_is_unset() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut user = User::default();

    let model = mapping.model(&mut user, &errors);
    assert_eq!(model.primary_key_column(), "id");
    assert_eq!(model.primary_key_value(), 0);
    assert!(model.primary_key_unset());
}

#[test]
fn assigned_key_is_set() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut user = User {
        id: 5,
        ..User::default()
    };

    let model = mapping.model(&mut user, &errors);
    assert_eq!(model.primary_key_value(), 5);
    assert!(!model.primary_key_unset());
}

#[test]
fn negative_key_counts_as_unset() {
    let mapping = mapping();
    let errors = Errors::new();
    let mut user = User {
        id: -3,
        ..User::default()
    };

    let model = mapping.model(&mut user, &errors);
    assert!(model.primary_key_unset());
}

#[test]
fn absent_record_is_unset() {
    let mapping = mapping();
    let errors = Errors::new();

    let model = mapping.unbound_model(&errors);
    assert_eq!(model.primary_key_value(), -1);
    assert!(model.primary_key_unset());
}
