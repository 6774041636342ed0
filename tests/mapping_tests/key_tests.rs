//! Primary key and identifier tests

use itemodm::metadata::{FieldDefinition, ItemDefinition};
use itemodm::{AttributeValue, Config, ItemDescriptor, ItemMapper, ItemMetadata, OdmError};

use super::fixtures::{attributes, User};

/// md5(md5("u1") . md5("1"))
const USERS_U1_1: &str = "b4220702210a5eaa4d8a4fd52051f6f1";

/// md5(md5("u1") . md5("2"))
const USERS_U1_2: &str = "51c3c4c21e796ffcf9a22fe79f7f457a";

/// md5(md5("1") . md5("u1"))
const USERS_REVERSED_U1_1: &str = "d00c34910006555b79da280b58d6d7e6";

fn user_mapper() -> ItemMapper<User> {
    ItemMapper::from_declarations(&Config::default()).unwrap()
}

// =============================================================================
// Primary Key Tests
// =============================================================================

#[test]
fn test_primary_keys_of_object_in_declared_order() {
    let mapper = user_mapper();

    let keys = mapper.primary_keys(&User::new("u1", 1, "Ann")).unwrap();

    let pairs: Vec<_> = keys.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
    assert_eq!(
        pairs,
        vec![("pk", AttributeValue::from("u1")), ("sk", AttributeValue::Int(1))]
    );
}

#[test]
fn test_primary_keys_of_mapping() {
    let mapper = user_mapper();

    let keys = mapper
        .primary_keys_from_attributes(&attributes([
            ("name", "Ann".into()),
            ("sk", AttributeValue::Int(1)),
            ("pk", "u1".into()),
        ]))
        .unwrap();

    let names: Vec<_> = keys.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["pk", "sk"]);
}

#[test]
fn test_incomplete_mapping_names_missing_key() {
    let mapper = user_mapper();

    let err = mapper
        .primary_keys_from_attributes(&attributes([("pk", "u1".into()), ("name", "Ann".into())]))
        .unwrap_err();

    match err {
        OdmError::IncompleteKey { key } => assert_eq!(key, "sk"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_null_key_component_is_incomplete() {
    let mapper = user_mapper();

    let err = mapper
        .primary_keys_from_attributes(&attributes([
            ("pk", AttributeValue::Null),
            ("sk", AttributeValue::Int(1)),
        ]))
        .unwrap_err();

    assert!(matches!(err, OdmError::IncompleteKey { ref key } if key == "pk"));
}

// =============================================================================
// Identifier Tests
// =============================================================================

#[test]
fn test_identifier_of_users_example() {
    let mapper = user_mapper();
    let user = User::new("u1", 1, "Ann");

    assert_eq!(mapper.primary_identifier(&user).unwrap(), USERS_U1_1);
    // Stable across calls
    assert_eq!(mapper.primary_identifier(&user).unwrap(), USERS_U1_1);
}

#[test]
fn test_identifier_ignores_non_key_fields() {
    let mapper = user_mapper();

    let ann = mapper.primary_identifier(&User::new("u1", 1, "Ann")).unwrap();
    let bea = mapper.primary_identifier(&User::new("u1", 1, "Bea")).unwrap();

    assert_eq!(ann, bea);
}

#[test]
fn test_identifier_changes_with_key_value() {
    let mapper = user_mapper();

    let changed = mapper.primary_identifier(&User::new("u1", 2, "Ann")).unwrap();

    assert_eq!(changed, USERS_U1_2);
    assert_ne!(changed, USERS_U1_1);
}

#[test]
fn test_identifier_of_mapping_matches_object() {
    let mapper = user_mapper();
    let user = User::new("u1", 1, "Ann");

    let from_mapping = mapper
        .primary_identifier_from_attributes(&mapper.dehydrate(&user).unwrap())
        .unwrap();

    assert_eq!(from_mapping, mapper.primary_identifier(&user).unwrap());
}

#[test]
fn test_identifier_changes_with_declared_key_order() {
    let reversed = ItemDescriptor::new("ReversedUser")
        .item(ItemDefinition::new("Users", ["sk", "pk"]))
        .field("pk", FieldDefinition::string())
        .field("sk", FieldDefinition::number());
    let metadata = ItemMetadata::parse(&reversed, &Config::default()).unwrap();

    let id = metadata
        .primary_identifier_from_attributes(&attributes([
            ("pk", "u1".into()),
            ("sk", AttributeValue::Int(1)),
        ]))
        .unwrap();

    assert_eq!(id, USERS_REVERSED_U1_1);
    assert_ne!(id, USERS_U1_1);
}

#[test]
fn test_identifier_propagates_incomplete_key() {
    let mapper = user_mapper();

    let err = mapper
        .primary_identifier_from_attributes(&attributes([("pk", "u1".into())]))
        .unwrap_err();

    assert!(matches!(err, OdmError::IncompleteKey { .. }));
}
