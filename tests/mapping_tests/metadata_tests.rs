//! Metadata parsing and accessor tests

use itemodm::config::DEFAULT_REPOSITORY;
use itemodm::metadata::{
    AttributeType, FieldDefinition, ItemDefinition, KeyRole, PropertyDeclaration,
};
use itemodm::{Config, Item, ItemDescriptor, ItemMapper, ItemMetadata, MetadataRegistry, OdmError};

use super::fixtures::{Session, Unconfigured, Unexposed, User};

fn parse(descriptor: &ItemDescriptor) -> itemodm::Result<ItemMetadata> {
    ItemMetadata::parse(descriptor, &Config::default())
}

// =============================================================================
// Accessor Tests
// =============================================================================

#[test]
fn test_users_accessors() {
    let metadata = parse(&User::describe()).unwrap();

    assert_eq!(metadata.item_name(), "User");
    assert_eq!(metadata.table_name(), "Users");
    assert_eq!(metadata.primary_index(), ["pk", "sk"]);
    assert_eq!(metadata.repository_class(), DEFAULT_REPOSITORY);
    assert_eq!(metadata.cas_field(), None);

    // The declared definition keeps the override unset; only the accessor resolves it
    assert_eq!(metadata.item_definition().repository, None);

    let types: Vec<_> = metadata
        .attribute_types()
        .iter()
        .map(|(name, ty)| (name.as_str(), *ty))
        .collect();
    assert_eq!(
        types,
        vec![
            ("pk", AttributeType::String),
            ("sk", AttributeType::Number),
            ("name", AttributeType::String),
        ]
    );
}

#[test]
fn test_session_accessors() {
    let metadata = parse(&Session::describe()).unwrap();

    assert_eq!(metadata.repository_class(), "SessionRepository");
    assert_eq!(metadata.cas_field(), Some("updated_at"));
    assert_eq!(metadata.property_for("owner_id"), Some("owner"));
    assert_eq!(metadata.property_for("owner"), None);
    assert_eq!(metadata.attribute_type("tags"), Some(AttributeType::Set));

    let definition = metadata.item_definition();
    assert_eq!(definition.table, "Sessions");
    assert_eq!(definition.repository.as_deref(), Some("SessionRepository"));

    // Unmapped and class-level properties never reach the metadata
    assert_eq!(metadata.field_definitions().len(), 5);
    assert!(!metadata.field_definitions().contains_key("scratch"));
    assert!(!metadata.field_definitions().contains_key("table_prefix"));
}

#[test]
fn test_blank_default_repository_is_a_config_error() {
    let config = Config::builder().default_repository("").build();
    let registry = MetadataRegistry::new(config);

    let err = registry.metadata::<User>().unwrap_err();
    assert!(matches!(err, OdmError::Config(_)));
    assert!(registry.is_empty());
}

#[test]
fn test_configured_default_repository() {
    let config = Config::builder().default_repository("AuditedRepository").build();
    let metadata = ItemMetadata::parse(&User::describe(), &config).unwrap();

    assert_eq!(metadata.repository_class(), "AuditedRepository");
}

#[test]
fn test_key_schema_roles() {
    let metadata = parse(&User::describe()).unwrap();
    let schema = metadata.key_schema();

    assert_eq!(schema.len(), 2);
    assert_eq!(schema[0].name, "pk");
    assert_eq!(schema[0].role, KeyRole::Hash);
    assert_eq!(schema[0].ty, AttributeType::String);
    assert_eq!(schema[1].name, "sk");
    assert_eq!(schema[1].role, KeyRole::Range);
    assert_eq!(schema[1].ty, AttributeType::Number);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_missing_item_definition() {
    let err = parse(&Unconfigured::describe()).unwrap_err();

    match err {
        OdmError::Parsing(message) => {
            assert!(message.contains("Unconfigured is not configured as an Item"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_cas_names_both_attributes() {
    let descriptor = ItemDescriptor::new("Doubled")
        .item(ItemDefinition::new("Doubled", ["id"]))
        .field("id", FieldDefinition::string())
        .property(
            PropertyDeclaration::new("version")
                .field(FieldDefinition::number())
                .cas_timestamp(),
        )
        .property(
            PropertyDeclaration::new("touched")
                .field(FieldDefinition::number().named("touched_at"))
                .cas_timestamp(),
        );

    let err = parse(&descriptor).unwrap_err();

    match err {
        OdmError::Parsing(message) => {
            assert!(message.contains("version"), "{message}");
            assert!(message.contains("touched_at"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_cas_marker_on_unmapped_property_ignored() {
    let descriptor = User::describe().property(PropertyDeclaration::new("lock").cas_timestamp());

    let metadata = parse(&descriptor).unwrap();
    assert_eq!(metadata.cas_field(), None);
}

#[test]
fn test_primary_index_must_name_a_field() {
    let descriptor = ItemDescriptor::new("Orphan")
        .item(ItemDefinition::new("Orphans", ["id", "missing"]))
        .field("id", FieldDefinition::string());

    let err = parse(&descriptor).unwrap_err();

    match err {
        OdmError::Parsing(message) => assert!(message.contains("missing"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_primary_index_uses_attribute_names() {
    let descriptor = ItemDescriptor::new("Renamed")
        .item(ItemDefinition::new("Renamed", ["user_id"]))
        .field("user", FieldDefinition::string().named("user_id"));

    let metadata = parse(&descriptor).unwrap();
    assert_eq!(metadata.property_for("user_id"), Some("user"));
}

#[test]
fn test_empty_table_name_rejected() {
    let descriptor = ItemDescriptor::new("Nameless")
        .item(ItemDefinition::new("", ["id"]))
        .field("id", FieldDefinition::string());

    assert!(matches!(parse(&descriptor), Err(OdmError::Parsing(_))));
}

// =============================================================================
// Adapter Validation Tests
// =============================================================================

#[test]
fn test_unexposed_property_rejected_at_registration() {
    let registry = MetadataRegistry::default();

    let err = registry.metadata::<Unexposed>().unwrap_err();
    match err {
        OdmError::Parsing(message) => assert!(message.contains("ghost"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unexposed_property_fails_dehydrate_when_unvalidated() {
    let config = Config::builder().validate_adapters(false).build();
    let mapper = ItemMapper::<Unexposed>::from_declarations(&config).unwrap();

    let err = mapper.dehydrate(&Unexposed::default()).unwrap_err();
    assert!(matches!(err, OdmError::Parsing(_)));
}

// =============================================================================
// Descriptor Loading Tests
// =============================================================================

#[test]
fn test_descriptor_from_json() {
    let json = r#"{
        "name": "Order",
        "item": { "table": "Orders", "primaryIndex": ["customer", "placed_at"] },
        "properties": [
            { "property": "customer", "field": {} },
            { "property": "placed_at", "field": { "type": "number" } },
            { "property": "total", "field": { "name": "total_cents", "type": "number" } },
            { "property": "revision", "field": { "type": "number" }, "cas_timestamp": true }
        ]
    }"#;

    let descriptor = ItemDescriptor::from_json_str(json).unwrap();
    let metadata = parse(&descriptor).unwrap();

    assert_eq!(metadata.table_name(), "Orders");
    assert_eq!(metadata.attribute_type("customer"), Some(AttributeType::String));
    assert_eq!(metadata.attribute_type("total_cents"), Some(AttributeType::Number));
    assert_eq!(metadata.property_for("total_cents"), Some("total"));
    assert_eq!(metadata.cas_field(), Some("revision"));
}

#[test]
fn test_descriptor_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(&path, serde_json::to_string(&User::describe()).unwrap()).unwrap();

    let descriptor = ItemDescriptor::from_path(&path).unwrap();
    assert_eq!(descriptor, User::describe());
}

#[test]
fn test_descriptor_rejects_unknown_type_tag() {
    let json = r#"{
        "name": "Bad",
        "item": { "table": "Bad", "primary_index": ["id"] },
        "properties": [ { "property": "id", "field": { "type": "uuid" } } ]
    }"#;

    assert!(matches!(
        ItemDescriptor::from_json_str(json),
        Err(OdmError::Json(_))
    ));
}
