//! Parsed item metadata
//!
//! Immutable once built; shared behind an `Arc` by every mapper of the type.

use indexmap::IndexMap;

use super::{AttributeType, FieldDefinition, ItemDefinition};

/// Role of a primary index attribute in the table's key schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Partition key (first primary index attribute)
    Hash,

    /// Sort key (second primary index attribute)
    Range,

    /// Further components, part of the identifier only
    Extra,
}

/// One attribute of the key schema handed to table tooling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub ty: AttributeType,
    pub role: KeyRole,
}

/// Metadata describing one mapped item type
#[derive(Debug, Clone)]
pub struct ItemMetadata {
    /// Name of the described type
    pub(super) item_name: String,

    /// Item-level declaration
    pub(super) definition: ItemDefinition,

    /// Repository type, with the configured default applied
    pub(super) repository: String,

    /// attribute name -> property name
    pub(super) property_mapping: IndexMap<String, String>,

    /// property name -> field definition
    pub(super) field_definitions: IndexMap<String, FieldDefinition>,

    /// attribute name -> declared type
    pub(super) attribute_types: IndexMap<String, AttributeType>,

    /// Attribute name of the CAS timestamp
    pub(super) cas_field: Option<String>,
}

impl ItemMetadata {
    // =========================================================================
    // Schema Accessors
    // =========================================================================

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn table_name(&self) -> &str {
        &self.definition.table
    }

    pub fn repository_class(&self) -> &str {
        &self.repository
    }

    pub fn cas_field(&self) -> Option<&str> {
        self.cas_field.as_deref()
    }

    pub fn attribute_types(&self) -> &IndexMap<String, AttributeType> {
        &self.attribute_types
    }

    pub fn primary_index(&self) -> &[String] {
        &self.definition.primary_index
    }

    pub fn item_definition(&self) -> &ItemDefinition {
        &self.definition
    }

    pub fn field_definitions(&self) -> &IndexMap<String, FieldDefinition> {
        &self.field_definitions
    }

    pub fn property_mapping(&self) -> &IndexMap<String, String> {
        &self.property_mapping
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Property backing `attribute`, if mapped
    pub fn property_for(&self, attribute: &str) -> Option<&str> {
        self.property_mapping.get(attribute).map(String::as_str)
    }

    /// Declared type of `attribute`, if mapped
    pub fn attribute_type(&self, attribute: &str) -> Option<AttributeType> {
        self.attribute_types.get(attribute).copied()
    }

    /// Iterate `(property, attribute name, type)` in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str, AttributeType)> + '_ {
        self.field_definitions
            .iter()
            .map(|(property, field)| (property.as_str(), field.attribute_name(property), field.ty))
    }

    /// Key schema for table tooling
    ///
    /// Roles follow primary index order: hash, range, then extra.
    pub fn key_schema(&self) -> Vec<KeyAttribute> {
        self.primary_index()
            .iter()
            .enumerate()
            .map(|(position, name)| KeyAttribute {
                name: name.clone(),
                ty: self.attribute_type(name).unwrap_or_default(),
                role: match position {
                    0 => KeyRole::Hash,
                    1 => KeyRole::Range,
                    _ => KeyRole::Extra,
                },
            })
            .collect()
    }
}
