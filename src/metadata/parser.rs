//! Metadata parser
//!
//! Turns an `ItemDescriptor` into validated `ItemMetadata`.
//!
//! ## Validation
//! - The descriptor must carry an item definition with a table and a
//!   non-empty primary index
//! - Attribute names are unique within a type
//! - At most one property carries the CAS marker
//! - Every primary index entry names a mapped attribute

use indexmap::IndexMap;

use crate::config::Config;
use crate::error::{OdmError, Result};

use super::{AttributeType, FieldDefinition, ItemDescriptor, ItemMetadata};

impl ItemMetadata {
    /// Parse and validate a descriptor
    pub fn parse(descriptor: &ItemDescriptor, config: &Config) -> Result<Self> {
        config.validate()?;

        let definition = descriptor.item.clone().ok_or_else(|| {
            OdmError::Parsing(format!(
                "Class {} is not configured as an Item",
                descriptor.name
            ))
        })?;

        if definition.table.trim().is_empty() {
            return Err(OdmError::Parsing(format!(
                "Item {} declares an empty table name",
                descriptor.name
            )));
        }
        if definition.primary_index.is_empty() {
            return Err(OdmError::Parsing(format!(
                "Item {} declares no primary index",
                descriptor.name
            )));
        }

        let mut property_mapping: IndexMap<String, String> = IndexMap::new();
        let mut field_definitions: IndexMap<String, FieldDefinition> = IndexMap::new();
        let mut attribute_types: IndexMap<String, AttributeType> = IndexMap::new();
        let mut cas_field: Option<String> = None;

        for declaration in &descriptor.properties {
            if declaration.class_level {
                continue;
            }
            let Some(field) = &declaration.field else {
                continue;
            };

            let property = declaration.property.clone();
            let attribute = field.attribute_name(&property).to_string();

            if let Some(existing) = property_mapping.get(&attribute) {
                return Err(OdmError::Parsing(format!(
                    "Duplicate attribute name {attribute} on properties {existing}, {property}"
                )));
            }
            if field_definitions.contains_key(&property) {
                return Err(OdmError::Parsing(format!(
                    "Property {property} is declared more than once"
                )));
            }

            if declaration.cas_timestamp {
                if let Some(previous) = &cas_field {
                    return Err(OdmError::Parsing(format!(
                        "Duplicate CASTimestamp field: {previous}, {attribute}"
                    )));
                }
                cas_field = Some(attribute.clone());
            }

            attribute_types.insert(attribute.clone(), field.ty);
            property_mapping.insert(attribute, property.clone());
            field_definitions.insert(property, field.clone());
        }

        for key in &definition.primary_index {
            if !property_mapping.contains_key(key) {
                return Err(OdmError::Parsing(format!(
                    "Primary field {key} is not defined."
                )));
            }
        }

        let repository = definition
            .repository
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| config.default_repository.clone());

        tracing::debug!(
            item = %descriptor.name,
            table = %definition.table,
            fields = field_definitions.len(),
            cas = ?cas_field,
            "parsed item metadata"
        );

        Ok(Self {
            item_name: descriptor.name.clone(),
            definition,
            repository,
            property_mapping,
            field_definitions,
            attribute_types,
            cas_field,
        })
    }
}
