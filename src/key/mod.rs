//! Key Module
//!
//! Primary key extraction and composite identifier derivation.
//!
//! ## Responsibilities
//! - Read primary index values, in declared order, from raw attribute maps
//!   or from items through their adapter
//! - Derive a deterministic identifier string from those values
//!
//! ## Identifier
//! ```text
//! md5_hex( md5_hex(k1) ++ md5_hex(k2) ++ ... )
//! ```
//! Each `k` is the string form of a key value. Identifiers must match those
//! derived by other clients of the same tables. MD5 offers no collision
//! resistance against adversarial key values.

mod identifier;

pub use identifier::primary_identifier;

use indexmap::IndexMap;

use crate::error::{OdmError, Result};
use crate::item::Item;
use crate::metadata::ItemMetadata;
use crate::value::{AttributeMap, AttributeValue};

/// Primary index attribute-name -> value, in declared order
pub type PrimaryKeys = IndexMap<String, AttributeValue>;

impl ItemMetadata {
    /// Primary keys of a raw attribute map
    ///
    /// An absent or null component is an incomplete key.
    pub fn primary_keys_from_attributes(&self, attributes: &AttributeMap) -> Result<PrimaryKeys> {
        let mut keys = PrimaryKeys::with_capacity(self.primary_index().len());

        for key in self.primary_index() {
            match attributes.get(key) {
                Some(value) if !value.is_null() => {
                    keys.insert(key.clone(), value.clone());
                }
                _ => return Err(OdmError::IncompleteKey { key: key.clone() }),
            }
        }

        Ok(keys)
    }

    /// Primary keys of an item, read through its adapter
    pub fn primary_keys_of<T: Item>(&self, item: &T) -> Result<PrimaryKeys> {
        let mut keys = PrimaryKeys::with_capacity(self.primary_index().len());

        for key in self.primary_index() {
            let property = self.property_for(key).ok_or_else(|| {
                OdmError::Parsing(format!("Primary field {key} is not defined."))
            })?;
            let value = item.get(property).ok_or_else(|| {
                OdmError::Parsing(format!(
                    "Property {property} of {} is not exposed by its adapter",
                    self.item_name()
                ))
            })?;
            keys.insert(key.clone(), value);
        }

        Ok(keys)
    }

    /// Identifier of a raw attribute map
    pub fn primary_identifier_from_attributes(&self, attributes: &AttributeMap) -> Result<String> {
        let keys = self.primary_keys_from_attributes(attributes)?;
        primary_identifier(&keys)
    }

    /// Identifier of an item
    pub fn primary_identifier_of<T: Item>(&self, item: &T) -> Result<String> {
        let keys = self.primary_keys_of(item)?;
        primary_identifier(&keys)
    }
}
