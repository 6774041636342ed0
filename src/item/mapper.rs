//! Typed item mapper
//!
//! Dehydrates items into attribute maps, hydrates attribute maps into items
//! and derives primary keys, all against one shared `ItemMetadata`.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::{Config, DiagnosticLevel};
use crate::error::{OdmError, Result};
use crate::key::PrimaryKeys;
use crate::metadata::{AttributeType, ItemMetadata};
use crate::value::{coerce_to_string, AttributeMap, AttributeValue};

use super::Item;

/// Mapper for one item type
///
/// Cheap to clone; clones share the same metadata.
pub struct ItemMapper<T: Item> {
    metadata: Arc<ItemMetadata>,
    unknown_attribute_level: DiagnosticLevel,
    _item: PhantomData<fn() -> T>,
}

impl<T: Item> Clone for ItemMapper<T> {
    fn clone(&self) -> Self {
        Self {
            metadata: Arc::clone(&self.metadata),
            unknown_attribute_level: self.unknown_attribute_level,
            _item: PhantomData,
        }
    }
}

impl<T: Item> ItemMapper<T> {
    /// Wrap already-parsed metadata
    pub fn new(metadata: Arc<ItemMetadata>, config: &Config) -> Self {
        Self {
            metadata,
            unknown_attribute_level: config.unknown_attribute_level,
            _item: PhantomData,
        }
    }

    /// Parse `T`'s declarations and build a mapper, bypassing any registry
    pub fn from_declarations(config: &Config) -> Result<Self> {
        let metadata = ItemMetadata::parse(&T::describe(), config)?;
        if config.validate_adapters {
            validate_adapter::<T>(&metadata)?;
        }
        Ok(Self::new(Arc::new(metadata), config))
    }

    pub fn metadata(&self) -> &ItemMetadata {
        &self.metadata
    }

    pub fn shared_metadata(&self) -> Arc<ItemMetadata> {
        Arc::clone(&self.metadata)
    }

    // =========================================================================
    // Dehydration
    // =========================================================================

    /// One entry per declared field, keyed by attribute name
    ///
    /// Values are passed through as the adapter reports them.
    pub fn dehydrate(&self, item: &T) -> Result<AttributeMap> {
        let mut attributes = AttributeMap::with_capacity(self.metadata.field_definitions().len());

        for (property, attribute, _) in self.metadata.fields() {
            let value = item.get(property).ok_or_else(|| self.unexposed(property))?;
            attributes.insert(attribute.to_string(), value);
        }

        tracing::trace!(
            item = %self.metadata.item_name(),
            attributes = attributes.len(),
            "dehydrated item"
        );
        Ok(attributes)
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Build a new item from `attributes`
    ///
    /// The item starts from `Item::blank`; unknown attributes are skipped.
    pub fn hydrate(&self, attributes: &AttributeMap) -> Result<T> {
        let mut item = T::blank();
        self.apply(attributes, &mut item)?;
        Ok(item)
    }

    /// Populate an existing item from `attributes`
    ///
    /// Writes go to a staged copy; `item` is only replaced once every
    /// attribute was applied, so a failure leaves it untouched.
    pub fn hydrate_into(&self, attributes: &AttributeMap, item: &mut T) -> Result<()> {
        let mut staged = item.clone();
        self.apply(attributes, &mut staged)?;
        *item = staged;
        Ok(())
    }

    fn apply(&self, attributes: &AttributeMap, target: &mut T) -> Result<()> {
        for (attribute, value) in attributes {
            let Some(property) = self.metadata.property_for(attribute) else {
                self.report_unknown(attribute, value);
                continue;
            };

            let value = match self.metadata.attribute_type(attribute) {
                Some(AttributeType::String) => coerce_to_string(attribute, value.clone())?,
                _ => value.clone(),
            };

            target.set(property, value)?;
        }

        tracing::trace!(
            item = %self.metadata.item_name(),
            attributes = attributes.len(),
            "hydrated item"
        );
        Ok(())
    }

    fn report_unknown(&self, attribute: &str, value: &AttributeValue) {
        match self.unknown_attribute_level {
            DiagnosticLevel::Warn => tracing::warn!(
                item = %self.metadata.item_name(),
                attribute = %attribute,
                value = ?value,
                "Got an unknown attribute, skipping"
            ),
            DiagnosticLevel::Debug => tracing::debug!(
                item = %self.metadata.item_name(),
                attribute = %attribute,
                value = ?value,
                "Got an unknown attribute, skipping"
            ),
        }
    }

    // =========================================================================
    // Keys
    // =========================================================================

    pub fn primary_keys(&self, item: &T) -> Result<PrimaryKeys> {
        self.metadata.primary_keys_of(item)
    }

    pub fn primary_keys_from_attributes(&self, attributes: &AttributeMap) -> Result<PrimaryKeys> {
        self.metadata.primary_keys_from_attributes(attributes)
    }

    pub fn primary_identifier(&self, item: &T) -> Result<String> {
        self.metadata.primary_identifier_of(item)
    }

    pub fn primary_identifier_from_attributes(&self, attributes: &AttributeMap) -> Result<String> {
        self.metadata.primary_identifier_from_attributes(attributes)
    }

    fn unexposed(&self, property: &str) -> OdmError {
        OdmError::Parsing(format!(
            "Property {property} of {} is not exposed by its adapter",
            self.metadata.item_name()
        ))
    }
}

/// Check that `T`'s adapter answers for every declared property
pub(crate) fn validate_adapter<T: Item>(metadata: &ItemMetadata) -> Result<()> {
    let probe = T::blank();

    for (property, _, _) in metadata.fields() {
        if probe.get(property).is_none() {
            return Err(OdmError::Parsing(format!(
                "Property {property} of {} is not exposed by its adapter",
                metadata.item_name()
            )));
        }
    }

    Ok(())
}
