//! Type-erased mapper
//!
//! Lets a repository layer hold mappers for many item types behind one
//! trait object. Objects are checked against the mapped type on every call.

use std::any::{type_name, Any};

use crate::error::{OdmError, Result};
use crate::key::PrimaryKeys;
use crate::metadata::ItemMetadata;
use crate::value::AttributeMap;

use super::{Item, ItemMapper};

/// Mapper operations over `dyn Any` objects
pub trait AnyItemMapper: Send + Sync {
    fn metadata(&self) -> &ItemMetadata;

    /// Fails with `TypeMismatch` unless `item` is the mapped type
    fn dehydrate_any(&self, item: &dyn Any) -> Result<AttributeMap>;

    fn hydrate_any(&self, attributes: &AttributeMap) -> Result<Box<dyn Any + Send>>;

    /// Fails with `TypeMismatch` unless `item` is the mapped type
    fn hydrate_into_any(&self, attributes: &AttributeMap, item: &mut dyn Any) -> Result<()>;

    fn primary_keys_any(&self, item: &dyn Any) -> Result<PrimaryKeys>;

    fn primary_identifier_any(&self, item: &dyn Any) -> Result<String>;
}

impl<T: Item> AnyItemMapper for ItemMapper<T> {
    fn metadata(&self) -> &ItemMetadata {
        ItemMapper::<T>::metadata(self)
    }

    fn dehydrate_any(&self, item: &dyn Any) -> Result<AttributeMap> {
        self.dehydrate(downcast_ref::<T>(item)?)
    }

    fn hydrate_any(&self, attributes: &AttributeMap) -> Result<Box<dyn Any + Send>> {
        Ok(Box::new(self.hydrate(attributes)?))
    }

    fn hydrate_into_any(&self, attributes: &AttributeMap, item: &mut dyn Any) -> Result<()> {
        let item = item.downcast_mut::<T>().ok_or_else(mismatch::<T>)?;
        self.hydrate_into(attributes, item)
    }

    fn primary_keys_any(&self, item: &dyn Any) -> Result<PrimaryKeys> {
        self.primary_keys(downcast_ref::<T>(item)?)
    }

    fn primary_identifier_any(&self, item: &dyn Any) -> Result<String> {
        self.primary_identifier(downcast_ref::<T>(item)?)
    }
}

fn downcast_ref<T: Item>(item: &dyn Any) -> Result<&T> {
    item.downcast_ref::<T>().ok_or_else(mismatch::<T>)
}

fn mismatch<T: Item>() -> OdmError {
    OdmError::TypeMismatch {
        expected: type_name::<T>(),
    }
}
