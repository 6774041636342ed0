//! Registry Module
//!
//! Owns the parsed metadata of every mapped item type.
//!
//! ## Concurrency Model
//! - One slot per `TypeId`, created under a short `RwLock` write section
//! - Each slot is a `OnceCell`: the first caller parses, concurrent first
//!   callers block on it, later callers read without locking the cell
//! - A failed parse leaves the slot empty; the next call parses again
//! - Entries live as long as the registry; the global one lives for the
//!   whole process

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{OdmError, Result};
use crate::item::{validate_adapter, AnyItemMapper, Item, ItemMapper};
use crate::metadata::ItemMetadata;

type Slot = Arc<OnceCell<Arc<ItemMetadata>>>;

static GLOBAL: Lazy<MetadataRegistry> = Lazy::new(|| MetadataRegistry::new(Config::default()));

/// Per-type metadata cache with single-flight construction
pub struct MetadataRegistry {
    config: Config,
    slots: RwLock<HashMap<TypeId, Slot>>,
}

impl MetadataRegistry {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide registry using the default configuration
    pub fn global() -> &'static MetadataRegistry {
        &GLOBAL
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Metadata of `T`, parsed on first use
    pub fn metadata<T: Item>(&self) -> Result<Arc<ItemMetadata>> {
        let slot = self.slot::<T>();

        let metadata = slot.get_or_try_init(|| {
            let metadata = ItemMetadata::parse(&T::describe(), &self.config)?;
            if self.config.validate_adapters {
                validate_adapter::<T>(&metadata)?;
            }
            tracing::debug!(
                item = %metadata.item_name(),
                table = %metadata.table_name(),
                "registered item type"
            );
            Ok::<_, OdmError>(Arc::new(metadata))
        })?;

        Ok(Arc::clone(metadata))
    }

    /// Mapper for `T` sharing the registered metadata
    pub fn mapper<T: Item>(&self) -> Result<ItemMapper<T>> {
        let metadata = self.metadata::<T>()?;
        Ok(ItemMapper::new(metadata, &self.config))
    }

    /// Type-erased mapper for `T`
    pub fn any_mapper<T: Item>(&self) -> Result<Arc<dyn AnyItemMapper>> {
        Ok(Arc::new(self.mapper::<T>()?))
    }

    /// Whether `T`'s metadata has been built
    pub fn contains<T: Item>(&self) -> bool {
        self.slots
            .read()
            .get(&TypeId::of::<T>())
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of item types with built metadata
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot<T: Item>(&self) -> Slot {
        let type_id = TypeId::of::<T>();

        if let Some(slot) = self.slots.read().get(&type_id) {
            return Arc::clone(slot);
        }

        let mut slots = self.slots.write();
        Arc::clone(slots.entry(type_id).or_default())
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
