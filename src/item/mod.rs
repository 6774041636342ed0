//! Item Module
//!
//! Adapters between mapped Rust types and attribute maps.
//!
//! ## Responsibilities
//! - `Item`: the per-type adapter capability (describe, construct, get, set)
//! - `ItemMapper`: dehydrate / hydrate / key derivation against shared metadata
//! - `AnyItemMapper`: the same operations over type-erased objects, rejecting
//!   objects of the wrong type
//!
//! ## Example
//! ```
//! use itemodm::{AttributeValue, Item, ItemDescriptor, OdmError};
//! use itemodm::metadata::{FieldDefinition, ItemDefinition};
//!
//! #[derive(Clone, Default)]
//! struct Tag {
//!     id: String,
//! }
//!
//! impl Item for Tag {
//!     fn describe() -> ItemDescriptor {
//!         ItemDescriptor::new("Tag")
//!             .item(ItemDefinition::new("Tags", ["id"]))
//!             .field("id", FieldDefinition::string())
//!     }
//!
//!     fn blank() -> Self {
//!         Self::default()
//!     }
//!
//!     fn get(&self, property: &str) -> Option<AttributeValue> {
//!         match property {
//!             "id" => Some(self.id.as_str().into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set(&mut self, property: &str, value: AttributeValue) -> itemodm::Result<()> {
//!         match property {
//!             "id" => self.id = value.decode(property)?,
//!             _ => return Err(OdmError::adapter(property, "unknown property")),
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod erased;
mod mapper;

pub use erased::AnyItemMapper;
pub use mapper::ItemMapper;
pub(crate) use mapper::validate_adapter;

use crate::error::Result;
use crate::metadata::ItemDescriptor;
use crate::value::AttributeValue;

/// Mapping capability of a Rust type
///
/// Implementations expose property access by name; the mapper never needs
/// any other view of the type's internals.
pub trait Item: Clone + Send + Sync + 'static {
    /// Declarations for this type; parsed once per process
    fn describe() -> ItemDescriptor;

    /// Instance used as the hydration target
    ///
    /// Must not depend on domain constructor logic or arguments.
    fn blank() -> Self;

    /// Current value of `property`; `None` if the type has no such property
    fn get(&self, property: &str) -> Option<AttributeValue>;

    /// Write `value` into `property`
    fn set(&mut self, property: &str, value: AttributeValue) -> Result<()>;
}
