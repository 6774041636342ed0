//! Metadata Module
//!
//! Declarative descriptions of mapped item types and the immutable metadata
//! parsed from them.
//!
//! ## Responsibilities
//! - Item-level and property-level declarations (serde-loadable)
//! - Parsing and validation into `ItemMetadata`
//! - Read accessors consumed by repositories and schema tooling
//!
//! ## Lifecycle
//! ```text
//!  ItemDescriptor ──parse──▶ ItemMetadata ──Arc──▶ mappers / key derivation
//!   (declarations)            (immutable)          (read-only, shared)
//! ```

mod descriptor;
mod model;
mod parser;

pub use descriptor::{
    AttributeType, FieldDefinition, ItemDefinition, ItemDescriptor, PropertyDeclaration,
};
pub use model::{ItemMetadata, KeyAttribute, KeyRole};
