//! # itemodm
//!
//! An object/record mapper between typed Rust items and the attribute maps
//! of a DynamoDB-style document store:
//! - Declarative per-type metadata (table, primary index, field types, CAS field)
//! - Dehydration of items into attribute maps
//! - Hydration of attribute maps into items, with string coercion
//! - Deterministic primary key and identifier derivation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Repository / Record Manager (external)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   MetadataRegistry                           │
//! │        (one ItemMetadata per type, built once)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ ItemMapper  │          │  Key / Id   │
//!   │ (de/hydrate)│          │ derivation  │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────────────────────────────┐
//!   │   Item adapter  ◀──▶  AttributeMap  │
//!   └─────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod metadata;
pub mod item;
pub mod key;
pub mod registry;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{OdmError, Result};
pub use config::Config;
pub use value::{AttributeMap, AttributeValue};
pub use metadata::{ItemDescriptor, ItemMetadata};
pub use item::{AnyItemMapper, Item, ItemMapper};
pub use key::PrimaryKeys;
pub use registry::MetadataRegistry;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of itemodm
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
