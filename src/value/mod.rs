//! Attribute Value Module
//!
//! The generic record representation used by the document store.
//!
//! ## Responsibilities
//! - Scalar and collection attribute values
//! - Insertion-ordered attribute maps
//! - Conversions between Rust field types and attribute values
//! - String coercion for the store's empty-string quirk
//!
//! ## Representation
//! ```text
//! AttributeMap (attribute-name -> AttributeValue)
//!   ├── "pk"   -> String("u1")
//!   ├── "sk"   -> Int(1)
//!   └── "tags" -> Set([String("a"), String("b")])
//! ```

mod coerce;
mod convert;

pub use coerce::{coerce_to_string, float_string, string_form};
pub use convert::{attribute_map_from_json, attribute_map_to_json, FromAttribute};

use bytes::Bytes;
use indexmap::IndexMap;

/// Attribute-name -> value, in insertion order
///
/// Equality ignores ordering.
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// A single attribute value as stored in a record
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AttributeValue {
    /// Absent / null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Integral number
    Int(i64),

    /// Non-integral number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Opaque bytes
    Binary(Bytes),

    /// Ordered list of heterogeneous values
    List(Vec<AttributeValue>),

    /// Nested document
    Map(AttributeMap),

    /// Unordered set of scalar values
    Set(Vec<AttributeValue>),
}

impl AttributeValue {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the value's kind, used in diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::Binary(_) => "binary",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
        }
    }

    /// Decode into a Rust field type, attributing failures to `property`
    pub fn decode<T: FromAttribute>(self, property: &str) -> crate::Result<T> {
        let kind = self.kind();
        T::from_attribute(self).map_err(|message| {
            crate::OdmError::adapter(property, format!("{message} (got {kind})"))
        })
    }
}
