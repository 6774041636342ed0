//! Declarations
//!
//! The configuration structs an item type provides to describe its mapping.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Declared type of an attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[default]
    String,
    Number,
    Binary,
    Bool,
    Null,
    List,
    Map,
    Set,
}

impl AttributeType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Number => "number",
            AttributeType::Binary => "binary",
            AttributeType::Bool => "bool",
            AttributeType::Null => "null",
            AttributeType::List => "list",
            AttributeType::Map => "map",
            AttributeType::Set => "set",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item-level declaration: where and how instances are stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Table holding the records
    pub table: String,

    /// Attribute names addressing a record, in order
    #[serde(alias = "primaryIndex")]
    pub primary_index: Vec<String>,

    /// Repository type name; the configured default when absent
    #[serde(default)]
    pub repository: Option<String>,
}

impl ItemDefinition {
    pub fn new<I, S>(table: impl Into<String>, primary_index: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            primary_index: primary_index.into_iter().map(Into::into).collect(),
            repository: None,
        }
    }

    /// Override the repository type
    pub fn repository(mut self, name: impl Into<String>) -> Self {
        self.repository = Some(name.into());
        self
    }
}

/// Property-level declaration of a mapped field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Attribute name override; the property name when absent
    #[serde(default)]
    pub name: Option<String>,

    /// Declared attribute type
    #[serde(default, rename = "type")]
    pub ty: AttributeType,
}

impl FieldDefinition {
    pub fn new(ty: AttributeType) -> Self {
        Self { name: None, ty }
    }

    pub fn string() -> Self {
        Self::new(AttributeType::String)
    }

    pub fn number() -> Self {
        Self::new(AttributeType::Number)
    }

    pub fn bool() -> Self {
        Self::new(AttributeType::Bool)
    }

    pub fn binary() -> Self {
        Self::new(AttributeType::Binary)
    }

    pub fn list() -> Self {
        Self::new(AttributeType::List)
    }

    pub fn map() -> Self {
        Self::new(AttributeType::Map)
    }

    pub fn set() -> Self {
        Self::new(AttributeType::Set)
    }

    /// Store the property under a different attribute name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attribute name used for `property`
    pub fn attribute_name<'a>(&'a self, property: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => property,
        }
    }
}

/// One declared property of an item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    /// Rust-side property name, as understood by the item adapter
    pub property: String,

    /// Type-level (non-instance) property; never mapped
    #[serde(default)]
    pub class_level: bool,

    /// Field mapping; unmapped properties are ignored
    #[serde(default)]
    pub field: Option<FieldDefinition>,

    /// Marks the optimistic-concurrency timestamp
    #[serde(default)]
    pub cas_timestamp: bool,
}

impl PropertyDeclaration {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            class_level: false,
            field: None,
            cas_timestamp: false,
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.field = Some(field);
        self
    }

    pub fn cas_timestamp(mut self) -> Self {
        self.cas_timestamp = true;
        self
    }

    pub fn class_level(mut self) -> Self {
        self.class_level = true;
        self
    }
}

/// Everything an item type declares about its mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// Name of the described type, used in diagnostics
    pub name: String,

    /// Item-level declaration; required
    #[serde(default)]
    pub item: Option<ItemDefinition>,

    /// Properties in declaration order
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,
}

impl ItemDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: None,
            properties: Vec::new(),
        }
    }

    pub fn item(mut self, definition: ItemDefinition) -> Self {
        self.item = Some(definition);
        self
    }

    pub fn property(mut self, declaration: PropertyDeclaration) -> Self {
        self.properties.push(declaration);
        self
    }

    /// Shorthand for a mapped instance property
    pub fn field(self, property: impl Into<String>, field: FieldDefinition) -> Self {
        self.property(PropertyDeclaration::new(property).field(field))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a descriptor from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
