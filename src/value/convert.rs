//! Conversions between Rust field types, JSON and attribute values

use bytes::Bytes;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as Json};

use crate::error::{OdmError, Result};

use super::{AttributeMap, AttributeValue};

// =============================================================================
// Rust -> AttributeValue
// =============================================================================

macro_rules! impl_from_int {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }

            impl From<&$ty> for AttributeValue {
                fn from(value: &$ty) -> Self {
                    Self::Int(i64::from(*value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Values above `i64::MAX` are kept exact as decimal strings.
impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Self::Int(n),
            Err(_) => Self::String(value.to_string()),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Bytes> for AttributeValue {
    fn from(value: Bytes) -> Self {
        Self::Binary(value)
    }
}

impl From<AttributeMap> for AttributeValue {
    fn from(value: AttributeMap) -> Self {
        Self::Map(value)
    }
}

impl<T> From<Vec<T>> for AttributeValue
where
    Self: From<T>,
{
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Self::from).collect())
    }
}

impl<T> From<Option<T>> for AttributeValue
where
    Self: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}

// =============================================================================
// AttributeValue -> Rust
// =============================================================================

/// Conversion from a stored attribute into a Rust field type
///
/// The error is a human-readable reason; callers attach the property name.
pub trait FromAttribute: Sized {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String>;
}

impl FromAttribute for AttributeValue {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        Ok(value)
    }
}

impl FromAttribute for String {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::String(s) => Ok(s),
            _ => Err("expected a string".to_string()),
        }
    }
}

impl FromAttribute for bool {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::Bool(b) => Ok(b),
            AttributeValue::Int(n) => Ok(n != 0),
            _ => Err("expected a bool".to_string()),
        }
    }
}

impl FromAttribute for i64 {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::Int(n) => Ok(n),
            AttributeValue::Float(n) => whole_float(n, i64::MIN as f64, i64::MAX as f64)
                .map(|n| n as i64)
                .ok_or_else(|| format!("value {n} is not representable as i64")),
            AttributeValue::String(s) => s
                .parse()
                .map_err(|_| format!("cannot parse '{s}' as an integer")),
            _ => Err("expected an integer".to_string()),
        }
    }
}

impl FromAttribute for u64 {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::Int(n) => {
                u64::try_from(n).map_err(|_| format!("value {n} is out of range for u64"))
            }
            AttributeValue::Float(n) => whole_float(n, 0.0, u64::MAX as f64)
                .map(|n| n as u64)
                .ok_or_else(|| format!("value {n} is not representable as u64")),
            AttributeValue::String(s) => s
                .parse()
                .map_err(|_| format!("cannot parse '{s}' as an unsigned integer")),
            _ => Err("expected an integer".to_string()),
        }
    }
}

/// `n` if it is a whole number in `[min, max)`
///
/// The bounds are powers of two, exactly representable as `f64`.
fn whole_float(n: f64, min: f64, max: f64) -> Option<f64> {
    (n.fract() == 0.0 && n >= min && n < max).then_some(n)
}

macro_rules! impl_from_attribute_narrow {
    ( $( $ty:ty ),* ) => {
        $(
            impl FromAttribute for $ty {
                fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
                    let wide = i64::from_attribute(value)?;
                    <$ty>::try_from(wide)
                        .map_err(|_| format!("value {wide} is out of range for {}", stringify!($ty)))
                }
            }
        )*
    };
}

impl_from_attribute_narrow!(i8, i16, i32, u8, u16, u32);

impl FromAttribute for f64 {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::Float(n) => Ok(n),
            AttributeValue::Int(n) => Ok(n as f64),
            AttributeValue::String(s) => s
                .parse()
                .map_err(|_| format!("cannot parse '{s}' as a number")),
            _ => Err("expected a number".to_string()),
        }
    }
}

impl FromAttribute for Bytes {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::Binary(bytes) => Ok(bytes),
            AttributeValue::String(s) => Ok(Bytes::from(s)),
            _ => Err("expected binary".to_string()),
        }
    }
}

impl FromAttribute for AttributeMap {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::Map(map) => Ok(map),
            _ => Err("expected a map".to_string()),
        }
    }
}

impl<T: FromAttribute> FromAttribute for Vec<T> {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::List(items) | AttributeValue::Set(items) => {
                items.into_iter().map(T::from_attribute).collect()
            }
            _ => Err("expected a list or set".to_string()),
        }
    }
}

impl<T: FromAttribute> FromAttribute for Option<T> {
    fn from_attribute(value: AttributeValue) -> std::result::Result<Self, String> {
        match value {
            AttributeValue::Null => Ok(None),
            value => T::from_attribute(value).map(Some),
        }
    }
}

// =============================================================================
// JSON bridge
// =============================================================================

impl From<Json> for AttributeValue {
    fn from(value: Json) -> Self {
        match value {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&AttributeValue> for Json {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Null => Json::Null,
            AttributeValue::Bool(b) => Json::Bool(*b),
            AttributeValue::Int(n) => Json::Number((*n).into()),
            // Non-finite floats have no JSON form
            AttributeValue::Float(n) => JsonNumber::from_f64(*n).map_or(Json::Null, Json::Number),
            AttributeValue::String(s) => Json::String(s.clone()),
            AttributeValue::Binary(bytes) => {
                Json::Array(bytes.iter().map(|b| Json::Number((*b).into())).collect())
            }
            AttributeValue::List(items) | AttributeValue::Set(items) => {
                Json::Array(items.iter().map(Json::from).collect())
            }
            AttributeValue::Map(map) => attribute_map_to_json(map),
        }
    }
}

/// Build an attribute map from a JSON object
pub fn attribute_map_from_json(value: Json) -> Result<AttributeMap> {
    match AttributeValue::from(value) {
        AttributeValue::Map(map) => Ok(map),
        _ => Err(OdmError::TypeMismatch {
            expected: "JSON object",
        }),
    }
}

/// Render an attribute map as a JSON object
pub fn attribute_map_to_json(map: &AttributeMap) -> Json {
    let fields: JsonMap<String, Json> = map
        .iter()
        .map(|(key, value)| (key.clone(), Json::from(value)))
        .collect();
    Json::Object(fields)
}
