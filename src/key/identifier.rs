//! Composite identifier digest

use crate::error::{OdmError, Result};
use crate::value::string_form;

use super::PrimaryKeys;

/// Digest primary key values into a single lowercase hex identifier
///
/// Order matters: the same values under a different key order produce a
/// different identifier.
pub fn primary_identifier(keys: &PrimaryKeys) -> Result<String> {
    let mut concatenated = String::with_capacity(keys.len() * 32);

    for (key, value) in keys {
        let text = string_form(value).ok_or_else(|| OdmError::Coercion {
            attribute: key.clone(),
            found: value.kind(),
        })?;
        concatenated.push_str(&format!("{:x}", md5::compute(text.as_bytes())));
    }

    Ok(format!("{:x}", md5::compute(concatenated.as_bytes())))
}
