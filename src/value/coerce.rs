//! String coercion
//!
//! The store cannot tell an empty string from an absent one, so values read
//! back for string-typed fields are normalized to their string form.

use crate::error::{OdmError, Result};

use super::AttributeValue;

/// Render a scalar value as text
///
/// - null and `false` render as `""`, `true` as `"1"`
/// - integers render in decimal
/// - floats render with 14 significant digits, see [`float_string`]
/// - binary renders as lossy UTF-8
///
/// Returns `None` for lists, maps and sets.
pub fn string_form(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::Null | AttributeValue::Bool(false) => Some(String::new()),
        AttributeValue::Bool(true) => Some("1".to_string()),
        AttributeValue::Int(n) => Some(n.to_string()),
        AttributeValue::Float(n) => Some(float_string(*n)),
        AttributeValue::String(s) => Some(s.clone()),
        AttributeValue::Binary(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        AttributeValue::List(_) | AttributeValue::Map(_) | AttributeValue::Set(_) => None,
    }
}

/// Significant digits kept when rendering a float
const FLOAT_PRECISION: usize = 14;

/// Render a float the way other clients of the same tables do (`%.14G`)
///
/// Trailing zeros are trimmed. Decimal exponents below -4 or at least 14
/// switch to exponent form with a mandatory fraction digit:
///
/// ```text
/// 0.1 + 0.2  -> "0.3"
/// 2.0        -> "2"
/// 1e21       -> "1.0E+21"
/// 1.5e-7     -> "1.5E-7"
/// ```
pub fn float_string(n: f64) -> String {
    if n.is_nan() {
        return "NAN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    // d.ddddddddddddde<exp>, already rounded to FLOAT_PRECISION digits
    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, n.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let mut out = String::with_capacity(digits.len() + 8);
    if n.is_sign_negative() {
        out.push('-');
    }

    if exponent < -4 || exponent >= FLOAT_PRECISION as i32 {
        let (lead, rest) = digits.split_at(1);
        out.push_str(lead);
        out.push('.');
        out.push_str(if rest.is_empty() { "0" } else { rest });
        out.push('E');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.unsigned_abs().to_string());
    } else if exponent < 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-exponent - 1) as usize));
        out.push_str(digits);
    } else {
        let point = exponent as usize + 1;
        if digits.len() <= point {
            out.push_str(digits);
            out.extend(std::iter::repeat('0').take(point - digits.len()));
        } else {
            let (whole, fraction) = digits.split_at(point);
            out.push_str(whole);
            out.push('.');
            out.push_str(fraction);
        }
    }

    out
}

/// Coerce the value of `attribute` into an `AttributeValue::String`
pub fn coerce_to_string(attribute: &str, value: AttributeValue) -> Result<AttributeValue> {
    if let AttributeValue::String(_) = value {
        return Ok(value);
    }

    string_form(&value)
        .map(AttributeValue::String)
        .ok_or_else(|| OdmError::Coercion {
            attribute: attribute.to_string(),
            found: value.kind(),
        })
}
