//! Request body decoding.
//!
//! Turns a raw body into a flat map of field name to string value. JSON
//! bodies are used when the content type says so; everything else is read
//! as `application/x-www-form-urlencoded`.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::FormError;

/// Decoded request fields. A missing key means the field was not sent.
pub type FormFields = HashMap<String, String>;

/// Decode `body` according to `content_type`.
pub fn decode_body(content_type: &str, body: &[u8]) -> Result<FormFields, FormError> {
    if content_type.contains("application/json") {
        decode_json(body)
    } else {
        Ok(decode_urlencoded(&String::from_utf8_lossy(body)))
    }
}

/// Parse a JSON object into string fields.
///
/// String members are taken as-is and `null` members count as absent. Other
/// members keep their JSON text (`1`, `true`, `[..]`), so they reach the
/// validator as strings rather than being silently dropped.
pub fn decode_json(body: &[u8]) -> Result<FormFields, FormError> {
    let value: Value = serde_json::from_slice(body)?;
    let Value::Object(members) = value else {
        return Err(FormError::NotAnObject(json_kind(&value)));
    };

    let fields = members
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect();
    Ok(fields)
}

/// Parse `key=value&key=value` pairs.
///
/// Keys and values are percent-decoded with `+` as space. Pairs without `=`
/// are skipped; a repeated key keeps its last value.
pub fn decode_urlencoded(body: &str) -> FormFields {
    body.split('&')
        .filter(|pair| pair.contains('='))
        .flat_map(|pair| url::form_urlencoded::parse(pair.as_bytes()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
