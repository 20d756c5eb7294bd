//! Conversion between a JSON object body and the typed rows of the form editor.
//!
//! Decoding never fails: malformed row text falls back to a safe value of the
//! row's declared type. The only fallible path is turning user-typed raw text
//! back into rows, see [`toggle_mode`].

use serde_json::{Map, Number, Value};

use crate::domain::field::{FieldType, TypedField};
use crate::domain::request::BodyMode;
use crate::error::ValidationError;

/// Largest integer an f64 carries exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// One row per top-level key, in insertion order. Anything but an object is
/// rejected; callers usually fall back to [`encode_or_placeholder`].
pub fn encode_to_rows(json: &Value) -> Result<Vec<TypedField>, ValidationError> {
    let object = json.as_object().ok_or(ValidationError::NotAnObject)?;
    Ok(object
        .iter()
        .map(|(key, value)| encode_field(key, value))
        .collect())
}

pub fn encode_or_placeholder(json: &Value) -> Vec<TypedField> {
    encode_to_rows(json).unwrap_or_else(|_| vec![TypedField::placeholder()])
}

pub fn encode_field(key: &str, value: &Value) -> TypedField {
    let (field_type, raw_value) = match value {
        Value::String(s) => (FieldType::String, s.clone()),
        Value::Number(n) => (FieldType::Number, decode_number(&n.to_string()).to_string()),
        Value::Bool(b) => (FieldType::Boolean, b.to_string()),
        Value::Object(_) => (FieldType::Object, pretty(value)),
        Value::Array(_) => (FieldType::Array, pretty(value)),
        Value::Null => (FieldType::Null, String::from("null")),
    };
    TypedField::new(key, field_type, raw_value)
}

/// Builds the body object. Rows without a key are skipped, and a later row
/// overwrites an earlier one with the same key.
pub fn decode_from_rows(rows: &[TypedField]) -> Value {
    let mut object = Map::new();
    for row in rows.iter().filter(|row| !row.key.is_empty()) {
        object.insert(row.key.clone(), decode_field(row));
    }
    Value::Object(object)
}

pub fn decode_field(field: &TypedField) -> Value {
    let text = field.raw_value.as_str();
    match field.field_type {
        FieldType::String => Value::String(text.to_string()),
        FieldType::Number => decode_number(text),
        FieldType::Boolean => Value::Bool(text == "true"),
        FieldType::Object => match serde_json::from_str::<Value>(text) {
            Ok(parsed @ Value::Object(_)) => parsed,
            _ => Value::Object(Map::new()),
        },
        FieldType::Array => match serde_json::from_str::<Value>(text) {
            Ok(parsed @ Value::Array(_)) => parsed,
            _ => Value::Array(vec![]),
        },
        FieldType::Null => Value::Null,
    }
}

// Integral values come back as JSON integers so `12` stays `12`, not `12.0`.
// Encoding goes through here too, so number text is always in this form.
fn decode_number(text: &str) -> Value {
    let parsed = match float_prefix(text).parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return Value::from(0),
    };
    if parsed.fract() == 0.0 && parsed.abs() <= MAX_SAFE_INTEGER {
        Value::from(parsed as i64)
    } else {
        Number::from_f64(parsed)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(0))
    }
}

/// Longest leading decimal literal after leading whitespace, so `12.5kg`
/// reads as `12.5`. Empty when the text does not start with a number.
fn float_prefix(text: &str) -> &str {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &text[..end]
}

/// Serialized body as the raw editor shows it.
pub fn rows_to_text(rows: &[TypedField]) -> String {
    pretty(&decode_from_rows(rows))
}

/// Parses user-typed raw text into rows. Fails on invalid JSON and on JSON that
/// is not an object.
pub fn text_to_rows(raw_text: &str) -> Result<Vec<TypedField>, ValidationError> {
    let parsed: Value = serde_json::from_str(raw_text)
        .map_err(|e| ValidationError::InvalidJson(e.to_string()))?;
    encode_to_rows(&parsed)
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModeSwitch {
    ToRaw { raw_text: String },
    ToForm { rows: Vec<TypedField> },
}
impl ModeSwitch {
    pub fn mode(&self) -> BodyMode {
        match self {
            ModeSwitch::ToRaw { .. } => BodyMode::RAW,
            ModeSwitch::ToForm { .. } => BodyMode::FORM,
        }
    }
}

/// FORM to RAW always succeeds. RAW to FORM is rejected when the text is not a
/// JSON object; the caller keeps its current state in that case.
pub fn toggle_mode(
    current: BodyMode,
    rows: &[TypedField],
    raw_text: &str,
) -> Result<ModeSwitch, ValidationError> {
    match current {
        BodyMode::FORM => Ok(ModeSwitch::ToRaw {
            raw_text: rows_to_text(rows),
        }),
        BodyMode::RAW => text_to_rows(raw_text).map(|rows| ModeSwitch::ToForm { rows }),
    }
}

pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
