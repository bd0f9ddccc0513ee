//! Input normalization and validation for new PC records
//!
//! Turns a raw request body into a [`NewPc`] or a [`ValidationError`].
//! Required text fields are checked before numeric fields, so a payload with
//! both problems reports the missing field.

use thiserror::Error;

use crate::model::{CreatePcRequest, NewPc, RawField};

/// Why a create payload was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was absent, not text, or blank after trimming.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// `ram` or `storage` was not a plain positive integer.
    #[error("{0} must be a positive integer")]
    InvalidNumber(&'static str),
}

/// Decodes a request body into the typed create payload.
///
/// Fails on malformed JSON, a non-object body, or unknown keys.
///
/// The derived struct decoder would also fill fields from a JSON array by
/// position, so the body is checked to be an object first.
pub fn decode(body: &[u8]) -> Result<CreatePcRequest, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

/// Validates and normalizes a decoded payload.
pub fn validate(request: CreatePcRequest) -> Result<NewPc, ValidationError> {
    let id = required_text("id", request.id.as_ref())?;
    let name = required_text("name", request.name.as_ref())?;
    let cpu = required_text("cpu", request.cpu.as_ref())?;
    let purpose = required_text("purpose", request.purpose.as_ref())?;

    let ram = positive_int("ram", request.ram.as_ref())?;
    let storage = positive_int("storage", request.storage.as_ref())?;

    let note = match request.note {
        Some(RawField::Text(text)) => text.trim().to_owned(),
        _ => String::new(),
    };

    Ok(NewPc {
        id,
        name,
        cpu,
        ram,
        storage,
        purpose,
        note,
    })
}

/// Parses a strictly positive decimal integer.
///
/// Only ASCII digits are accepted after trimming: no sign, no decimal point,
/// no grouping separators. Zero and values beyond `i64` are rejected.
pub fn parse_positive_int(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok().filter(|value| *value > 0)
}

fn required_text(field: &'static str, value: Option<&RawField>) -> Result<String, ValidationError> {
    let text = match value {
        Some(RawField::Text(text)) => text.trim().to_owned(),
        Some(RawField::Number(number)) => number.to_string(),
        _ => String::new(),
    };

    if text.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(text)
}

fn positive_int(field: &'static str, value: Option<&RawField>) -> Result<i64, ValidationError> {
    let parsed = match value {
        Some(RawField::Text(text)) => parse_positive_int(text),
        // Floats have no i64 form, so 16.0 is rejected along with negatives.
        Some(RawField::Number(number)) => number.as_i64().filter(|value| *value > 0),
        _ => None,
    };

    parsed.ok_or(ValidationError::InvalidNumber(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn request(value: Value) -> CreatePcRequest {
        serde_json::from_value(value).expect("payload should decode")
    }

    fn valid_payload() -> Value {
        json!({
            "id": "pc1",
            "name": "Gaming",
            "cpu": "i7",
            "ram": "16",
            "storage": "512",
            "purpose": "gaming"
        })
    }

    #[test]
    fn test_parse_positive_int() {
        assert_eq!(parse_positive_int("16"), Some(16));
        assert_eq!(parse_positive_int("  32 "), Some(32));
        assert_eq!(parse_positive_int("007"), Some(7));
        assert_eq!(parse_positive_int("0"), None);
        assert_eq!(parse_positive_int("-5"), None);
        assert_eq!(parse_positive_int("+5"), None);
        assert_eq!(parse_positive_int("abc"), None);
        assert_eq!(parse_positive_int("1.5"), None);
        assert_eq!(parse_positive_int("1,024"), None);
        assert_eq!(parse_positive_int(""), None);
        assert_eq!(parse_positive_int("99999999999999999999"), None);
    }

    #[test]
    fn test_valid_payload_is_normalized() {
        let mut payload = valid_payload();
        payload["name"] = json!("  Gaming  ");
        payload["note"] = json!("  quiet fans ");

        let pc = validate(request(payload)).unwrap();
        assert_eq!(pc.id, "pc1");
        assert_eq!(pc.name, "Gaming");
        assert_eq!(pc.ram, 16);
        assert_eq!(pc.storage, 512);
        assert_eq!(pc.note, "quiet fans");
    }

    #[test]
    fn test_numeric_json_values_accepted() {
        let mut payload = valid_payload();
        payload["ram"] = json!(32);
        payload["storage"] = json!(1024);

        let pc = validate(request(payload)).unwrap();
        assert_eq!(pc.ram, 32);
        assert_eq!(pc.storage, 1024);
    }

    #[test]
    fn test_invalid_ram_rejected() {
        for bad in [json!("0"), json!("-5"), json!("abc"), json!(0), json!(-5), json!(16.0), json!(true)] {
            let mut payload = valid_payload();
            payload["ram"] = bad.clone();
            assert_eq!(
                validate(request(payload)),
                Err(ValidationError::InvalidNumber("ram")),
                "ram = {bad}"
            );
        }
    }

    #[test]
    fn test_missing_number_is_invalid_number() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("storage");
        assert_eq!(validate(request(payload)), Err(ValidationError::InvalidNumber("storage")));
    }

    #[test]
    fn test_missing_field_reported_before_invalid_number() {
        let mut payload = valid_payload();
        payload["cpu"] = json!("   ");
        payload["ram"] = json!("abc");
        assert_eq!(validate(request(payload)), Err(ValidationError::MissingField("cpu")));
    }

    #[test]
    fn test_required_fields_in_order() {
        assert_eq!(validate(request(json!({}))), Err(ValidationError::MissingField("id")));

        let mut payload = valid_payload();
        payload["purpose"] = Value::Null;
        assert_eq!(validate(request(payload)), Err(ValidationError::MissingField("purpose")));

        let mut payload = valid_payload();
        payload["name"] = json!(["not", "text"]);
        assert_eq!(validate(request(payload)), Err(ValidationError::MissingField("name")));
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let mut payload = valid_payload();
        payload["id"] = json!(42);
        assert_eq!(validate(request(payload)).unwrap().id, "42");
    }

    #[test]
    fn test_non_string_note_becomes_empty() {
        let mut payload = valid_payload();
        payload["note"] = json!(12);
        assert_eq!(validate(request(payload)).unwrap().note, "");
    }

    #[test]
    fn test_decode_rejects_malformed_bodies() {
        assert!(decode(b"").is_err());
        assert!(decode(b"{not json").is_err());
        assert!(decode(b"[1, 2]").is_err());
        assert!(decode(br#"["pc1", "Gaming", "i7", "16", "512", "gaming"]"#).is_err());
        assert!(decode(br#""pc1""#).is_err());
        assert!(decode(b"null").is_err());
        assert!(decode(br#"{"id": "x", "extra": 1}"#).is_err());
        assert!(decode(br#"{"id": "x"}"#).is_ok());
    }
}
