//! # JSON Wire Codec
//!
//! This module turns call payloads into JSON text and decodes response bodies back into a
//! [`WireValue`] tree.
//!
//! ## How it works
//!
//! 1. **Encoder (Rust -> JSON)**:
//!    - Takes any `Serialize` value and writes it with `serde_json`.
//!    - [`WireValue::Date`] leaves are written as tagged strings (see [`date`]), so anything
//!      produced by [`decode`] can be sent back unchanged.
//!
//! 2. **Decoder (JSON -> WireValue)**:
//!    - Parses the raw text with `serde_json`.
//!    - Visits every node of the parsed tree. String leaves of the form
//!      `__turborpc.Date(<timestamp>)` whose timestamp parses become [`WireValue::Date`].
//!    - Tagged-looking strings with an unparseable timestamp stay plain strings.
pub mod date;
mod value;

pub use value::WireValue;

use crate::error::CodecError;
use serde::Serialize;

/// Leading marker of a tagged date string.
pub const DATE_PREFIX: &str = "__turborpc.Date(";

/// Trailing marker of a tagged date string.
pub const DATE_SUFFIX: &str = ")";

/// Serializes a call payload to JSON text.
pub fn encode<T>(input: &T) -> Result<String, CodecError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(input).map_err(CodecError::Encode)
}

/// Parses JSON text, reviving tagged dates at every nesting depth.
///
/// # Returns
///
/// * `Ok(WireValue)` - The decoded tree.
/// * `Err(CodecError::Decode)` - If `raw` is not valid JSON.
pub fn decode(raw: &str) -> Result<WireValue, CodecError> {
    let json: serde_json::Value = serde_json::from_str(raw).map_err(CodecError::Decode)?;
    Ok(WireValue::from_json(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 1, 12, 30, 15).unwrap() + TimeDelta::milliseconds(250)
    }

    #[test]
    fn decodes_tagged_date_string() {
        let raw = format!("\"{}\"", date::tag(&instant()));

        let value = decode(&raw).unwrap();

        assert_eq!(value, WireValue::Date(instant()));
    }

    #[test]
    fn leaves_unparseable_tagged_string_untouched() {
        let value = decode(r#""__turborpc.Date(not-a-date)""#).unwrap();

        assert_eq!(
            value,
            WireValue::String("__turborpc.Date(not-a-date)".to_string())
        );
    }

    #[test]
    fn requires_closing_parenthesis() {
        let value = decode(r#""__turborpc.Date(2023-06-01T12:30:15Z""#).unwrap();

        assert_eq!(value.as_str(), Some("__turborpc.Date(2023-06-01T12:30:15Z"));
    }

    #[test]
    fn converts_only_tagged_leaves_at_any_depth() {
        let raw = format!(
            r#"{{"items":[{{"Content":"milk","Created":"{}","Finished":null}}],"note":"2023-06-01T12:30:15Z"}}"#,
            date::tag(&instant())
        );

        let value = decode(&raw).unwrap();
        let item = match value.get("items") {
            Some(WireValue::Array(items)) => &items[0],
            other => panic!("expected an array of items, got {other:?}"),
        };

        assert_eq!(item.get("Created").and_then(WireValue::as_date), Some(instant()));
        assert_eq!(item.get("Content").and_then(WireValue::as_str), Some("milk"));
        assert!(item.get("Finished").is_some_and(WireValue::is_null));
        // Plain timestamps without the tag are not dates.
        assert_eq!(
            value.get("note").and_then(WireValue::as_str),
            Some("2023-06-01T12:30:15Z")
        );
    }

    #[test]
    fn encoding_a_decoded_value_is_symmetric() {
        let raw = format!(r#"{{"at":"{}","n":[1,2.5,true]}}"#, date::tag(&instant()));

        let decoded = decode(&raw).unwrap();
        let reencoded = encode(&decoded).unwrap();

        assert_eq!(decode(&reencoded).unwrap(), decoded);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode("{\"output\":").unwrap_err();

        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn encodes_unit_as_null() {
        assert_eq!(encode(&()).unwrap(), "null");
        assert_eq!(encode("buy milk").unwrap(), "\"buy milk\"");
    }
}
