//! # Tagged Dates
//!
//! Date/time instants travel as strings of the exact form `__turborpc.Date(<timestamp>)`.
//!
//! Besides the raw [`tag`] / [`untag`] helpers, this module can be used with serde's `with`
//! attribute so model types write tagged dates and accept both tagged and plain RFC 3339
//! strings:
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "turborpc_core::codec::date")]
//!     at: DateTime<Utc>,
//!     #[serde(with = "turborpc_core::codec::date::option")]
//!     ended: Option<DateTime<Utc>>,
//! }
//! ```
use super::{DATE_PREFIX, DATE_SUFFIX};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

/// Formats an instant as a tagged date string.
pub fn tag(instant: &DateTime<Utc>) -> String {
    format!(
        "{DATE_PREFIX}{}{DATE_SUFFIX}",
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Extracts the instant out of a tagged date string.
///
/// Returns `None` when the prefix or the suffix is missing, or when the inner text is not a
/// timestamp.
pub fn untag(text: &str) -> Option<DateTime<Utc>> {
    let inner = text.strip_prefix(DATE_PREFIX)?.strip_suffix(DATE_SUFFIX)?;
    parse_timestamp(inner)
}

/// Parses the timestamp formats servers are known to emit, truncated to milliseconds.
///
/// Offset-less date-times and bare dates are read as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    let parsed = DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .map(|instant| instant.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })?;

    Some(parsed.trunc_subsecs(3))
}

pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&tag(instant))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    untag(&text)
        .or_else(|| parse_timestamp(&text))
        .ok_or_else(|| D::Error::custom(format!("invalid date value '{text}'")))
}

/// Same as the parent module, for `Option<DateTime<Utc>>` fields (`null` <-> `None`).
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(instant: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match instant {
            Some(instant) => super::serialize(instant, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Tagged(#[serde(with = "super")] DateTime<Utc>);

        Ok(Option::<Tagged>::deserialize(deserializer)?.map(|Tagged(instant)| instant))
    }
}
