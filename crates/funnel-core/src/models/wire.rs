//! Lenient field decoders for backend JSON.
//!
//! The challenge API is loose about scalar types: ids arrive as strings or
//! numbers, text fields may be `null`, and timestamps come as RFC 3339,
//! zone-less ISO date-times, plain dates or epoch milliseconds. Timestamps are
//! display-only, so one the decoder cannot read becomes `None` instead of
//! failing the whole item.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::warn;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Unsigned(u64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Integer(n) => n.to_string(),
            StringOrNumber::Unsigned(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
    Other(IgnoredAny),
}

/// Identifier sent as a JSON string or number
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

/// Optional identifier sent as a JSON string, number or null
pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

/// Text field where `null` means empty
pub fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional timestamp in any of the accepted encodings; unreadable values are `None`
pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let timestamp = match Option::<RawTimestamp>::deserialize(deserializer)? {
        None => None,
        Some(RawTimestamp::Millis(millis)) => {
            let parsed = DateTime::from_timestamp_millis(millis);
            if parsed.is_none() {
                warn!("Ignoring out-of-range timestamp: {}", millis);
            }
            parsed
        }
        Some(RawTimestamp::Text(text)) if text.trim().is_empty() => None,
        Some(RawTimestamp::Text(text)) => {
            let parsed = parse_timestamp(&text);
            if parsed.is_none() {
                warn!("Ignoring unparseable timestamp: {:?}", text);
            }
            parsed
        }
        Some(RawTimestamp::Other(_)) => {
            warn!("Ignoring timestamp that is neither text nor a number");
            None
        }
    };
    Ok(timestamp)
}

/// Parse RFC 3339, then a zone-less date-time, then a plain date, all read as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, NAIVE_DATE_TIME_FORMAT) {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
