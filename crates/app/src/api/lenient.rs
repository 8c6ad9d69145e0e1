//! Deserializers for fields the API encodes inconsistently.

use jiff::{
    Timestamp,
    civil::Date,
    tz::{Offset, TimeZone},
};
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u64),
    Text(String),
}

/// `3` or `"3"`.
pub(crate) fn u32_from_any<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Count::deserialize(deserializer)? {
        Count::Number(value) => u32::try_from(value).map_err(D::Error::custom),
        Count::Text(text) => text.trim().parse().map_err(D::Error::custom),
    }
}

/// Like [`u32_from_any`], with `null` read as absent.
pub(crate) fn optional_u32_from_any<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(value)) => u32::try_from(value).map(Some).map_err(D::Error::custom),
        Some(Count::Text(text)) => text.trim().parse().map(Some).map_err(D::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(i64),
    Text(String),
}

/// `true`, `1` or `"1"`/`"true"`.
pub(crate) fn bool_from_any<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Number(value) => Ok(value != 0),
        Flag::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag {other:?}"))),
        },
    }
}

/// The shop's local offset (WIB, no daylight saving).
const SHOP_OFFSET: Offset = Offset::constant(7);

/// A calendar date written as `2025-03-01`, `2025-03-01 08:00:00` or an
/// RFC 3339 timestamp. A UTC timestamp is read as the shop's local date, so
/// `2025-02-28T17:00:00Z` is 1 March.
pub(crate) fn parse_date(value: &str) -> Option<Date> {
    let value = value.trim();

    if value.ends_with(['Z', 'z'])
        && let Ok(timestamp) = value.parse::<Timestamp>()
    {
        return Some(timestamp.to_zoned(TimeZone::fixed(SHOP_OFFSET)).date());
    }

    value.get(..10)?.parse().ok()
}

pub(crate) fn date_from_any<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date {raw:?}")))
}
