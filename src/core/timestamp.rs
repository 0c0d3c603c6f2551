//! Purpose: RFC 3339 timestamp codec used by entity fields via `#[serde(with = ...)]`.
//! Exports: `parse`, `format`, serde `serialize`/`deserialize`, and the `option` submodule.
//! Role: Keeps every wire timestamp on one text format with one failure category.
//! Invariants: Unparseable text fails with `MalformedTimestamp`, never a default instant.
//! Invariants: The original offset is kept, so `Z` inputs encode back as `Z`.
use super::decode::DecodeError;
use serde::{Deserialize, Deserializer, Serializer, de, ser};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn parse(raw: &str) -> Result<OffsetDateTime, DecodeError> {
    OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| DecodeError::malformed_timestamp(raw))
}

pub fn format(value: &OffsetDateTime) -> Result<String, time::error::Format> {
    value.format(&Rfc3339)
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = format(value).map_err(ser::Error::custom)?;
    serializer.serialize_str(&text)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

/// Same codec for optional timestamp fields.
pub mod option {
    use super::{format, parse};
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::OffsetDateTime;

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => {
                let text = format(value).map_err(ser::Error::custom)?;
                serializer.serialize_str(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
