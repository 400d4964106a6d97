//! Timestamp layout shared by storage, display and the HTTP projection.

use chrono::{Local, NaiveDateTime, ParseError};

/// The only layout clerk writes and reads timestamps in.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Current local wall-clock time, as shells pass it to repositories.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
}

/// `#[serde(with = "...")]` adapter for optional timestamps.
pub mod serde_format_opt {
    use super::{format_timestamp, parse_timestamp};
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&format_timestamp(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_timestamp(&raw).map_err(de::Error::custom))
            .transpose()
    }
}
