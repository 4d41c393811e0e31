//! Read-only serde adapter: `#[serde(with = "time_interval::serde_interval")]`

use crate::{error::Error, interval::TimeInterval};
use serde::{de, ser, Deserialize, Deserializer, Serializer};
use std::time::Duration;

pub fn serialize<S>(_duration: &Duration, _serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Err(ser::Error::custom(Error::Unsupported))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?.ok_or(Error::NullInput);
    token
        .and_then(|token| TimeInterval::parse(&token))
        .map_err(de::Error::custom)
}

/// Same as the parent module for `Option<Duration>` fields, `null` is `None`.
pub mod option {
    use super::*;

    pub fn serialize<S>(_duration: &Option<Duration>, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Err(ser::Error::custom(Error::Unsupported))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|token| TimeInterval::parse(&token).map_err(de::Error::custom))
            .transpose()
    }
}
