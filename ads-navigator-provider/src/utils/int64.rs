//! int64 serialization helpers
//!
//! Proto3 JSON encodes 64-bit integers as strings (`"clicks": "42"`), while
//! hand-written fixtures and some proxies emit plain numbers. Both are accepted
//! on input; output always uses the string form.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Int64Repr {
    String(String),
    I64(i64),
}

fn to_i64<E: serde::de::Error>(repr: Int64Repr) -> Result<i64, E> {
    match repr {
        Int64Repr::I64(v) => Ok(v),
        Int64Repr::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| E::custom(format!("Invalid int64 value '{s}': {e}"))),
    }
}

/// `i64` fields that default to zero when absent.
pub mod required {
    use super::{Deserialize, Deserializer, Int64Repr, Serializer, to_i64};

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        to_i64(Int64Repr::deserialize(deserializer)?)
    }
}

/// `Option<i64>` fields.
pub mod option {
    use super::{Deserialize, Deserializer, Int64Repr, Serializer, to_i64};

    pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Int64Repr>::deserialize(deserializer)?
            .map(to_i64)
            .transpose()
    }
}
