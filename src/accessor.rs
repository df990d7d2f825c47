//! Typed reads out of an untyped user info mapping.
//!
//! Every decode path goes through [`get`]. A missing key and a value of the
//! wrong shape are indistinguishable to the caller: both read as `None`,
//! so peers that disagree on schema degrade instead of failing.

use serde_json::{Map, Value};
use url::Url;

/// A shape that can be read out of a [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

/// Read `key` from `map` as `T`, or `None` if it is absent or not a `T`.
pub fn get<T: FromValue>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?;
    let typed = T::from_value(value);
    if typed.is_none() {
        log::trace!(
            "value for key {} has unexpected shape, treating as absent",
            key
        );
    }
    typed
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for Url {
    fn from_value(value: &Value) -> Option<Self> {
        Url::parse(value.as_str()?).ok()
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_u64(),
            Value::String(digits) => digits.parse().ok(),
            _ => None,
        }
    }
}

/// Arrays read as `Vec<String>` only when every element is a string.
impl FromValue for Vec<String> {
    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(String::from_value)
            .collect()
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl FromValue for Map<String, Value> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}
