//! Value encoding used between typed callers and the string store.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CacheError, Result};

/// Encodes values of `T` to the string form persisted in the store.
pub trait Serializer<T>: Send + Sync {
    fn serialize(&self, value: &T) -> Result<String>;
    fn deserialize(&self, raw: &str) -> Result<T>;
}

// == JSON ==
/// Default serializer: `serde_json` text.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl<T> Serializer<T> for JsonSerializer
where
    T: Serialize + DeserializeOwned,
{
    fn serialize(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize(&self, raw: &str) -> Result<T> {
        Ok(serde_json::from_str(raw)?)
    }
}

// == Plain Text ==
/// Stores strings verbatim, without JSON quoting.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSerializer;

impl Serializer<String> for TextSerializer {
    fn serialize(&self, value: &String) -> Result<String> {
        Ok(value.clone())
    }

    fn deserialize(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }
}

// == Function Adapter ==
/// Serializer built from a pair of functions, for ad-hoc encodings.
pub struct FnSerializer<T, E, D> {
    encode: E,
    decode: D,
    _marker: PhantomData<fn() -> T>,
}

impl<T, E, D> FnSerializer<T, E, D>
where
    E: Fn(&T) -> Option<String>,
    D: Fn(&str) -> Option<T>,
{
    pub fn new(encode: E, decode: D) -> Self {
        Self {
            encode,
            decode,
            _marker: PhantomData,
        }
    }
}

impl<T, E, D> Serializer<T> for FnSerializer<T, E, D>
where
    E: Fn(&T) -> Option<String> + Send + Sync,
    D: Fn(&str) -> Option<T> + Send + Sync,
{
    fn serialize(&self, value: &T) -> Result<String> {
        (self.encode)(value)
            .ok_or_else(|| CacheError::Serialization("encoder rejected value".to_string()))
    }

    fn deserialize(&self, raw: &str) -> Result<T> {
        (self.decode)(raw)
            .ok_or_else(|| CacheError::Serialization("decoder rejected payload".to_string()))
    }
}
