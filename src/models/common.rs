//! Common types shared across all models.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, YandexError};
use crate::protocol;

/// Catalog identifier of a track, album, artist or lyrics record.
///
/// The handlers send ids either as JSON numbers or as decimal strings.
/// Both forms decode into the same value; anything else is a decode error.
/// Surrounding whitespace in the string form is ignored, as in [`FromStr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw numeric id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = YandexError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| YandexError::InvalidId(format!("{:?}: {}", s, e)))
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

struct ItemIdVisitor;

impl<'de> Visitor<'de> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ItemId, E> {
        Ok(ItemId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ItemId, E> {
        u64::try_from(v)
            .map(ItemId)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<ItemId, E> {
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 {
            Ok(ItemId(v as u64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ItemId, E> {
        v.trim()
            .parse::<u64>()
            .map(ItemId)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// Location of a track's audio in the storage service.
///
/// Taken from the `storageDir` field of a track, e.g. `"12345/abcde67890"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageId(String);

impl StorageId {
    /// Create a storage id. Empty strings are rejected.
    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(YandexError::InvalidId("empty storage id".to_string()));
        }
        Ok(Self(id))
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StorageId {
    type Err = YandexError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Expand a cover URI template into a fetchable URL.
///
/// Cover URIs come without a scheme and with `%%` standing for the size,
/// e.g. `avatars.yandex.net/get-music-content/x/%%`.
pub fn cover_url(cover_uri: &str, size: &str) -> Option<String> {
    if cover_uri.is_empty() {
        return None;
    }
    Some(format!(
        "https://{}",
        cover_uri.replace(protocol::COVER_SIZE_PLACEHOLDER, size)
    ))
}
