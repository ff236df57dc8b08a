//! Artist-related models.
//!
//! This module contains the artist record and the artist page returned by
//! the artist handler.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::album::Album;
use super::common::{cover_url, ItemId};
use super::track::Track;
use crate::error::Result;

/// Artist picture descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cover {
    /// Cover kind, e.g. `"from-artist-photos"`.
    #[serde(rename = "type", default)]
    pub type_: String,

    /// Image prefix on the avatars CDN.
    #[serde(default)]
    pub prefix: String,

    /// URI template with a `%%` size placeholder.
    #[serde(default)]
    pub uri: String,
}

/// An artist record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Artist id.
    pub id: ItemId,

    /// Artist name.
    #[serde(default)]
    pub name: String,

    /// Whether the artist is credited as a composer.
    #[serde(default)]
    pub composer: bool,

    /// Whether this is the "various artists" placeholder.
    #[serde(default)]
    pub various: bool,

    /// Artist picture.
    #[serde(default)]
    pub cover: Option<Cover>,

    /// Split credit for joint artists, as sent by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decomposed: Option<Value>,
}

impl Artist {
    /// Create an artist with name and id.
    pub fn new<S: Into<String>>(name: S, id: u64) -> Self {
        Self {
            name: name.into(),
            id: ItemId::new(id),
            ..Default::default()
        }
    }

    /// Artist picture URL at the given size, e.g. `"400x400"`.
    pub fn cover_url(&self, size: &str) -> Option<String> {
        self.cover.as_ref().and_then(|c| cover_url(&c.uri, size))
    }
}

/// Radio availability for an artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Radio {
    /// Whether artist radio can be started.
    #[serde(default)]
    pub available: bool,
}

/// Artist page returned by the artist handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResult {
    /// The artist.
    pub artist: Artist,

    /// Similar artists (short list).
    #[serde(default)]
    pub similar: Vec<Artist>,

    /// Similar artists (full list).
    #[serde(default)]
    pub all_similar: Vec<Artist>,

    /// Albums by this artist.
    #[serde(default)]
    pub albums: Vec<Album>,

    /// Albums the artist appears on.
    #[serde(default)]
    pub also_albums: Vec<Album>,

    /// Popular tracks.
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Ids of all tracks, as decimal strings.
    #[serde(default)]
    pub track_ids: Vec<String>,

    /// Playlists featuring the artist.
    #[serde(default)]
    pub playlists: Vec<Value>,

    /// Playlist ids.
    #[serde(default)]
    pub playlist_ids: Vec<Value>,

    /// Whether the page carries promotions.
    #[serde(default)]
    pub has_promotions: bool,

    /// Number of likes.
    #[serde(default)]
    pub likes_count: u64,

    /// Whether the request was redirected to another artist.
    #[serde(default)]
    pub redirected: bool,

    /// Radio availability.
    #[serde(default)]
    pub radio: Radio,
}

impl ArtistResult {
    /// Parse all track ids. Fails on the first malformed entry.
    pub fn track_ids(&self) -> Result<Vec<ItemId>> {
        self.track_ids.iter().map(|id| id.parse()).collect()
    }
}
