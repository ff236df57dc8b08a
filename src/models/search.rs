//! Search models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::album::Album;
use super::artist::Artist;
use super::track::Track;

/// What kind of records a search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    /// Everything.
    #[default]
    All,
    /// Tracks only.
    Tracks,
    /// Albums only.
    Albums,
    /// Playlists only.
    Playlists,
    /// Artists only.
    Artists,
}

impl SearchType {
    /// Value of the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::Tracks => "tracks",
            SearchType::Albums => "albums",
            SearchType::Playlists => "playlists",
            SearchType::Artists => "artists",
        }
    }
}

/// One page of search hits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    /// Total number of hits.
    #[serde(default)]
    pub total: u32,

    /// Page size.
    #[serde(default)]
    pub per_page: u32,

    /// Hits on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for SearchPage<T> {
    fn default() -> Self {
        Self {
            total: 0,
            per_page: 0,
            items: Vec::new(),
        }
    }
}

/// Result of the search handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The query as understood by the backend.
    #[serde(default)]
    pub text: String,

    /// Matching tracks.
    #[serde(default)]
    pub tracks: SearchPage<Track>,

    /// Matching albums.
    #[serde(default)]
    pub albums: SearchPage<Album>,

    /// Matching artists.
    #[serde(default)]
    pub artists: SearchPage<Artist>,

    /// Matching playlists, undecoded.
    #[serde(default)]
    pub playlists: Value,

    /// Best match, undecoded.
    #[serde(default)]
    pub best: Value,

    /// Matching videos, undecoded.
    #[serde(default)]
    pub videos: Value,
}
