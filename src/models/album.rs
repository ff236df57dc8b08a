//! Album-related models.

use serde::{Deserialize, Serialize};

use super::artist::Artist;
use super::common::{cover_url, ItemId};
use super::lyrics::Lyrics;
use super::track::Track;

/// Position of a track inside an album.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackPosition {
    /// Volume (disc) number, 1-indexed.
    #[serde(default)]
    pub volume: u32,

    /// Index on the volume, 1-indexed.
    #[serde(default)]
    pub index: u32,
}

/// An album record.
///
/// When fetched through the album handler, `volumes` holds the full
/// tracklist, one inner list per disc.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Album id.
    pub id: ItemId,

    /// Storage directory of the album.
    #[serde(default)]
    pub storage_dir: String,

    /// Year of original release.
    #[serde(default)]
    pub original_release_year: Option<i32>,

    /// Whether the album can be played.
    #[serde(default)]
    pub available: bool,

    /// Whether the album is available for premium users.
    #[serde(default)]
    pub available_for_premium_users: bool,

    /// Album title.
    #[serde(default)]
    pub title: String,

    /// Release year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Album artists.
    #[serde(default)]
    pub artists: Vec<Artist>,

    /// Cover URI template with a `%%` size placeholder.
    #[serde(default)]
    pub cover_uri: String,

    /// Total number of tracks.
    #[serde(default)]
    pub track_count: u32,

    /// Genre slug.
    #[serde(default)]
    pub genre: String,

    /// Position of the requested track, when looked up by track.
    #[serde(default)]
    pub track_position: Option<TrackPosition>,

    /// Tracklist grouped by volume.
    #[serde(default)]
    pub volumes: Vec<Vec<Track>>,

    /// Lyrics attached to the album page.
    #[serde(default)]
    pub lyric: Vec<Lyrics>,
}

impl Album {
    /// Get the primary artist name.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }

    /// Get all artist names joined by a separator.
    pub fn artists_string(&self, separator: &str) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Iterate over every track of every volume.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.volumes.iter().flatten()
    }

    /// Get tracks for a specific volume (1-indexed).
    pub fn tracks_for_volume(&self, volume: usize) -> &[Track] {
        volume
            .checked_sub(1)
            .and_then(|i| self.volumes.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Cover URL at the given size, e.g. `"400x400"`.
    pub fn cover_url(&self, size: &str) -> Option<String> {
        cover_url(&self.cover_uri, size)
    }

    /// Release year, falling back to the original release year.
    pub fn release_year(&self) -> Option<i32> {
        self.year.or(self.original_release_year)
    }
}
