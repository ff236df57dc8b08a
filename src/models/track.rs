//! Track-related models.

use serde::{Deserialize, Serialize};

use super::album::Album;
use super::artist::Artist;
use super::common::{ItemId, StorageId};
use super::lyrics::Lyrics;

/// A track record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Track id.
    pub id: ItemId,

    /// Albums this track appears on.
    #[serde(default)]
    pub albums: Vec<Album>,

    /// Storage location of the audio. Empty when the track has no audio.
    #[serde(default)]
    pub storage_dir: String,

    /// Duration in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,

    /// Track title.
    #[serde(default)]
    pub title: String,

    /// Regions the track is licensed in.
    #[serde(default)]
    pub regions: Vec<String>,

    /// Whether the track can be played.
    #[serde(default)]
    pub available: bool,

    /// Whether the track is available as a ringback tone.
    #[serde(default)]
    pub available_as_rbt: bool,

    /// Whether the track is available for premium users.
    #[serde(default)]
    pub available_for_premium_users: bool,

    /// Whether the track has explicit content.
    #[serde(default)]
    pub explicit: bool,

    /// Artists who performed this track.
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl Track {
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

    /// Get duration formatted as MM:SS.
    pub fn duration_formatted(&self) -> String {
        let total_seconds = self.duration_ms / 1000;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Storage id of the audio, if the track has one.
    pub fn storage_id(&self) -> Option<StorageId> {
        StorageId::new(self.storage_dir.as_str()).ok()
    }

    /// The first album this track appears on.
    pub fn album(&self) -> Option<&Album> {
        self.albums.first()
    }
}

/// Track page returned by the track handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackResult {
    /// Play counter.
    #[serde(default)]
    pub counter: u64,

    /// Artists of the track, with full records.
    #[serde(default)]
    pub artists: Vec<Artist>,

    /// Alternative titles.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// The track.
    pub track: Track,

    /// Similar tracks.
    #[serde(default)]
    pub similar_tracks: Vec<Track>,

    /// Lyrics for the track.
    #[serde(default)]
    pub lyric: Vec<Lyrics>,
}
