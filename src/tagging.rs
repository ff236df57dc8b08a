//! Audio metadata tagging utilities.
//!
//! This module embeds metadata (title, artists, album, cover art) into
//! downloaded audio files.

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::Track;

/// Size requested when fetching cover art.
pub const COVER_SIZE: &str = "1000x1000";

/// Metadata to embed in audio files.
#[derive(Debug, Clone, Default)]
pub struct AudioMetadata {
    /// Track title.
    pub title: Option<String>,
    /// Track artist(s).
    pub artist: Option<String>,
    /// Album title.
    pub album: Option<String>,
    /// Album artist(s).
    pub album_artist: Option<String>,
    /// Track number.
    pub track_number: Option<u32>,
    /// Total tracks in album.
    pub total_tracks: Option<u32>,
    /// Disc number.
    pub disc_number: Option<u32>,
    /// Release year.
    pub year: Option<i32>,
    /// Genre.
    pub genre: Option<String>,
    /// Cover art bytes.
    pub cover_art: Option<Vec<u8>>,
}

impl AudioMetadata {
    /// Create new empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect what a track record knows about itself and its first album.
    pub fn from_track(track: &Track) -> Self {
        let mut meta = Self::new()
            .with_title(&track.title)
            .with_artist(track.artists_string(", "));

        if let Some(album) = track.album() {
            meta = meta
                .with_album(&album.title)
                .with_album_artist(album.artists_string(", "));

            if let Some(position) = album.track_position {
                let total = (album.track_count > 0).then_some(album.track_count);
                meta = meta.with_track(position.index, total);
                meta.disc_number = Some(position.volume);
            }
            if let Some(year) = album.release_year() {
                meta = meta.with_year(year);
            }
            if !album.genre.is_empty() {
                meta = meta.with_genre(&album.genre);
            }
        }

        meta
    }

    /// Set title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set artist.
    pub fn with_artist<S: Into<String>>(mut self, artist: S) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set album.
    pub fn with_album<S: Into<String>>(mut self, album: S) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set album artist.
    pub fn with_album_artist<S: Into<String>>(mut self, album_artist: S) -> Self {
        self.album_artist = Some(album_artist.into());
        self
    }

    /// Set track number and total.
    pub fn with_track(mut self, number: u32, total: Option<u32>) -> Self {
        self.track_number = Some(number);
        self.total_tracks = total;
        self
    }

    /// Set year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set genre.
    pub fn with_genre<S: Into<String>>(mut self, genre: S) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set cover art.
    pub fn with_cover_art(mut self, cover: Vec<u8>) -> Self {
        self.cover_art = Some(cover);
        self
    }
}

/// Write metadata to an audio file.
///
/// Unreadable files and failed saves are logged and skipped; tagging never
/// fails a download.
pub fn write_metadata<P: AsRef<Path>>(path: P, metadata: &AudioMetadata) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing metadata to: {}", path.display());

    let mut tagged_file = match lofty::read_from_path(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Could not read file for tagging: {}", e);
            return Ok(());
        }
    };

    if tagged_file.primary_tag().is_none() {
        let tag_type = tagged_file.primary_tag_type();
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let Some(tag) = tagged_file.primary_tag_mut() else {
        warn!("No writable tag for {}", path.display());
        return Ok(());
    };

    if let Some(title) = &metadata.title {
        tag.set_title(title.clone());
    }

    if let Some(artist) = &metadata.artist {
        tag.set_artist(artist.clone());
    }

    if let Some(album) = &metadata.album {
        tag.set_album(album.clone());
    }

    if let Some(album_artist) = &metadata.album_artist {
        tag.insert_text(ItemKey::AlbumArtist, album_artist.clone());
    }

    if let Some(track) = metadata.track_number {
        tag.set_track(track);
    }

    if let Some(total) = metadata.total_tracks {
        tag.set_track_total(total);
    }

    if let Some(disc) = metadata.disc_number {
        tag.set_disk(disc);
    }

    if let Some(year) = metadata.year.filter(|y| *y > 0) {
        tag.set_year(year as u32);
    }

    if let Some(genre) = &metadata.genre {
        tag.set_genre(genre.clone());
    }

    if let Some(cover_data) = &metadata.cover_art {
        let mime_type = if cover_data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            MimeType::Png
        } else {
            MimeType::Jpeg
        };

        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(mime_type),
            None,
            cover_data.clone(),
        ));
    }

    if let Err(e) = tag.save_to_path(path, WriteOptions::default()) {
        warn!("Failed to save tags to {}: {}", path.display(), e);
    } else {
        debug!("Successfully wrote metadata to {}", path.display());
    }

    Ok(())
}

/// Fetch cover art bytes. Returns `None` on any failure.
pub async fn fetch_cover_art(client: &Client, cover_url: &str) -> Option<Vec<u8>> {
    let response = match client.get(cover_url).send().await {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            warn!("Cover art request returned {}", r.status());
            return None;
        }
        Err(e) => {
            warn!("Could not fetch cover art: {}", e);
            return None;
        }
    };

    response
        .bytes()
        .await
        .ok()
        .filter(|b| !b.is_empty())
        .map(|b| b.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Album, Artist, TrackPosition};

    #[test]
    fn test_metadata_builder() {
        let meta = AudioMetadata::new()
            .with_title("Test Song")
            .with_artist("Test Artist")
            .with_album("Test Album")
            .with_track(1, Some(10))
            .with_year(2024);

        assert_eq!(meta.title, Some("Test Song".to_string()));
        assert_eq!(meta.artist, Some("Test Artist".to_string()));
        assert_eq!(meta.album, Some("Test Album".to_string()));
        assert_eq!(meta.track_number, Some(1));
        assert_eq!(meta.total_tracks, Some(10));
        assert_eq!(meta.year, Some(2024));
    }

    #[test]
    fn test_metadata_from_track() {
        let track = Track {
            title: "Midnight City".to_string(),
            artists: vec![Artist::new("M83", 711232)],
            albums: vec![Album {
                title: "Hurry Up, We're Dreaming".to_string(),
                artists: vec![Artist::new("M83", 711232)],
                track_count: 22,
                year: Some(2011),
                genre: "electronics".to_string(),
                track_position: Some(TrackPosition {
                    volume: 1,
                    index: 2,
                }),
                ..Default::default()
            }],
            ..Default::default()
        };

        let meta = AudioMetadata::from_track(&track);
        assert_eq!(meta.title.as_deref(), Some("Midnight City"));
        assert_eq!(meta.artist.as_deref(), Some("M83"));
        assert_eq!(meta.album.as_deref(), Some("Hurry Up, We're Dreaming"));
        assert_eq!(meta.track_number, Some(2));
        assert_eq!(meta.total_tracks, Some(22));
        assert_eq!(meta.disc_number, Some(1));
        assert_eq!(meta.year, Some(2011));
        assert_eq!(meta.genre.as_deref(), Some("electronics"));
    }

    #[test]
    fn test_metadata_from_track_without_album() {
        let track = Track {
            title: "Loose".to_string(),
            ..Default::default()
        };
        let meta = AudioMetadata::from_track(&track);
        assert_eq!(meta.title.as_deref(), Some("Loose"));
        assert!(meta.album.is_none());
        assert!(meta.track_number.is_none());
    }

    #[test]
    fn test_write_metadata_skips_unreadable_file() {
        let path = std::env::temp_dir().join(format!(
            "yamusic_tagging_not_audio_{}.mp3",
            std::process::id()
        ));
        std::fs::write(&path, b"definitely not audio").unwrap();

        let result = write_metadata(&path, &AudioMetadata::new().with_title("x"));
        assert!(result.is_ok());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_fetch_cover_art() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cover/1000x1000"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFFu8, 0xD8, 0xFF]))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        let cover = fetch_cover_art(&client, &format!("{}/cover/1000x1000", server.uri())).await;
        assert_eq!(cover, Some(vec![0xFF, 0xD8, 0xFF]));

        let missing = fetch_cover_art(&client, &format!("{}/missing", server.uri())).await;
        assert!(missing.is_none());
    }
}
