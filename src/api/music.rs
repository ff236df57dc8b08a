//! Catalog client for the Yandex Music web handlers.
//!
//! This module provides a client for the JSON handlers served under
//! `music.yandex.ru/handlers/`. No authentication is required.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{Result, YandexError};
use crate::models::{Album, ArtistResult, ItemId, SearchResult, SearchType, TrackResult};
use crate::protocol::EXTERNAL_DOMAIN;

const SEARCH_HANDLER: &str = "/handlers/music-search.jsx";
const ALBUM_HANDLER: &str = "/handlers/album.jsx";
const TRACK_HANDLER: &str = "/handlers/track.jsx";
const ARTIST_HANDLER: &str = "/handlers/artist.jsx";

/// Selects an album either directly or through one of its tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlbumQuery {
    /// Album id.
    pub album: Option<ItemId>,
    /// Id of a track on the album.
    pub by_track: Option<ItemId>,
}

impl AlbumQuery {
    /// Look up an album by its id.
    pub fn album(id: ItemId) -> Self {
        Self {
            album: Some(id),
            by_track: None,
        }
    }

    /// Look up the album containing a track.
    pub fn by_track(track_id: ItemId) -> Self {
        Self {
            album: None,
            by_track: Some(track_id),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(album) = self.album {
            params.push(("album", album.to_string()));
        }
        if let Some(track) = self.by_track {
            params.push(("byTrack", track.to_string()));
        }
        params
    }
}

/// Catalog client.
///
/// Provides search and track, album and artist lookups.
///
/// # Example
///
/// ```rust,no_run
/// use yamusic::{ItemId, MusicApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = MusicApi::new()?;
///     let result = api.get_track(Some(ItemId::new(3542)), ItemId::new(43117)).await?;
///     println!("Track: {} by {}", result.track.title, result.track.artists_string(", "));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MusicApi {
    client: Client,
    base_url: String,
}

impl MusicApi {
    /// Create a client for the production backend.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client from a configuration.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_client(config.http_client()?, config))
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request to a handler and decode the response.
    async fn get_handler<T: DeserializeOwned>(
        &self,
        handler: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, handler);
        debug!("GET {} with params: {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .query(params)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(YandexError::NotFound(format!("{} {:?}", handler, params)));
        }

        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text)?;

        // The handlers report failures in-band
        if let Some(message) = data.get("message").and_then(|m| m.as_str()) {
            if !message.is_empty() {
                error!("Yandex Music API error: {}", message);
                return Err(YandexError::ApiError(message.to_string()));
            }
        }

        Ok(serde_json::from_value(data)?)
    }

    /// Search the catalog.
    ///
    /// `lang` is the interface language, e.g. `"en"` or `"ru"`.
    pub async fn search(
        &self,
        text: &str,
        search_type: SearchType,
        lang: &str,
    ) -> Result<SearchResult> {
        self.get_handler(
            SEARCH_HANDLER,
            &[
                ("text", text.to_string()),
                ("type", search_type.as_str().to_string()),
                ("lang", lang.to_string()),
                ("external-domain", EXTERNAL_DOMAIN.to_string()),
            ],
        )
        .await
    }

    /// Get an album, including its tracklist.
    pub async fn get_album(&self, query: AlbumQuery) -> Result<Album> {
        let params = query.params();
        if params.is_empty() {
            return Err(YandexError::InvalidId(
                "album query needs an album or track id".to_string(),
            ));
        }
        self.get_handler(ALBUM_HANDLER, &params).await
    }

    /// Get a track page.
    ///
    /// The handler addresses tracks as `track:album`. Without an album id
    /// the album is looked up through the track first.
    pub async fn get_track(
        &self,
        album_id: Option<ItemId>,
        track_id: ItemId,
    ) -> Result<TrackResult> {
        let album_id = match album_id {
            Some(id) => id,
            None => {
                let album = self.get_album(AlbumQuery::by_track(track_id)).await?;
                debug!("Track {} belongs to album {}", track_id, album.id);
                album.id
            }
        };

        self.get_handler(
            TRACK_HANDLER,
            &[("track", format!("{}:{}", track_id, album_id))],
        )
        .await
    }

    /// Get an artist page.
    ///
    /// `what` selects a tab of the page, e.g. `"tracks"` or `"albums"`.
    pub async fn get_artist(
        &self,
        artist_id: ItemId,
        what: Option<&str>,
    ) -> Result<ArtistResult> {
        let mut params = vec![("artist", artist_id.to_string())];
        if let Some(what) = what.filter(|w| !w.is_empty()) {
            params.push(("what", what.to_string()));
        }
        self.get_handler(ARTIST_HANDLER, &params).await
    }
}
