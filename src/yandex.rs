//! Unified Yandex Music interface.
//!
//! This module ties the catalog and storage clients together and turns
//! tracks into signed download URLs or saved files.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::api::{AlbumQuery, MusicApi, StorageApi};
use crate::config::ClientConfig;
use crate::crypto;
use crate::error::{Result, YandexError};
use crate::models::{
    Album, ArtistResult, DownloadLease, ItemId, SearchResult, SearchType, StorageId, Track,
    TrackResult,
};
use crate::tagging::{self, AudioMetadata};

/// File extension of downloaded audio.
const AUDIO_EXTENSION: &str = ".mp3";

/// Suffix of a download still in progress.
const PARTIAL_EXTENSION: &str = ".part";

/// Result of a single track download.
#[derive(Debug)]
pub struct DownloadResult {
    /// Path to the downloaded file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Track title.
    pub title: String,
    /// Artist name(s).
    pub artist: String,
}

/// Main Yandex Music interface.
///
/// # Example
///
/// ```rust,no_run
/// use yamusic::{ItemId, YandexMusic};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let ym = YandexMusic::new()?;
///
///     let result = ym.get_track(Some(ItemId::new(3542)), ItemId::new(43117)).await?;
///     let url = ym.track_download_url(&result.track).await?;
///     println!("{} - {}: {}", result.track.artists_string(", "), result.track.title, url);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct YandexMusic {
    music_api: MusicApi,
    storage_api: StorageApi,
    client: Client,
    /// Whether to embed metadata tags in downloaded files.
    embed_tags: bool,
    /// Default output directory for downloads.
    output_dir: PathBuf,
}

impl YandexMusic {
    /// Create an instance talking to the production backends.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create an instance routing all requests through a proxy.
    ///
    /// An empty proxy string means a direct connection.
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default().with_proxy(proxy))
    }

    /// Create an instance from a configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = config.http_client()?;

        Ok(Self {
            music_api: MusicApi::with_client(client.clone(), &config),
            storage_api: StorageApi::with_client(client.clone(), &config),
            client,
            embed_tags: true,
            output_dir: PathBuf::from("downloads"),
        })
    }

    /// Enable or disable embedding metadata tags in downloaded files.
    pub fn set_embed_tags(&mut self, embed: bool) {
        self.embed_tags = embed;
    }

    /// Check if metadata tagging is enabled.
    pub fn embed_tags(&self) -> bool {
        self.embed_tags
    }

    /// Set the output directory for downloads.
    ///
    /// Default is "downloads" in the current working directory.
    pub fn set_output_dir<P: AsRef<Path>>(&mut self, path: P) {
        self.output_dir = path.as_ref().to_path_buf();
    }

    /// Get the current output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The catalog client.
    pub fn music_api(&self) -> &MusicApi {
        &self.music_api
    }

    /// The storage client.
    pub fn storage_api(&self) -> &StorageApi {
        &self.storage_api
    }

    // ==================
    // METADATA FETCHING
    // ==================

    /// Search the catalog.
    pub async fn search(
        &self,
        text: &str,
        search_type: SearchType,
        lang: &str,
    ) -> Result<SearchResult> {
        self.music_api.search(text, search_type, lang).await
    }

    /// Get an album by id.
    pub async fn get_album(&self, album_id: ItemId) -> Result<Album> {
        self.music_api.get_album(AlbumQuery::album(album_id)).await
    }

    /// Get the album containing a track.
    pub async fn get_album_by_track(&self, track_id: ItemId) -> Result<Album> {
        self.music_api.get_album(AlbumQuery::by_track(track_id)).await
    }

    /// Get a track page. The album id is looked up when not given.
    pub async fn get_track(
        &self,
        album_id: Option<ItemId>,
        track_id: ItemId,
    ) -> Result<TrackResult> {
        self.music_api.get_track(album_id, track_id).await
    }

    /// Get an artist page, optionally a specific tab.
    pub async fn get_artist(
        &self,
        artist_id: ItemId,
        what: Option<&str>,
    ) -> Result<ArtistResult> {
        self.music_api.get_artist(artist_id, what).await
    }

    // ==================
    // URL RESOLUTION
    // ==================

    /// Fetch the download lease for a storage id.
    pub async fn fetch_lease(&self, storage_id: &StorageId) -> Result<DownloadLease> {
        self.storage_api.fetch_lease(storage_id).await
    }

    /// Resolve a storage id into a signed download URL.
    ///
    /// The URL is short-lived. Nothing is cached: every call fetches a
    /// fresh lease.
    pub async fn resolve_download_url(&self, storage_id: &StorageId) -> Result<String> {
        let lease = self.storage_api.fetch_lease(storage_id).await?;
        let url = crypto::sign_and_build_url(&lease)?;
        debug!("Resolved {} to {}", storage_id, url);
        Ok(url)
    }

    /// Resolve the download URL of a track.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the track has no storage directory.
    pub async fn track_download_url(&self, track: &Track) -> Result<String> {
        let storage_id = track.storage_id().ok_or_else(|| {
            YandexError::NotFound(format!("Track {} has no storage directory", track.id))
        })?;
        self.resolve_download_url(&storage_id).await
    }

    // ==================
    // DOWNLOADING
    // ==================

    /// Download a track to the default output directory.
    pub async fn download_track(&self, track: &Track) -> Result<DownloadResult> {
        self.download_track_to(track, &self.output_dir).await
    }

    /// Download a track to a specific directory.
    ///
    /// The file is named `<artists> - <title>.mp3`.
    pub async fn download_track_to<P: AsRef<Path>>(
        &self,
        track: &Track,
        output_dir: P,
    ) -> Result<DownloadResult> {
        let output_dir = output_dir.as_ref();
        let url = self.track_download_url(track).await?;
        tokio::fs::create_dir_all(output_dir).await?;

        let artist = track.artists_string(", ");
        let title = track.title.clone();
        let filename = format!(
            "{} - {}{}",
            sanitize_filename(&artist),
            sanitize_filename(&title),
            AUDIO_EXTENSION
        );
        let output_path = output_dir.join(&filename);

        let written = self.save_url(&url, &output_path).await?;
        info!("Downloaded {} ({} bytes)", output_path.display(), written);

        if self.embed_tags {
            let mut metadata = AudioMetadata::from_track(track);

            if let Some(cover) = track
                .album()
                .and_then(|a| a.cover_url(tagging::COVER_SIZE))
            {
                if let Some(bytes) = tagging::fetch_cover_art(&self.client, &cover).await {
                    metadata = metadata.with_cover_art(bytes);
                }
            }

            tagging::write_metadata(&output_path, &metadata)?;
        }

        let size = tokio::fs::metadata(&output_path).await?.len();

        Ok(DownloadResult {
            path: output_path,
            size,
            title,
            artist,
        })
    }

    /// Download a URL to `output_path`, returning the number of bytes written.
    ///
    /// Data goes to a sibling `.part` file that is renamed into place once
    /// the body is complete. On failure the partial file is removed.
    async fn save_url(&self, url: &str, output_path: &Path) -> Result<u64> {
        let part_path = partial_path(output_path);

        match self.stream_to_file(url, &part_path).await {
            Ok(written) => {
                tokio::fs::rename(&part_path, output_path).await?;
                Ok(written)
            }
            Err(e) => {
                if let Err(rm) = tokio::fs::remove_file(&part_path).await {
                    if rm.kind() != std::io::ErrorKind::NotFound {
                        warn!("Could not remove {}: {}", part_path.display(), rm);
                    }
                }
                Err(e)
            }
        }
    }

    async fn stream_to_file(&self, url: &str, path: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let mut file = File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk: Bytes = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(PARTIAL_EXTENSION);
    PathBuf::from(name)
}

/// Sanitize a string for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
        .trim()
        .to_string()
}
