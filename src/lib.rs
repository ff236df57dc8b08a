//! # yamusic
//!
//! A Rust client for the Yandex Music web API: catalog search, track,
//! album and artist metadata, and signed direct-download URLs.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through the [`YandexMusic`] struct:
//!
//! ```rust,no_run
//! use yamusic::{ItemId, SearchType, YandexMusic};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ym = YandexMusic::new()?;
//!
//!     // Search and resolve the first hit
//!     let result = ym.search("M83 - Go!", SearchType::All, "en").await?;
//!     if let Some(track) = result.tracks.items.first() {
//!         println!("{}", ym.track_download_url(track).await?);
//!     }
//!
//!     // Look up a track without knowing its album
//!     let page = ym.get_track(None, ItemId::new(43117)).await?;
//!     let saved = ym.download_track(&page.track).await?;
//!     println!("Downloaded: {}", saved.path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Download URLs
//!
//! Resolving a download URL is a two-step exchange: the storage service
//! issues a lease for the track's storage id ([`StorageApi::fetch_lease`]),
//! and the lease is signed into the final URL
//! ([`crypto::sign_and_build_url`]). URLs expire quickly on the server side
//! and are never cached here.
//!
//! ## Low-Level APIs
//!
//! - [`MusicApi`] - catalog handlers
//! - [`StorageApi`] - download-info leases
//! - [`crypto`] - download key derivation and URL assembly

pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod protocol;
pub mod tagging;
mod yandex;

// Main interface (recommended)
pub use yandex::{DownloadResult, YandexMusic};

// Low-level APIs
pub use api::{AlbumQuery, MusicApi, StorageApi};
pub use config::{ClientConfig, LeaseSuffix};
pub use error::YandexError;
pub use models::{
    Album, Artist, ArtistResult, DownloadLease, ItemId, Lyrics, SearchResult, SearchType,
    StorageId, Track, TrackResult,
};
