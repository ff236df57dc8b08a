//! Data models for Yandex Music responses.
//!
//! This module contains the catalog records decoded from the JSON
//! handlers and the download lease decoded from the storage service.

pub mod album;
pub mod artist;
pub mod common;
pub mod lease;
pub mod lyrics;
pub mod search;
pub mod track;

// Re-exports for convenience
pub use album::{Album, TrackPosition};
pub use artist::{Artist, ArtistResult, Cover};
pub use common::{ItemId, StorageId};
pub use lease::DownloadLease;
pub use lyrics::Lyrics;
pub use search::{SearchPage, SearchResult, SearchType};
pub use track::{Track, TrackResult};
