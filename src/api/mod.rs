//! API clients for Yandex Music.
//!
//! This module provides two API clients:
//! - [`MusicApi`]: catalog handlers (search, track, album, artist)
//! - [`StorageApi`]: download-info service issuing download leases

pub mod music;
pub mod storage;

pub use music::{AlbumQuery, MusicApi};
pub use storage::StorageApi;
