//! Wire constants of the Yandex Music backends.
//!
//! Everything the download signature depends on lives here so the exact
//! byte contract can be audited in one place.

/// Base URL of the JSON handlers.
pub const API_BASE_URL: &str = "https://music.yandex.ru";

/// Value of the `external-domain` query parameter sent with searches.
pub const EXTERNAL_DOMAIN: &str = "music.yandex.ru";

/// Base URL of the storage metadata (download-info) service.
///
/// The storage id is appended directly, followed by the lease suffix.
pub const STORAGE_BASE_URL: &str = "http://storage.mds.yandex.net/download-info/";

/// Lease suffix used by the current backend generation.
pub const DEFAULT_LEASE_SUFFIX: &str = "/2";

/// Lease suffix used by the older backend generation.
pub const MP3_LEASE_SUFFIX: &str = "/2.mp3";

/// Shared secret prepended to the signing material.
pub const SIGNING_SECRET: &str = "XGRlBW9FXlekgbPrRHuSiA";

/// Scheme of the final download URL.
pub const DOWNLOAD_SCHEME: &str = "http";

/// Path prefix of the final download URL, before the hex key.
pub const DOWNLOAD_PATH_PREFIX: &str = "/get-mp3/";

/// Separator every lease path starts with.
pub const PATH_SEPARATOR: char = '/';

/// Placeholder for the image size inside cover URIs.
pub const COVER_SIZE_PLACEHOLDER: &str = "%%";

/// Browser user agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
