//! Download URL signing.
//!
//! The storage service hands out a lease (host, path, timestamp and a
//! partial signature). The final download URL embeds a key derived from the
//! lease and a shared secret:
//!
//! ```text
//! key = hex(md5(SECRET + normalize(path[1..] + s)))
//! url = http://{host}/get-mp3/{key}/{ts}{path}
//! ```
//!
//! The key input must match the server byte for byte. A wrong byte does not
//! produce an error from the backend, only a rejected download.

use std::borrow::Cow;

use md5::{Digest, Md5};
use tracing::debug;

use crate::error::{Result, YandexError};
use crate::models::DownloadLease;
use crate::protocol::{DOWNLOAD_PATH_PREFIX, DOWNLOAD_SCHEME, PATH_SEPARATOR, SIGNING_SECRET};

/// Compute MD5 hash of a string and return as lowercase hex string.
pub fn md5_hex(data: &str) -> String {
    md5_hex_bytes(data.as_bytes())
}

/// Compute MD5 hash of bytes and return as lowercase hex string.
pub fn md5_hex_bytes(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Replace every CRLF pair with a bare LF.
///
/// Lone CR characters are kept.
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if input.contains("\r\n") {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Derive the download key for the given signing material.
///
/// `material` is the lease path without its leading `/`, followed by the
/// partial signature.
pub fn download_key(material: &str) -> String {
    let material = normalize_line_endings(material);
    let mut input = String::with_capacity(SIGNING_SECRET.len() + material.len());
    input.push_str(SIGNING_SECRET);
    input.push_str(&material);
    md5_hex(&input)
}

/// Assemble the final download URL.
///
/// `path` is the original lease path, leading `/` included.
pub fn build_download_url(host: &str, key: &str, timestamp: &str, path: &str) -> String {
    format!(
        "{}://{}{}{}/{}{}",
        DOWNLOAD_SCHEME, host, DOWNLOAD_PATH_PREFIX, key, timestamp, path
    )
}

/// Sign a lease and build the download URL.
///
/// # Errors
///
/// Returns `ContractViolation` if the lease path does not start with `/`
/// or the host is empty.
pub fn sign_and_build_url(lease: &DownloadLease) -> Result<String> {
    let stripped = lease.path.strip_prefix(PATH_SEPARATOR).ok_or_else(|| {
        YandexError::ContractViolation(format!(
            "lease path {:?} does not start with {:?}",
            lease.path, PATH_SEPARATOR
        ))
    })?;

    if lease.host.is_empty() {
        return Err(YandexError::ContractViolation(
            "lease host is empty".to_string(),
        ));
    }

    let mut material = String::with_capacity(stripped.len() + lease.partial_signature.len());
    material.push_str(stripped);
    material.push_str(&lease.partial_signature);

    let key = download_key(&material);
    debug!("Signed lease for host {}", lease.host);

    Ok(build_download_url(
        &lease.host,
        &key,
        &lease.timestamp,
        &lease.path,
    ))
}
