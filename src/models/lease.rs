//! Download lease returned by the storage service.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where and how to fetch a track's audio.
///
/// Decoded from the download-info XML document:
///
/// ```xml
/// <download-info>
///   <host>s123vla.storage.yandex.net</host>
///   <path>/rmusic/U2FsdGVk...</path>
///   <ts>0005d1a2b3c4d5e6</ts>
///   <region>-1</region>
///   <s>7f2c...</s>
/// </download-info>
/// ```
///
/// Elements other than `host`, `path`, `ts` and `s` are ignored. Leading
/// and trailing whitespace inside each element is trimmed on decode, so
/// `<ts> 1 </ts>` yields `"1"`; the values are otherwise kept byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLease {
    /// Authority to hit for the final download.
    pub host: String,

    /// Audio path, starting with `/`.
    pub path: String,

    /// Opaque token echoed back verbatim in the final URL.
    #[serde(rename = "ts")]
    pub timestamp: String,

    /// Server-issued partial signature.
    #[serde(rename = "s")]
    pub partial_signature: String,
}

impl DownloadLease {
    /// Decode a lease from the download-info XML body.
    pub fn from_xml(body: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(body)?)
    }
}
