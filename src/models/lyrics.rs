//! Lyrics models.

use serde::{Deserialize, Serialize};

use super::common::ItemId;

/// Lyrics attached to a track or album page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lyrics {
    /// Lyrics id.
    pub id: ItemId,

    /// Preview text.
    #[serde(default)]
    pub lyrics: String,

    /// Full text.
    #[serde(default)]
    pub full_lyrics: String,

    /// Whether the text may be shown.
    #[serde(default)]
    pub has_rights: bool,

    /// Language code of the text.
    #[serde(default)]
    pub text_language: String,

    /// Whether a translation is offered.
    #[serde(default)]
    pub show_translation: bool,
}
