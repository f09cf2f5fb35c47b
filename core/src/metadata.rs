//! Per-video metadata document model.
//!
//! Each video's annotations live in one JSON document with a `tags` field
//! and, when the offline detection pass has run, a `boxes` presence frame
//! array. The document is replaced wholesale on save; unknown keys survive
//! the round trip.

use crate::sequencing::presence::PresenceFrames;
use filmroom_types::Tag;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxes: Option<PresenceFrames>,

    /// Keys this crate does not model (render settings, notes, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VideoMetadata {
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        Self {
            tags,
            ..Default::default()
        }
    }

    /// A copy of this document with `proposed` appended to the tag
    /// collection. No de-duplication is performed; the receiver owns that
    /// decision. The original document is untouched.
    pub fn with_appended_tags(&self, proposed: &[Tag]) -> Self {
        let mut merged = self.clone();
        merged.tags.extend_from_slice(proposed);
        merged
    }
}
