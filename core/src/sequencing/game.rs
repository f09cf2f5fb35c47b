//! Game boundary detection.
//!
//! Splits a film into games using exact `game_start` / `game_end` pairs,
//! numbering games in frame order.

use super::matcher::find_valid_sequences;
use filmroom_types::{Tag, TagMetadata};

pub const GAME_START_TAG: &str = "game_start";
pub const GAME_END_TAG: &str = "game_end";

/// One detected game on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSequence {
    pub start_frame: i64,
    pub end_frame: i64,
    /// 1-based index in frame order.
    pub game_number: u32,
    /// Length in frames.
    pub duration: i64,
}

impl GameSequence {
    /// Persistable `game` interval tag.
    pub fn into_tag(self) -> Tag {
        Tag {
            name: "game".to_string(),
            start_frame: Some(self.start_frame),
            end_frame: Some(self.end_frame),
            metadata: Some(TagMetadata {
                game_number: Some(self.game_number),
                duration: Some(self.duration),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Find every `game_start` → `game_end` pair, in frame order.
pub fn find_game_sequences(tags: &[Tag]) -> Vec<GameSequence> {
    find_valid_sequences(tags, GAME_START_TAG, GAME_END_TAG, &[], "game")
        .into_iter()
        .enumerate()
        .map(|(idx, seq)| GameSequence {
            start_frame: seq.start_frame,
            end_frame: seq.end_frame,
            game_number: idx as u32 + 1,
            duration: seq.end_frame - seq.start_frame,
        })
        .collect()
}
