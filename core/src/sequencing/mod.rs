//! Sequence mining over tag timelines.
//!
//! Each submodule is one mining strategy over the same input shape (a
//! caller-supplied, unsorted collection of [`Tag`]s):
//! - `matcher`: bounded start/end pair matching with an exclusion set
//! - `accumulator`: start/complete/break state-machine accumulation
//! - `attack`: team attack and possession derivation on top of the accumulator
//! - `game`: game_start/game_end splitting
//! - `play`: clear/attack outcome mining for both teams at once
//! - `presence`: contiguous-run detection over per-frame presence data
//! - `playing_time`: offense/defense splitting of playing intervals
//!
//! Every function here is pure: inputs are cloned into freshly sorted
//! working copies and nothing is retained between calls.

pub mod accumulator;
pub mod attack;
pub mod game;
pub mod matcher;
pub mod play;
pub mod playing_time;
pub mod presence;

#[cfg(test)]
mod attack_tests;

pub use accumulator::{AccumulatorState, SequenceAccumulator, find_tag_sequences};
pub use attack::{
    attack_sequences_to_tags, calculate_attack_sequence_tags, calculate_team_possessions,
    find_team_attack_sequences, find_turnover_sequences, turnover_sequences_to_tags,
};
pub use game::{GameSequence, find_game_sequences};
pub use matcher::{NamePattern, find_valid_sequences};
pub use play::{find_attack_outcomes, find_clear_fails, find_clear_successes, find_play_sequences};
pub use playing_time::split_playing_time_tags;
pub use presence::{PresenceFrames, find_player_sequences, player_sequences_to_tags};

use filmroom_types::{Tag, TagMetadata, TouchRef};

/// A derived, named interval built from one or more tags.
///
/// `touches` holds the tags absorbed while the sequence was open, in
/// detection order. The pair matcher emits sequences with no touches.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub name: String,
    pub start_frame: i64,
    pub end_frame: i64,
    pub touches: Vec<Tag>,
    pub scored: bool,
}

impl Sequence {
    /// A bare interval with no touch history.
    pub fn span(name: impl Into<String>, start_frame: i64, end_frame: i64) -> Self {
        Self {
            name: name.into(),
            start_frame,
            end_frame,
            touches: Vec::new(),
            scored: false,
        }
    }

    /// Open a sequence seeded with its triggering tag as the first touch.
    pub fn open(name: impl Into<String>, tag: &Tag) -> Self {
        let frame = tag.point_frame();
        Self {
            name: name.into(),
            start_frame: frame,
            end_frame: frame,
            touches: vec![tag.clone()],
            scored: false,
        }
    }

    /// Append a tag as a touch and extend the sequence to its frame.
    pub fn absorb(&mut self, tag: &Tag) {
        self.end_frame = tag.point_frame();
        self.touches.push(tag.clone());
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    pub fn duration_frames(&self) -> i64 {
        self.end_frame - self.start_frame
    }

    /// Generic persistable interval tag: the sequence's own name, plus
    /// touch metadata when touches were absorbed.
    pub fn to_tag(&self) -> Tag {
        let metadata = (!self.touches.is_empty()).then(|| TagMetadata {
            touch_count: Some(self.touch_count()),
            touches: Some(self.touch_refs()),
            ..Default::default()
        });
        Tag {
            name: self.name.clone(),
            start_frame: Some(self.start_frame),
            end_frame: Some(self.end_frame),
            metadata,
            ..Default::default()
        }
    }

    /// Touch list snapshot for persisted metadata.
    pub fn touch_refs(&self) -> Vec<TouchRef> {
        self.touches
            .iter()
            .map(|t| TouchRef {
                name: t.name.clone(),
                frame: t.point_frame(),
            })
            .collect()
    }
}

/// Stable ascending sort by point frame. Raw tag storage order is
/// unspecified, so every algorithm sorts its own working copy first.
pub(crate) fn sorted_by_point_frame(tags: &[Tag]) -> Vec<Tag> {
    let mut sorted = tags.to_vec();
    sorted.sort_by_key(Tag::point_frame);
    sorted
}
