//! Aggregate statistics over tags and derived sequences.
//!
//! Pure arithmetic reductions, optionally restricted to an inclusive frame
//! range. Every division by zero normalizes to 0; no function here errors.

mod game;
mod team;

pub use game::calculate_game_aggregate_stats;
pub use team::{
    calculate_team_aggregate_stats, calculate_team_attack_durations,
    calculate_team_attack_touches, calculate_team_attacks, calculate_team_scores,
    calculate_team_touches, calculate_total_tags,
};

use crate::metadata::VideoMetadata;
use filmroom_types::{FrameRange, Tag};

/// Restrict a video's tags to the given range by best-effort timeline
/// position. `None` keeps everything.
pub(crate) fn tags_in_range(video: &VideoMetadata, range: Option<FrameRange>) -> Vec<Tag> {
    match range {
        None => video.tags.clone(),
        Some(r) => video
            .tags
            .iter()
            .filter(|t| r.contains(t.sort_frame()))
            .cloned()
            .collect(),
    }
}

/// Round to one decimal place, the precision the stat cards display.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
