//! Whole-game summary over an optional frame range.

use super::{round1, tags_in_range};
use crate::metadata::VideoMetadata;
use crate::stats::team::calculate_team_scores;
use filmroom_types::{FrameRange, GameAggregateStats, TeamSide};

/// Home/away scores inside the range plus the elapsed span of tagged
/// activity in seconds. An empty range yields all zeros.
pub fn calculate_game_aggregate_stats(
    video: &VideoMetadata,
    range: Option<FrameRange>,
    fps: f64,
) -> GameAggregateStats {
    let scoped = VideoMetadata::from_tags(tags_in_range(video, range));

    let duration_in_seconds = if fps > 0.0 {
        let frames: Vec<i64> = scoped.tags.iter().map(|t| t.sort_frame()).collect();
        match (frames.iter().min(), frames.iter().max()) {
            (Some(first), Some(last)) => round1((last - first) as f64 / fps),
            _ => 0.0,
        }
    } else {
        0.0
    };

    GameAggregateStats {
        home_score: calculate_team_scores(&scoped, TeamSide::Home, None),
        away_score: calculate_team_scores(&scoped, TeamSide::Away, None),
        duration_in_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmroom_types::Tag;

    fn game_video() -> VideoMetadata {
        VideoMetadata::from_tags(vec![
            Tag::point("home_touch_attacking", 0),
            Tag::point("score", 30),
            Tag::point("away_touch_attacking", 600),
            Tag::point("score", 660),
            Tag::point("home_touch_attacking", 1200),
            Tag::point("score", 1800),
        ])
    }

    #[test]
    fn scores_attributed_per_team() {
        let stats = calculate_game_aggregate_stats(&game_video(), None, 30.0);
        assert_eq!(stats.home_score, 2);
        assert_eq!(stats.away_score, 1);
        assert_eq!(stats.duration_in_seconds, 60.0);
    }

    #[test]
    fn range_restricts_the_summary() {
        let stats = calculate_game_aggregate_stats(
            &game_video(),
            Some(FrameRange::new(0, 700)),
            30.0,
        );
        assert_eq!(stats.home_score, 1);
        assert_eq!(stats.away_score, 1);
        assert_eq!(stats.duration_in_seconds, 22.0);
    }

    #[test]
    fn empty_video_yields_zeros() {
        let stats = calculate_game_aggregate_stats(&VideoMetadata::default(), None, 30.0);
        assert_eq!(stats.home_score, 0);
        assert_eq!(stats.away_score, 0);
        assert_eq!(stats.duration_in_seconds, 0.0);
    }
}
