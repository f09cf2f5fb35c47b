//! Per-team reducers: touches, scores, attacks, efficiency, and attack
//! touch/duration breakdowns.

use super::{round1, tags_in_range};
use crate::metadata::VideoMetadata;
use crate::sequencing::attack::{
    SCORE_TAG, calculate_team_possessions, find_team_attack_sequences,
};
use crate::sequencing::sorted_by_point_frame;
use filmroom_types::{
    AttackDurationStats, AttackTouchStats, DurationGroup, FrameRange, TeamAggregateStats,
    TeamSide, TouchGroup,
};

/// Total tag count, range-filtered.
pub fn calculate_total_tags(video: &VideoMetadata, range: Option<FrameRange>) -> usize {
    tags_in_range(video, range).len()
}

/// Count of the team's touch tags (`<team>_touch_*`).
pub fn calculate_team_touches(
    video: &VideoMetadata,
    team: TeamSide,
    range: Option<FrameRange>,
) -> usize {
    tags_in_range(video, range)
        .iter()
        .filter(|t| t.name.starts_with(team.touch_prefix()))
        .count()
}

/// Count of goals credited to the team.
///
/// For each `score` tag, the nearest preceding `_touch_attacking` tag says
/// who was attacking; the score counts for the team only when that touch is
/// theirs. A score with no preceding attacking touch counts for nobody.
pub fn calculate_team_scores(
    video: &VideoMetadata,
    team: TeamSide,
    range: Option<FrameRange>,
) -> u32 {
    let sorted = sorted_by_point_frame(&tags_in_range(video, range));
    let mut count = 0;

    for (idx, tag) in sorted.iter().enumerate() {
        if tag.name != SCORE_TAG {
            continue;
        }
        for earlier in sorted[..idx].iter().rev() {
            if earlier.name.ends_with("_touch_attacking") {
                if earlier.name == team.attacking_touch() {
                    count += 1;
                }
                break;
            }
        }
    }

    count
}

/// Count of attacks: the team's attacking touch immediately preceded by
/// its own clearing touch in the touch stream.
pub fn calculate_team_attacks(
    video: &VideoMetadata,
    team: TeamSide,
    range: Option<FrameRange>,
) -> u32 {
    let tags = tags_in_range(video, range);
    let touch_tags: Vec<_> = sorted_by_point_frame(&tags)
        .into_iter()
        .filter(|t| t.name.contains("_touch_"))
        .collect();

    let mut count = 0;
    for pair in touch_tags.windows(2) {
        if pair[1].name == team.attacking_touch() && pair[0].name == team.clearing_touch() {
            count += 1;
        }
    }
    count
}

/// Scores over attacks, plus possessions that never produced an attack.
pub fn calculate_team_aggregate_stats(
    video: &VideoMetadata,
    team: TeamSide,
    range: Option<FrameRange>,
) -> TeamAggregateStats {
    let scoped = VideoMetadata::from_tags(tags_in_range(video, range));

    let scores = calculate_team_scores(&scoped, team, None);
    let attacks = calculate_team_attacks(&scoped, team, None);
    let possessions = calculate_team_possessions(&scoped, team) as i64;

    let scoring_percentage = if attacks > 0 {
        (f64::from(scores) / f64::from(attacks) * 100.0).round() as u32
    } else {
        0
    };

    TeamAggregateStats {
        scores,
        attacks,
        scoring_percentage,
        clearing_turnovers: possessions - i64::from(attacks),
    }
}

#[derive(Default)]
struct TouchTally {
    total: u32,
    attacks: u32,
}

impl TouchTally {
    fn into_group(self) -> TouchGroup {
        TouchGroup {
            total_touches: self.total,
            attack_count: self.attacks,
            average_touches: if self.attacks > 0 {
                round1(f64::from(self.total) / f64::from(self.attacks))
            } else {
                0.0
            },
        }
    }
}

/// Touches per attack, split by whether the attack scored.
///
/// Walks the touch stream (plus `score` tags): an attack opens on the
/// team's clearing-then-attacking transition, counts the team's touches
/// while open, and closes on any opponent touch or the next transition.
/// A trailing open attack still counts.
pub fn calculate_team_attack_touches(
    video: &VideoMetadata,
    team: TeamSide,
    range: Option<FrameRange>,
) -> AttackTouchStats {
    let tags = tags_in_range(video, range);
    let touch_tags: Vec<_> = sorted_by_point_frame(&tags)
        .into_iter()
        .filter(|t| t.name.contains("_touch_") || t.name == SCORE_TAG)
        .collect();

    fn flush(scored: bool, touches: u32, scoring: &mut TouchTally, non: &mut TouchTally) {
        let tally = if scored { scoring } else { non };
        tally.total += touches;
        tally.attacks += 1;
    }

    let mut scoring = TouchTally::default();
    let mut non_scoring = TouchTally::default();
    let mut current_touches: u32 = 0;
    let mut in_attack = false;
    let mut current_scored = false;

    for (idx, tag) in touch_tags.iter().enumerate() {
        if tag.name == SCORE_TAG && in_attack {
            current_scored = true;
        }

        if tag.name == team.attacking_touch() && idx > 0 {
            if touch_tags[idx - 1].name == team.clearing_touch() {
                if in_attack {
                    flush(current_scored, current_touches, &mut scoring, &mut non_scoring);
                }
                current_touches = 1;
                in_attack = true;
                current_scored = false;
            } else if in_attack {
                current_touches += 1;
            }
        } else if in_attack && tag.name.starts_with(team.touch_prefix()) {
            current_touches += 1;
        } else if in_attack
            && tag.name.contains("_touch_")
            && !tag.name.starts_with(team.touch_prefix())
        {
            flush(current_scored, current_touches, &mut scoring, &mut non_scoring);
            current_touches = 0;
            in_attack = false;
            current_scored = false;
        }
    }

    if in_attack {
        flush(current_scored, current_touches, &mut scoring, &mut non_scoring);
    }

    AttackTouchStats {
        scoring: scoring.into_group(),
        non_scoring: non_scoring.into_group(),
    }
}

#[derive(Default)]
struct DurationTally {
    seconds: f64,
    attacks: u32,
}

impl DurationTally {
    fn into_group(self) -> DurationGroup {
        DurationGroup {
            total_seconds: round1(self.seconds),
            attack_count: self.attacks,
            average_seconds: if self.attacks > 0 {
                round1(self.seconds / f64::from(self.attacks))
            } else {
                0.0
            },
        }
    }
}

/// Seconds spent attacking, split by whether the attack scored, computed
/// over the derived attack sequences at the given frame rate.
pub fn calculate_team_attack_durations(
    video: &VideoMetadata,
    team: TeamSide,
    fps: f64,
    range: Option<FrameRange>,
) -> AttackDurationStats {
    let scoped = VideoMetadata::from_tags(tags_in_range(video, range));

    let mut scoring = DurationTally::default();
    let mut non_scoring = DurationTally::default();

    if fps > 0.0 {
        for sequence in find_team_attack_sequences(&scoped, team) {
            let seconds = sequence.duration_frames() as f64 / fps;
            let tally = if sequence.scored { &mut scoring } else { &mut non_scoring };
            tally.seconds += seconds;
            tally.attacks += 1;
        }
    }

    AttackDurationStats {
        scoring: scoring.into_group(),
        non_scoring: non_scoring.into_group(),
    }
}
