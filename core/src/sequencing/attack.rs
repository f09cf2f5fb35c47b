//! Team attack and possession derivation.
//!
//! Built on the accumulator, plus the domain trimming rules: an attack is
//! opened by the team's attacking touch and ended by a score or by any
//! opponent touch, but the opponent touch that ended it is not part of the
//! attack and gets trimmed back off. `calculate_attack_sequence_tags` is a
//! separate score-inference heuristic that predates the accumulator-based
//! derivation; both are kept as distinct algorithms because they answer
//! different questions (intervals vs synthesized point events).

use super::accumulator::find_tag_sequences;
use super::{Sequence, sorted_by_point_frame};
use crate::metadata::VideoMetadata;
use filmroom_types::{Tag, TagMetadata, TeamSide};

/// The point-tag name that marks a goal.
pub const SCORE_TAG: &str = "score";

/// Derive every attack sequence for a team.
///
/// An attack opens on the team's attacking touch and accumulates until a
/// score or any opponent touch. An opponent touch that closed the sequence
/// is popped back off and the end frame recomputed from the remaining
/// touches; a closing score stays and marks the sequence as scored.
pub fn find_team_attack_sequences(video: &VideoMetadata, team: TeamSide) -> Vec<Sequence> {
    let opponent = team.opponent();
    let mut sequences = find_tag_sequences(
        &video.tags,
        team.attacking_touch(),
        &[SCORE_TAG, opponent.touch_prefix()],
        &[],
    );

    for sequence in &mut sequences {
        sequence.name = format!("{}_attack", team.key());

        let ended_by_opponent = sequence
            .touches
            .last()
            .is_some_and(|t| t.name.starts_with(opponent.touch_prefix()));
        if ended_by_opponent {
            sequence.touches.pop();
            if let Some(last) = sequence.touches.last() {
                sequence.end_frame = last.point_frame();
            }
        }

        sequence.scored = sequence.touches.iter().any(|t| t.name == SCORE_TAG);
    }

    sequences
}

/// Convert derived attack sequences into persistable interval tags.
pub fn attack_sequences_to_tags(sequences: &[Sequence], team: TeamSide) -> Vec<Tag> {
    sequences
        .iter()
        .map(|seq| Tag {
            name: format!("{}_attack_sequence", team.key()),
            start_frame: Some(seq.start_frame),
            end_frame: Some(seq.end_frame),
            metadata: Some(TagMetadata {
                touch_count: Some(seq.touch_count()),
                scored: Some(seq.scored),
                touches: Some(seq.touch_refs()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect()
}

/// Count continuous possession intervals for a team.
///
/// A possession opens on the team's clearing touch and runs until a score
/// or the opponent's clearing touch, so consecutive same-team clearing
/// touches collapse into one possession.
pub fn calculate_team_possessions(video: &VideoMetadata, team: TeamSide) -> usize {
    let opponent = team.opponent();
    find_tag_sequences(
        &video.tags,
        team.clearing_touch(),
        &[SCORE_TAG, opponent.clearing_touch()],
        &[],
    )
    .len()
}

/// Infer missed `score` point tags from the touch stream.
///
/// Scans only the four touch names for the two teams, in frame order. The
/// team's attacking touch arms the heuristic; the team's own clearing touch
/// while armed means the attack ended in a goal that was never tagged, so a
/// `score` point tag is synthesized one frame after the last attacking
/// touch. Any opponent touch disarms. Produces point events, not intervals.
pub fn calculate_attack_sequence_tags(tags: &[Tag], team: TeamSide) -> Vec<Tag> {
    let opponent = team.opponent();
    let relevant = |name: &str| {
        name == team.attacking_touch()
            || name == team.clearing_touch()
            || name == opponent.attacking_touch()
            || name == opponent.clearing_touch()
    };

    let filtered: Vec<Tag> = tags.iter().filter(|t| relevant(&t.name)).cloned().collect();
    let sorted = sorted_by_point_frame(&filtered);

    let mut score_tags = Vec::new();
    let mut last_attacking: Option<i64> = None;

    for tag in &sorted {
        if tag.name == team.attacking_touch() {
            last_attacking = Some(tag.point_frame());
        } else if tag.name == team.clearing_touch() {
            if let Some(frame) = last_attacking.take() {
                score_tags.push(Tag::point(SCORE_TAG, frame + 1));
            }
        } else {
            // Opponent touch: whatever attack was in progress is over.
            last_attacking = None;
        }
    }

    score_tags
}

/// Find the touches leading into each turnover.
///
/// A candidate opens on the team's attacking touch and completes on the
/// opponent's clearing touch (the turnover); a score breaks the candidate
/// since the possession ended well. The completing touch is dropped and
/// only the trailing `max_preceding_touches` touches are kept, with the
/// frame span re-derived from the retained window.
pub fn find_turnover_sequences(
    tags: &[Tag],
    team: TeamSide,
    max_preceding_touches: usize,
) -> Vec<Sequence> {
    let opponent = team.opponent();
    let mut sequences = find_tag_sequences(
        tags,
        team.attacking_touch(),
        &[opponent.clearing_touch()],
        &[SCORE_TAG],
    );

    sequences.retain_mut(|sequence| {
        sequence.name = format!("{}_turnover", team.key());
        sequence.touches.pop();

        let keep_from = sequence.touches.len().saturating_sub(max_preceding_touches);
        sequence.touches.drain(..keep_from);

        match (sequence.touches.first(), sequence.touches.last()) {
            (Some(first), Some(last)) => {
                sequence.start_frame = first.point_frame();
                sequence.end_frame = last.point_frame();
                true
            }
            _ => false,
        }
    });

    sequences
}

/// Convert turnover sequences into persistable interval tags.
pub fn turnover_sequences_to_tags(sequences: &[Sequence], output_name: &str) -> Vec<Tag> {
    sequences
        .iter()
        .map(|seq| Tag {
            name: output_name.to_string(),
            start_frame: Some(seq.start_frame),
            end_frame: Some(seq.end_frame),
            metadata: Some(TagMetadata {
                touch_count: Some(seq.touch_count()),
                touches: Some(seq.touch_refs()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect()
}
