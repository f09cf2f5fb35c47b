//! Attack, possession, and turnover derivation coverage.

use super::attack::{
    attack_sequences_to_tags, calculate_attack_sequence_tags, calculate_team_possessions,
    find_team_attack_sequences, find_turnover_sequences, turnover_sequences_to_tags,
};
use crate::metadata::VideoMetadata;
use filmroom_types::{Tag, TeamSide};

fn video(tags: Vec<Tag>) -> VideoMetadata {
    VideoMetadata {
        tags,
        ..Default::default()
    }
}

#[test]
fn scoring_attack_keeps_score_touch() {
    let v = video(vec![
        Tag::point("home_touch_attacking", 100),
        Tag::point("home_touch_attacking", 130),
        Tag::point("score", 150),
    ]);
    let sequences = find_team_attack_sequences(&v, TeamSide::Home);
    assert_eq!(sequences.len(), 1);

    let seq = &sequences[0];
    assert!(seq.scored);
    assert_eq!((seq.start_frame, seq.end_frame), (100, 150));
    assert_eq!(seq.touch_count(), 3);
    assert_eq!(seq.name, "home_attack");
}

#[test]
fn trailing_opponent_touch_is_trimmed() {
    let v = video(vec![
        Tag::point("home_touch_attacking", 100),
        Tag::point("home_touch_attacking", 130),
        Tag::point("away_touch_clearing", 160),
    ]);
    let sequences = find_team_attack_sequences(&v, TeamSide::Home);
    assert_eq!(sequences.len(), 1);

    let seq = &sequences[0];
    assert!(!seq.scored);
    // The away touch terminated the sequence but is not part of the attack.
    assert_eq!(seq.touch_count(), 2);
    assert_eq!(seq.end_frame, 130);
}

#[test]
fn attack_tags_carry_touch_metadata() {
    let v = video(vec![
        Tag::point("home_touch_attacking", 100),
        Tag::point("score", 150),
    ]);
    let sequences = find_team_attack_sequences(&v, TeamSide::Home);
    let tags = attack_sequences_to_tags(&sequences, TeamSide::Home);

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "home_attack_sequence");
    assert_eq!((tags[0].start_frame, tags[0].end_frame), (Some(100), Some(150)));

    let meta = tags[0].metadata.as_ref().unwrap();
    assert_eq!(meta.touch_count, Some(2));
    assert_eq!(meta.scored, Some(true));
    assert_eq!(meta.touches.as_ref().unwrap()[1].frame, 150);
}

#[test]
fn consecutive_clearing_touches_collapse_into_one_possession() {
    let v = video(vec![
        Tag::point("home_touch_clearing", 10),
        Tag::point("home_touch_clearing", 20),
        Tag::point("away_touch_clearing", 30),
        Tag::point("home_touch_clearing", 40),
        Tag::point("score", 50),
    ]);
    assert_eq!(calculate_team_possessions(&v, TeamSide::Home), 2);
}

#[test]
fn possessions_empty_without_clearing_touches() {
    let v = video(vec![Tag::point("home_touch_attacking", 10)]);
    assert_eq!(calculate_team_possessions(&v, TeamSide::Home), 0);
}

#[test]
fn score_synthesized_after_last_attacking_touch() {
    let tags = vec![
        Tag::point("home_touch_attacking", 10),
        Tag::point("home_touch_attacking", 15),
        Tag::point("home_touch_attacking", 20),
        Tag::point("home_touch_clearing", 25),
    ];
    let scores = calculate_attack_sequence_tags(&tags, TeamSide::Home);
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].name, "score");
    assert_eq!(scores[0].frame, Some(21));
}

#[test]
fn opponent_touch_disarms_score_inference() {
    let tags = vec![
        Tag::point("home_touch_attacking", 10),
        Tag::point("away_touch_clearing", 15),
        Tag::point("home_touch_clearing", 20),
    ];
    let scores = calculate_attack_sequence_tags(&tags, TeamSide::Home);
    assert!(scores.is_empty());
}

#[test]
fn score_inference_ignores_unrelated_tags() {
    let tags = vec![
        Tag::point("home_touch_attacking", 10),
        Tag::point("aaron playing", 12),
        Tag::point("home_touch_clearing", 25),
    ];
    let scores = calculate_attack_sequence_tags(&tags, TeamSide::Home);
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].frame, Some(11));
}

#[test]
fn turnover_keeps_trailing_touch_window() {
    let tags = vec![
        Tag::point("home_touch_attacking", 10),
        Tag::point("home_touch_attacking", 20),
        Tag::point("home_touch_attacking", 30),
        Tag::point("home_touch_attacking", 40),
        Tag::point("away_touch_clearing", 50),
    ];
    let sequences = find_turnover_sequences(&tags, TeamSide::Home, 3);
    assert_eq!(sequences.len(), 1);

    let seq = &sequences[0];
    // Completing away clearing touch dropped, then the last 3 touches kept.
    assert_eq!(seq.touch_count(), 3);
    assert_eq!((seq.start_frame, seq.end_frame), (20, 40));
}

#[test]
fn score_breaks_turnover_candidate() {
    let tags = vec![
        Tag::point("home_touch_attacking", 10),
        Tag::point("score", 20),
        Tag::point("away_touch_clearing", 30),
    ];
    let sequences = find_turnover_sequences(&tags, TeamSide::Home, 3);
    assert!(sequences.is_empty());
}

#[test]
fn rerun_over_approved_output_finds_the_same_sequences() {
    // Approving derived tags appends them to the collection; mining again
    // over the merged collection must not invent new sequences.
    let mut tags = vec![
        Tag::point("home_touch_attacking", 100),
        Tag::point("home_touch_attacking", 130),
        Tag::point("score", 150),
    ];
    let first = find_team_attack_sequences(&video(tags.clone()), TeamSide::Home);
    tags.extend(attack_sequences_to_tags(&first, TeamSide::Home));

    let second = find_team_attack_sequences(&video(tags), TeamSide::Home);
    assert_eq!(first, second);
}

#[test]
fn turnover_tags_use_caller_supplied_name() {
    let tags = vec![
        Tag::point("home_touch_attacking", 10),
        Tag::point("away_touch_clearing", 50),
    ];
    let sequences = find_turnover_sequences(&tags, TeamSide::Home, 3);
    let out = turnover_sequences_to_tags(&sequences, "home_turnover");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "home_turnover");
    assert_eq!(out[0].metadata.as_ref().unwrap().touch_count, Some(1));
}
