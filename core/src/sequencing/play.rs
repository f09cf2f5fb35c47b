//! Clear and attack outcome mining.
//!
//! Works on the simplified play-by-play vocabulary (`home_clearing`,
//! `home_attacking`, `home_score`, ...) and scans both teams in one pass,
//! deriving the team from the tag-name prefix. Each emitted sequence keeps
//! its opening and resolving tags as touches so callers can recover the
//! team.

use super::{Sequence, sorted_by_point_frame};
use filmroom_types::{Tag, TeamSide};

fn team_of(name: &str) -> Option<TeamSide> {
    name.split('_').next()?.parse().ok()
}

fn outcome(name: &str, start: &Tag, end: &Tag) -> Sequence {
    let mut seq = Sequence::open(name, start);
    seq.absorb(end);
    seq
}

/// A clearing tag followed by the same team's attacking tag, with no
/// opposing-team tag in between, is a successful clear.
pub fn find_clear_successes(tags: &[Tag]) -> Vec<Sequence> {
    let sorted = sorted_by_point_frame(tags);
    let mut sequences = Vec::new();

    for (idx, start) in sorted.iter().enumerate() {
        if !start.name.ends_with("_clearing") {
            continue;
        }
        let Some(team) = team_of(&start.name) else {
            continue;
        };
        let attacking = format!("{}_attacking", team.key());
        let opponent_prefix = format!("{}_", team.opponent().key());

        for tag in &sorted[idx + 1..] {
            if tag.name == attacking {
                sequences.push(outcome("clear_success", start, tag));
                break;
            }
            // Any opposing-team event first means the clear did not hold.
            if tag.name.contains(&opponent_prefix) {
                break;
            }
        }
    }

    sequences
}

/// A clearing tag answered by the opponent's clearing tag, with no
/// attacking tag in between, is a failed clear.
pub fn find_clear_fails(tags: &[Tag]) -> Vec<Sequence> {
    let sorted = sorted_by_point_frame(tags);
    let mut sequences = Vec::new();

    for (idx, start) in sorted.iter().enumerate() {
        if !start.name.ends_with("_clearing") {
            continue;
        }
        let Some(team) = team_of(&start.name) else {
            continue;
        };
        let opponent_clearing = format!("{}_clearing", team.opponent().key());

        for (offset, tag) in sorted[idx + 1..].iter().enumerate() {
            if tag.name != opponent_clearing {
                continue;
            }
            let reached_attack = sorted[idx + 1..idx + 1 + offset]
                .iter()
                .any(|t| t.name.ends_with("_attacking"));
            if !reached_attack {
                sequences.push(outcome("clear_fail", start, tag));
            }
            break;
        }
    }

    sequences
}

/// An attacking tag resolved by the team's score (`attack_success`) or by
/// the opponent's clearing tag (`attack_fail`).
pub fn find_attack_outcomes(tags: &[Tag]) -> Vec<Sequence> {
    let sorted = sorted_by_point_frame(tags);
    let mut sequences = Vec::new();

    for (idx, start) in sorted.iter().enumerate() {
        if !start.name.ends_with("_attacking") {
            continue;
        }
        let Some(team) = team_of(&start.name) else {
            continue;
        };
        let score = format!("{}_score", team.key());
        let opponent_clearing = format!("{}_clearing", team.opponent().key());

        for tag in &sorted[idx + 1..] {
            if tag.name == score {
                sequences.push(outcome("attack_success", start, tag));
                break;
            }
            if tag.name == opponent_clearing {
                sequences.push(outcome("attack_fail", start, tag));
                break;
            }
        }
    }

    sequences
}

/// All play outcomes in one list, as the processor proposes them.
pub fn find_play_sequences(tags: &[Tag]) -> Vec<Sequence> {
    let mut sequences = find_clear_successes(tags);
    sequences.extend(find_clear_fails(tags));
    sequences.extend(find_attack_outcomes(tags));
    sequences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_success_requires_same_team_attack() {
        let tags = vec![
            Tag::point("home_clearing", 100),
            Tag::point("home_attacking", 160),
        ];
        let sequences = find_clear_successes(&tags);
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].name, "clear_success");
        assert_eq!(
            (sequences[0].start_frame, sequences[0].end_frame),
            (100, 160)
        );
    }

    #[test]
    fn opposing_event_blocks_clear_success() {
        let tags = vec![
            Tag::point("home_clearing", 100),
            Tag::point("away_attacking", 130),
            Tag::point("home_attacking", 160),
        ];
        assert!(find_clear_successes(&tags).is_empty());
    }

    #[test]
    fn clear_fail_on_opponent_clearing_without_attack() {
        let tags = vec![
            Tag::point("home_clearing", 100),
            Tag::point("away_clearing", 150),
        ];
        let sequences = find_clear_fails(&tags);
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].name, "clear_fail");
    }

    #[test]
    fn intervening_attack_voids_clear_fail() {
        let tags = vec![
            Tag::point("home_clearing", 100),
            Tag::point("away_attacking", 120),
            Tag::point("away_clearing", 150),
        ];
        assert!(find_clear_fails(&tags).is_empty());
    }

    #[test]
    fn attack_outcomes_split_success_and_fail() {
        let tags = vec![
            Tag::point("home_attacking", 100),
            Tag::point("home_score", 150),
            Tag::point("away_attacking", 300),
            Tag::point("home_clearing", 340),
        ];
        let sequences = find_attack_outcomes(&tags);
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].name, "attack_success");
        assert_eq!(sequences[1].name, "attack_fail");
    }

    #[test]
    fn combined_pass_covers_both_teams() {
        let tags = vec![
            Tag::point("away_clearing", 10),
            Tag::point("away_attacking", 40),
            Tag::point("away_score", 70),
        ];
        let sequences = find_play_sequences(&tags);
        let names: Vec<&str> = sequences.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"clear_success"));
        assert!(names.contains(&"attack_success"));
    }
}
