//! Possession-aware splitting of playing-time intervals.
//!
//! A coarse `"<player> playing"` interval says nothing about which end of
//! the floor the player spent it on. This pass splits each interval into
//! offense/defense sub-intervals using the touch stream: whichever team
//! last touched the ball is attacking, and every change of attacking team
//! inside the interval closes one sub-segment and opens the next.

use super::sorted_by_point_frame;
use filmroom_types::{Tag, TeamSide};

fn touch_team(name: &str) -> Option<TeamSide> {
    if name.starts_with(TeamSide::Home.touch_prefix()) {
        Some(TeamSide::Home)
    } else if name.starts_with(TeamSide::Away.touch_prefix()) {
        Some(TeamSide::Away)
    } else {
        None
    }
}

fn segment_tag(player_name: &str, on_offense: bool, start: i64, end: i64) -> Tag {
    let side = if on_offense { "offense" } else { "defense" };
    Tag::interval(format!("{player_name} playing {side}"), start, end)
}

/// Split every `"<player> playing"` interval (case-insensitive name match)
/// into contiguous offense/defense sub-interval tags.
///
/// The attacking team before the interval's first in-interval touch comes
/// from the most recent touch at or before the interval start. An interval
/// with no touch at or before its start and none inside is dropped
/// entirely and produces no sub-segments.
pub fn split_playing_time_tags(tags: &[Tag], player_name: &str, team: TeamSide) -> Vec<Tag> {
    if player_name.is_empty() {
        return Vec::new();
    }
    let playing_name = format!("{player_name} playing");

    let touch_tags: Vec<Tag> = tags
        .iter()
        .filter(|t| touch_team(&t.name).is_some())
        .cloned()
        .collect();
    let touches = sorted_by_point_frame(&touch_tags);

    let mut out = Vec::new();

    for interval in tags {
        if !interval.name.eq_ignore_ascii_case(&playing_name) {
            continue;
        }
        let (Some(start), Some(end)) = (interval.start_frame, interval.end_frame) else {
            continue;
        };

        // Prior state: the last touch at or before the interval start sets
        // the attacking team for frames before any in-interval touch.
        let mut attacking = touches
            .iter()
            .take_while(|t| t.point_frame() <= start)
            .last()
            .and_then(|t| touch_team(&t.name));
        let mut saw_touch = attacking.is_some();

        let mut segment_start = start;
        for touch in touches
            .iter()
            .filter(|t| t.point_frame() >= start && t.point_frame() <= end)
        {
            let Some(next_team) = touch_team(&touch.name) else {
                continue;
            };
            saw_touch = true;

            match attacking {
                None => attacking = Some(next_team),
                Some(current) if current != next_team => {
                    let boundary = touch.point_frame() - 1;
                    if boundary >= segment_start {
                        out.push(segment_tag(
                            player_name,
                            current == team,
                            segment_start,
                            boundary,
                        ));
                    }
                    segment_start = touch.point_frame();
                    attacking = Some(next_team);
                }
                Some(_) => {}
            }
        }

        if !saw_touch {
            // No touch anywhere near the interval: drop it entirely.
            continue;
        }
        if let Some(current) = attacking {
            out.push(segment_tag(player_name, current == team, segment_start, end));
        }
    }

    out
}
