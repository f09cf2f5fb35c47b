//! Shared tag and statistics types for FILMROOM
//!
//! This crate contains the serializable data shapes shared between the
//! sequence-mining engine (filmroom-core) and any front end: tag events,
//! derived-tag metadata, and aggregate stat results. Field names serialize
//! in camelCase to match the per-video metadata JSON documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Tag Events
// ─────────────────────────────────────────────────────────────────────────────

/// A named point or interval event on a video's frame timeline.
///
/// Every tag carries at least one of `frame` or (`start_frame`, `end_frame`);
/// some producers set both. Names are opaque strings matched by exact
/// equality or substring containment, never parsed structurally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,

    /// Point-in-time event frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<i64>,

    /// Interval start frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_frame: Option<i64>,

    /// Interval end frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_frame: Option<i64>,

    /// Derived summary attached by processors; passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TagMetadata>,
}

impl Tag {
    /// A point event at a single frame.
    pub fn point(name: impl Into<String>, frame: i64) -> Self {
        Self {
            name: name.into(),
            frame: Some(frame),
            ..Default::default()
        }
    }

    /// An interval event spanning `[start_frame, end_frame]`.
    pub fn interval(name: impl Into<String>, start_frame: i64, end_frame: i64) -> Self {
        Self {
            name: name.into(),
            start_frame: Some(start_frame),
            end_frame: Some(end_frame),
            ..Default::default()
        }
    }

    /// The point frame used when sorting and scanning point-event streams.
    /// Interval fields are ignored; a tag with neither sorts as frame 0.
    pub fn point_frame(&self) -> i64 {
        self.frame.unwrap_or(0)
    }

    /// Best-effort timeline position for mixed point/interval collections.
    pub fn sort_frame(&self) -> i64 {
        self.frame.or(self.start_frame).unwrap_or(0)
    }

    /// True for tags carrying both interval fields.
    pub fn is_interval(&self) -> bool {
        self.start_frame.is_some() && self.end_frame.is_some()
    }
}

/// Derived summary carried by processor-generated tags.
///
/// All fields are optional; unknown producer-specific keys round-trip
/// through `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scored: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touches: Option<Vec<TouchRef>>,

    /// 1-based game index (game splitter output).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_number: Option<u32>,

    /// Interval length in frames (game splitter output).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    /// Pass-through for keys this crate does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Snapshot of a tag absorbed into a sequence's touch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchRef {
    pub name: String,
    pub frame: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Teams and Frame Ranges
// ─────────────────────────────────────────────────────────────────────────────

/// Which side of the footage a team is tagged as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    /// The tag-name key for this side ("home" / "away").
    pub fn key(&self) -> &'static str {
        match self {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        }
    }

    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Prefix shared by every touch tag for this side.
    pub fn touch_prefix(&self) -> &'static str {
        match self {
            TeamSide::Home => "home_touch_",
            TeamSide::Away => "away_touch_",
        }
    }

    pub fn attacking_touch(&self) -> &'static str {
        match self {
            TeamSide::Home => "home_touch_attacking",
            TeamSide::Away => "away_touch_attacking",
        }
    }

    pub fn clearing_touch(&self) -> &'static str {
        match self {
            TeamSide::Home => "home_touch_clearing",
            TeamSide::Away => "away_touch_clearing",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TeamSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(TeamSide::Home),
            "away" => Ok(TeamSide::Away),
            other => Err(format!("unknown team '{other}' (expected home or away)")),
        }
    }
}

/// Inclusive frame window used to restrict aggregate calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRange {
    pub start_frame: i64,
    pub end_frame: i64,
}

impl FrameRange {
    pub fn new(start_frame: i64, end_frame: i64) -> Self {
        Self {
            start_frame,
            end_frame,
        }
    }

    pub fn contains(&self, frame: i64) -> bool {
        frame >= self.start_frame && frame <= self.end_frame
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate Stat Results
// ─────────────────────────────────────────────────────────────────────────────

/// Team efficiency summary: scores over attacks, plus possessions that
/// never became an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAggregateStats {
    pub scores: u32,
    pub attacks: u32,
    /// `round(scores / attacks * 100)`, 0 when there are no attacks.
    pub scoring_percentage: u32,
    /// `possessions - attacks`; may be negative on messy tagging.
    pub clearing_turnovers: i64,
}

/// Touch totals for one class of attacks (scoring or non-scoring).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchGroup {
    pub total_touches: u32,
    pub attack_count: u32,
    /// Rounded to one decimal place; 0 when there are no attacks.
    pub average_touches: f64,
}

/// Touches per attack, split by whether the attack scored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackTouchStats {
    pub scoring: TouchGroup,
    pub non_scoring: TouchGroup,
}

/// Attack durations for one class of attacks (scoring or non-scoring).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationGroup {
    pub total_seconds: f64,
    pub attack_count: u32,
    /// Rounded to one decimal place; 0 when there are no attacks.
    pub average_seconds: f64,
}

/// Seconds spent attacking, split by whether the attack scored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackDurationStats {
    pub scoring: DurationGroup,
    pub non_scoring: DurationGroup,
}

/// Whole-game summary over an optional frame range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameAggregateStats {
    pub home_score: u32,
    pub away_score: u32,
    /// Elapsed span of tagged activity, in seconds.
    pub duration_in_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_serializes_camel_case() {
        let tag = Tag::interval("aaron playing", 120, 480);
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json["startFrame"], 120);
        assert_eq!(json["endFrame"], 480);
        assert!(json.get("frame").is_none());
    }

    #[test]
    fn tag_metadata_round_trips_unknown_keys() {
        let json = r#"{"name":"home_attack_sequence","startFrame":10,"endFrame":50,
            "metadata":{"touchCount":3,"scored":true,"confidence":0.9}}"#;
        let tag: Tag = serde_json::from_str(json).unwrap();
        let meta = tag.metadata.as_ref().unwrap();
        assert_eq!(meta.touch_count, Some(3));
        assert_eq!(meta.scored, Some(true));
        assert_eq!(meta.extra["confidence"], 0.9);

        let back = serde_json::to_value(&tag).unwrap();
        assert_eq!(back["metadata"]["confidence"], 0.9);
        assert_eq!(back["metadata"]["touchCount"], 3);
    }

    #[test]
    fn point_frame_ignores_interval_fields() {
        let tag = Tag::interval("x", 100, 200);
        assert_eq!(tag.point_frame(), 0);
        assert_eq!(tag.sort_frame(), 100);
    }

    #[test]
    fn team_side_keys_and_opponents() {
        assert_eq!(TeamSide::Home.opponent(), TeamSide::Away);
        assert_eq!(TeamSide::Away.touch_prefix(), "away_touch_");
        assert_eq!(TeamSide::Home.attacking_touch(), "home_touch_attacking");
        assert_eq!("AWAY".parse::<TeamSide>().unwrap(), TeamSide::Away);
        assert!("neutral".parse::<TeamSide>().is_err());
    }

    #[test]
    fn frame_range_is_inclusive() {
        let range = FrameRange::new(100, 200);
        assert!(range.contains(100));
        assert!(range.contains(200));
        assert!(!range.contains(99));
        assert!(!range.contains(201));
    }
}
