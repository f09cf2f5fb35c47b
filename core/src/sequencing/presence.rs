//! Contiguous-run detection over per-frame player presence data.
//!
//! The presence frame array comes from an offline detection pass: one slot
//! per frame, each holding a map from player name to tracking payload. An
//! empty or absent slot means nobody was detected in that frame.

use super::Sequence;
use crate::metadata::VideoMetadata;
use filmroom_types::{Tag, TagMetadata};
use hashbrown::HashMap;

/// Frame-indexed presence data; `None` and an empty map both mean "not
/// present". Payload values are opaque tracking data, passed through.
pub type PresenceFrames = Vec<Option<HashMap<String, serde_json::Value>>>;

/// Minimum `end_frame - start_frame` for an emitted run. Shorter blips are
/// detection noise, not playing time.
const MIN_RUN_SPAN: i64 = 2;

/// Find every contiguous run of frames in which the player is present.
///
/// Single forward pass; a run closes on the first absent frame (or the end
/// of the array) and is kept only when it spans at least [`MIN_RUN_SPAN`]
/// frames. Runs are returned in frame order.
pub fn find_player_sequences(video: &VideoMetadata, player_name: &str) -> Vec<Sequence> {
    let Some(frames) = video.boxes.as_ref() else {
        return Vec::new();
    };
    if player_name.is_empty() {
        return Vec::new();
    }

    let output_name = format!("{player_name}_in_game");
    let mut sequences = Vec::new();
    let mut open: Option<(i64, i64)> = None;

    for (frame, slot) in frames.iter().enumerate() {
        let frame = frame as i64;
        let present = slot.as_ref().is_some_and(|m| m.contains_key(player_name));

        if present {
            match open {
                Some((_, ref mut end)) => *end = frame,
                None => open = Some((frame, frame)),
            }
        } else if let Some((start, end)) = open.take()
            && end - start >= MIN_RUN_SPAN
        {
            sequences.push(Sequence::span(&output_name, start, end));
        }
    }

    if let Some((start, end)) = open
        && end - start >= MIN_RUN_SPAN
    {
        sequences.push(Sequence::span(&output_name, start, end));
    }

    sequences
}

/// Convert presence runs into persistable interval tags with duration
/// metadata at the given frame rate.
pub fn player_sequences_to_tags(sequences: &[Sequence], fps: f64) -> Vec<Tag> {
    sequences
        .iter()
        .map(|seq| {
            let frames = seq.duration_frames();
            let seconds = if fps > 0.0 {
                (frames as f64 / fps * 10.0).round() / 10.0
            } else {
                0.0
            };
            Tag {
                name: seq.name.clone(),
                start_frame: Some(seq.start_frame),
                end_frame: Some(seq.end_frame),
                metadata: Some(TagMetadata {
                    duration_frames: Some(frames),
                    duration_seconds: Some(seconds),
                    ..Default::default()
                }),
                ..Default::default()
            }
        })
        .collect()
}
