//! Start/complete/break sequence accumulation.
//!
//! The accumulator is the generalized form of the pair matcher: it opens a
//! sequence on a start tag, absorbs every subsequent tag as a touch, and
//! closes on a completion tag or throws the sequence away on a break tag.
//! All patterns match by substring containment (callers pass prefixes like
//! `home_touch_`), unlike the pair matcher's exact equality.

use super::matcher::NamePattern;
use super::{Sequence, sorted_by_point_frame};
use filmroom_types::Tag;

/// Accumulator lifecycle. `Accumulating` owns the open sequence so there is
/// no separate "current sequence" slot to fall out of sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AccumulatorState {
    #[default]
    Idle,
    Accumulating(Sequence),
}

/// Explicit state machine over a tag stream.
///
/// Transition table, fed tags in ascending point-frame order:
/// - `Idle` + start match: open a sequence seeded with the tag.
/// - `Accumulating` + completion match: absorb the tag, emit the sequence.
/// - `Accumulating` + break match: discard the open sequence; the tag is
///   consumed, not reprocessed.
/// - `Accumulating` + anything else: absorb the tag as a touch.
///
/// Completion is checked before break when a name would match both sets.
/// A sequence still open when input ends is dropped, never emitted.
#[derive(Debug)]
pub struct SequenceAccumulator {
    start: NamePattern,
    completions: Vec<NamePattern>,
    breaks: Vec<NamePattern>,
    output_name: String,
    state: AccumulatorState,
}

impl SequenceAccumulator {
    pub fn new(
        start_name: &str,
        completion_names: &[&str],
        break_names: &[&str],
        output_name: &str,
    ) -> Self {
        Self {
            start: NamePattern::contains(start_name),
            completions: completion_names
                .iter()
                .map(|n| NamePattern::contains(*n))
                .collect(),
            breaks: break_names
                .iter()
                .map(|n| NamePattern::contains(*n))
                .collect(),
            output_name: output_name.to_string(),
            state: AccumulatorState::Idle,
        }
    }

    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    /// Feed one tag through the machine. Returns the completed sequence on
    /// a completion transition, `None` otherwise.
    pub fn offer(&mut self, tag: &Tag) -> Option<Sequence> {
        match std::mem::take(&mut self.state) {
            AccumulatorState::Idle => {
                if self.start.matches(&tag.name) {
                    self.state =
                        AccumulatorState::Accumulating(Sequence::open(&self.output_name, tag));
                }
                None
            }
            AccumulatorState::Accumulating(mut sequence) => {
                if any_match(&self.completions, &tag.name) {
                    sequence.absorb(tag);
                    return Some(sequence);
                }
                if any_match(&self.breaks, &tag.name) {
                    // Open sequence discarded; state stays Idle.
                    return None;
                }
                sequence.absorb(tag);
                self.state = AccumulatorState::Accumulating(sequence);
                None
            }
        }
    }
}

fn any_match(patterns: &[NamePattern], name: &str) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

/// Run the accumulator over an unsorted tag collection and collect every
/// completed sequence. Emitted sequences are named after the start pattern.
pub fn find_tag_sequences(
    tags: &[Tag],
    start_name: &str,
    completion_names: &[&str],
    break_names: &[&str],
) -> Vec<Sequence> {
    let sorted = sorted_by_point_frame(tags);
    let mut machine =
        SequenceAccumulator::new(start_name, completion_names, break_names, start_name);

    let mut sequences = Vec::new();
    for tag in &sorted {
        if let Some(sequence) = machine.offer(tag) {
            sequences.push(sequence);
        }
    }
    sequences
}
