//! Name patterns and the bounded-pair sequence matcher.
//!
//! Two match strategies exist side by side on purpose: the pair matcher
//! compares tag names by exact equality, while the accumulator matches by
//! substring containment. Callers rely on the difference (prefix matching
//! of `home_touch_` vs exact `game_start`), so the strategy is an explicit
//! type rather than a convention, and the two algorithms stay separate.

use super::{Sequence, sorted_by_point_frame};
use filmroom_types::Tag;

/// How a pattern string is compared against a tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    /// Whole-name equality.
    Exact(String),
    /// Substring containment anywhere in the name.
    Contains(String),
}

impl NamePattern {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    pub fn contains(fragment: impl Into<String>) -> Self {
        Self::Contains(fragment.into())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => name == expected,
            Self::Contains(fragment) => name.contains(fragment.as_str()),
        }
    }
}

/// Find every maximal non-overlapping `[start, end]` tag pair.
///
/// Tags are scanned in ascending point-frame order. A start tag whose frame
/// falls inside an already-accepted sequence is skipped. From each accepted
/// start, the first tag named `end_name` closes the candidate; if any tag
/// strictly between them is named in `exclude_names` the candidate is
/// discarded outright (not retried with a later end tag). Starts with no
/// end tag produce nothing.
///
/// Output sequences carry only the interval, no touches.
pub fn find_valid_sequences(
    tags: &[Tag],
    start_name: &str,
    end_name: &str,
    exclude_names: &[&str],
    output_name: &str,
) -> Vec<Sequence> {
    let sorted = sorted_by_point_frame(tags);
    let mut sequences: Vec<Sequence> = Vec::new();

    for (start_idx, start_tag) in sorted.iter().enumerate() {
        if start_tag.name != start_name {
            continue;
        }

        let start_frame = start_tag.point_frame();
        let nested = sequences
            .iter()
            .any(|seq| start_frame >= seq.start_frame && start_frame <= seq.end_frame);
        if nested {
            continue;
        }

        for (offset, candidate) in sorted[start_idx + 1..].iter().enumerate() {
            if candidate.name != end_name {
                continue;
            }

            let between = &sorted[start_idx + 1..start_idx + 1 + offset];
            let excluded = between
                .iter()
                .any(|tag| exclude_names.contains(&tag.name.as_str()));
            if !excluded {
                sequences.push(Sequence::span(
                    output_name,
                    start_frame,
                    candidate.point_frame(),
                ));
            }
            // The first end tag decides the candidate either way.
            break;
        }
    }

    sequences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_pattern_strategies_differ() {
        assert!(NamePattern::exact("home_touch_attacking").matches("home_touch_attacking"));
        assert!(!NamePattern::exact("home_touch_").matches("home_touch_attacking"));
        assert!(NamePattern::contains("home_touch_").matches("home_touch_attacking"));
        assert!(!NamePattern::contains("away_touch_").matches("home_touch_attacking"));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let sequences = find_valid_sequences(&[], "a", "b", &[], "out");
        assert!(sequences.is_empty());
    }

    #[test]
    fn single_pair_is_matched() {
        let tags = vec![
            Tag::point("home_attacking", 100),
            Tag::point("home_score", 150),
        ];
        let sequences =
            find_valid_sequences(&tags, "home_attacking", "home_score", &["away_attacking"], "possession");
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].start_frame, 100);
        assert_eq!(sequences[0].end_frame, 150);
        assert_eq!(sequences[0].name, "possession");
        assert!(sequences[0].touches.is_empty());
    }

    #[test]
    fn exclusion_between_start_and_end_discards_candidate() {
        let tags = vec![
            Tag::point("home_attacking", 100),
            Tag::point("away_attacking", 125),
            Tag::point("home_score", 150),
        ];
        let sequences =
            find_valid_sequences(&tags, "home_attacking", "home_score", &["away_attacking"], "possession");
        assert!(sequences.is_empty());
    }

    #[test]
    fn unsorted_input_yields_frame_ordered_results() {
        let tags = vec![
            Tag::point("end", 400),
            Tag::point("start", 300),
            Tag::point("end", 150),
            Tag::point("start", 100),
        ];
        let sequences = find_valid_sequences(&tags, "start", "end", &[], "run");
        assert_eq!(sequences.len(), 2);
        assert_eq!(
            (sequences[0].start_frame, sequences[0].end_frame),
            (100, 150)
        );
        assert_eq!(
            (sequences[1].start_frame, sequences[1].end_frame),
            (300, 400)
        );
    }

    #[test]
    fn start_inside_accepted_sequence_is_skipped() {
        let tags = vec![
            Tag::point("start", 100),
            Tag::point("start", 120),
            Tag::point("end", 150),
            Tag::point("end", 180),
        ];
        let sequences = find_valid_sequences(&tags, "start", "end", &[], "run");
        // The second start at 120 falls inside [100, 150] and must not
        // open a nested sequence.
        assert_eq!(sequences.len(), 1);
        assert_eq!(
            (sequences[0].start_frame, sequences[0].end_frame),
            (100, 150)
        );
    }

    #[test]
    fn dangling_start_is_dropped() {
        let tags = vec![
            Tag::point("start", 100),
            Tag::point("end", 150),
            Tag::point("start", 200),
        ];
        let sequences = find_valid_sequences(&tags, "start", "end", &[], "run");
        assert_eq!(sequences.len(), 1);
    }

    #[test]
    fn output_is_sorted_and_non_overlapping() {
        let tags = vec![
            Tag::point("start", 500),
            Tag::point("end", 700),
            Tag::point("start", 10),
            Tag::point("end", 90),
            Tag::point("start", 600),
            Tag::point("start", 95),
            Tag::point("end", 400),
        ];
        let sequences = find_valid_sequences(&tags, "start", "end", &[], "run");
        for pair in sequences.windows(2) {
            assert!(pair[0].start_frame <= pair[1].start_frame);
            assert!(pair[1].start_frame > pair[0].end_frame);
        }
    }
}
