use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::punctuation::{is_punctuation, stripped_len};
use crate::text_segmenter::TextCue;

// @module: Mapping text cues onto TTS character timestamps

/// Gap inserted between cues when a start time has to be invented.
pub const FALLBACK_GAP_SECS: f64 = 0.1;

/// Heuristic speaking rate used when no timestamp match exists.
pub const SECS_PER_CHAR: f64 = 0.3;

/// Minimum duration enforced by the global correction pass.
pub const MIN_CUE_DURATION_SECS: f64 = 0.5;

/// Duration forced onto a cue the correction pass left inverted.
pub const FORCED_DURATION_SECS: f64 = 1.0;

/// Timing for one synthesized character, in document-relative seconds.
///
/// Produced externally by TTS, ordered by position in the narrated text,
/// and immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterTimestamp {
    /// The synthesized character (a single grapheme)
    pub character: String,

    /// Start of the character's audio, in seconds
    pub start_time: f64,

    /// End of the character's audio, in seconds
    pub end_time: f64,
}

impl CharacterTimestamp {
    /// Create a new character timestamp.
    pub fn new<S: Into<String>>(character: S, start_time: f64, end_time: f64) -> Self {
        CharacterTimestamp {
            character: character.into(),
            start_time,
            end_time,
        }
    }
}

/// One TTS invocation's output: clip-local character timestamps plus the
/// clip's audio duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsClip {
    /// Character timestamps, clip-local timeline
    pub timestamps: Vec<CharacterTimestamp>,

    /// Clip audio duration in seconds
    pub duration: f64,
}

/// Concatenate successive clips into one document-relative timestamp
/// sequence by shifting each clip forward by the cumulative duration of
/// the clips before it.
pub fn merge_clips(clips: &[TtsClip]) -> Vec<CharacterTimestamp> {
    let mut merged = Vec::with_capacity(clips.iter().map(|c| c.timestamps.len()).sum());
    let mut offset = 0.0;

    for clip in clips {
        merged.extend(clip.timestamps.iter().map(|ts| CharacterTimestamp {
            character: ts.character.clone(),
            start_time: ts.start_time + offset,
            end_time: ts.end_time + offset,
        }));
        offset += clip.duration;
    }

    merged
}

/// One subtitle cue with its aligned time range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedCue {
    /// Cue text, including punctuation
    pub text: String,

    /// Start time in seconds
    pub start_time: f64,

    /// End time in seconds
    pub end_time: f64,
}

// Punctuation-free view of the timestamp sequence: the clean characters
// plus, for each, the index of the original timestamp entry it came from.
// Keeping the mapping explicit avoids re-deriving clean/original offsets
// during substring search.
struct CleanProjection {
    chars: Vec<char>,
    original_indices: Vec<usize>,
}

impl CleanProjection {
    fn build(timestamps: &[CharacterTimestamp]) -> Self {
        let mut chars = Vec::with_capacity(timestamps.len());
        let mut original_indices = Vec::with_capacity(timestamps.len());

        for (idx, ts) in timestamps.iter().enumerate() {
            for c in ts.character.chars() {
                if !is_punctuation(c) {
                    chars.push(c);
                    original_indices.push(idx);
                }
            }
        }

        CleanProjection {
            chars,
            original_indices,
        }
    }
}

/// Maps ordered text cues onto character timestamps, producing a strictly
/// ordered, non-overlapping timed cue sequence.
///
/// The cues must be an order-preserving segmentation of the same text the
/// timestamps were generated over. Alignment never fails: cues the search
/// cannot locate get heuristic timing, and a final correction pass
/// guarantees monotonic non-overlap regardless of where matching broke.
#[derive(Debug, Default)]
pub struct TimestampAligner;

impl TimestampAligner {
    /// Create a new aligner.
    pub fn new() -> Self {
        TimestampAligner
    }

    /// Align cues against the timestamp sequence.
    ///
    /// Precondition (unchecked): `cues` must be an order-preserving
    /// segmentation of the text `timestamps` was generated over. Cues
    /// from unrelated text still produce output, but every range is
    /// heuristic.
    ///
    /// A cue with no punctuation-stripped characters cannot be matched;
    /// it gets the fallback start and a zero-length range, which the
    /// correction pass widens only if a neighbor overlaps it.
    pub fn align(&self, cues: &[TextCue], timestamps: &[CharacterTimestamp]) -> Vec<TimedCue> {
        let projection = CleanProjection::build(timestamps);
        let mut aligned: Vec<TimedCue> = Vec::with_capacity(cues.len());

        // Forward-only cursor into the clean projection; it never moves
        // backward, so a failed match cannot resurrect consumed text.
        let mut cursor = 0usize;

        for cue in cues {
            let clean: Vec<char> = cue
                .text
                .chars()
                .filter(|c| !is_punctuation(*c))
                .collect();
            let previous_end = aligned.last().map_or(0.0, |c| c.end_time);

            let (mut start, mut end) =
                match find_clean_match(&projection.chars, cursor, &clean) {
                    Some(match_start) => {
                        let match_end = match_start + clean.len() - 1;
                        let start = timestamps[projection.original_indices[match_start]].start_time;
                        let end = timestamps[projection.original_indices[match_end]].end_time;
                        cursor = match_end + 1;
                        (start, end)
                    }
                    None => {
                        debug!(
                            "No timestamp match for cue {:?}, using heuristic timing",
                            cue.text
                        );
                        let start = if aligned.is_empty() {
                            0.0
                        } else {
                            previous_end + FALLBACK_GAP_SECS
                        };
                        (start, start + clean.len() as f64 * SECS_PER_CHAR)
                    }
                };

            // Local overlap guard
            if start < previous_end {
                start = previous_end + FALLBACK_GAP_SECS;
                if start >= end {
                    end = start + clean.len() as f64 * SECS_PER_CHAR;
                }
            }

            aligned.push(TimedCue {
                text: cue.text.clone(),
                start_time: start,
                end_time: end,
            });
        }

        correct_overlaps(&mut aligned);
        aligned
    }
}

/// Find `needle` as a contiguous run in `haystack`, scanning forward from
/// `from`. Empty needles never match.
fn find_clean_match(haystack: &[char], from: usize, needle: &[char]) -> Option<usize> {
    if needle.is_empty() || from + needle.len() > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

/// Second, independent correction pass over an assembled sequence.
///
/// Matched cues are corrected too: TTS timing drift can put a genuine
/// match before its predecessor's end, and the local guard alone cannot
/// see corrections it caused downstream. Public so callers can sanitize
/// timed cue sequences they assembled themselves.
pub fn correct_overlaps(cues: &mut [TimedCue]) {
    for i in 1..cues.len() {
        if cues[i].start_time < cues[i - 1].end_time {
            warn!(
                "Cue {} overlaps its predecessor ({:.2}s < {:.2}s), shifting forward",
                i,
                cues[i].start_time,
                cues[i - 1].end_time
            );

            let start = cues[i - 1].end_time + FALLBACK_GAP_SECS;
            let clean_len = stripped_len(&cues[i].text) as f64;
            let duration = (clean_len * SECS_PER_CHAR).max(MIN_CUE_DURATION_SECS);

            cues[i].start_time = start;
            cues[i].end_time = start + duration;

            if cues[i].start_time >= cues[i].end_time {
                cues[i].end_time = cues[i].start_time + FORCED_DURATION_SECS;
            }
        }
    }
}
