/*!
 * Tests for timestamp alignment
 */

use subsync::text_segmenter::TextCue;
use subsync::timestamp_aligner::{
    correct_overlaps, merge_clips, CharacterTimestamp, TimedCue, TimestampAligner, TtsClip,
    FALLBACK_GAP_SECS, MIN_CUE_DURATION_SECS, SECS_PER_CHAR,
};

use crate::common::{assert_monotonic, assert_time_eq, timestamps_for};

/// Test matching looks through stripped punctuation entries
#[test]
fn test_align_withPunctuatedTimestamps_shouldMatchThroughCleanProjection() {
    // "A,B,C": commas carry timing but are dropped from the search key
    let timestamps = vec![
        CharacterTimestamp::new("A", 0.0, 1.0),
        CharacterTimestamp::new(",", 1.0, 1.0),
        CharacterTimestamp::new("B", 1.0, 2.0),
        CharacterTimestamp::new(",", 2.0, 2.0),
        CharacterTimestamp::new("C", 2.0, 3.0),
    ];
    let cues = vec![TextCue::new("B")];

    let aligned = TimestampAligner::new().align(&cues, &timestamps);

    assert_eq!(aligned.len(), 1);
    assert_time_eq(aligned[0].start_time, 1.0);
    assert_time_eq(aligned[0].end_time, 2.0);
}

/// Test matched cues take their times from the original timestamp entries
#[test]
fn test_align_withFullMatch_shouldUseTimestampBounds() {
    let text = "他走进了房间。他看了看四周，然后坐下。";
    let timestamps = timestamps_for(text, 0.2);
    let cues = vec![
        TextCue::new("他走进了房间。"),
        TextCue::new("他看了看四周，然后坐下。"),
    ];

    let aligned = TimestampAligner::new().align(&cues, &timestamps);

    assert_eq!(aligned.len(), 2);
    // First cue spans chars 0-5, second spans chars 7-17
    assert_time_eq(aligned[0].start_time, 0.0);
    assert_time_eq(aligned[0].end_time, 1.2);
    assert_time_eq(aligned[1].start_time, 1.4);
    assert_time_eq(aligned[1].end_time, 3.6);
    assert_monotonic(&aligned);
}

/// Test the heuristic fallback for cues absent from the timestamps
#[test]
fn test_align_withUnmatchedCue_shouldFallBackToHeuristicTiming() {
    let timestamps = timestamps_for("你好呀", 0.5);
    let cues = vec![TextCue::new("你好呀"), TextCue::new("不存在的话")];

    let aligned = TimestampAligner::new().align(&cues, &timestamps);

    assert_eq!(aligned.len(), 2);
    assert_time_eq(aligned[0].end_time, 1.5);
    assert_time_eq(aligned[1].start_time, 1.5 + FALLBACK_GAP_SECS);
    assert_time_eq(
        aligned[1].end_time,
        1.5 + FALLBACK_GAP_SECS + 5.0 * SECS_PER_CHAR,
    );
    assert_monotonic(&aligned);
}

/// Test an unmatched first cue starts at zero
#[test]
fn test_align_withUnmatchedFirstCue_shouldStartAtZero() {
    let timestamps = timestamps_for("完全不同的文本", 0.2);
    let cues = vec![TextCue::new("牛头不对马嘴")];

    let aligned = TimestampAligner::new().align(&cues, &timestamps);

    assert_eq!(aligned.len(), 1);
    assert_time_eq(aligned[0].start_time, 0.0);
    assert_time_eq(aligned[0].end_time, 6.0 * SECS_PER_CHAR);
}

/// Test the local guard shifts a matched cue that starts before its
/// predecessor ends
#[test]
fn test_align_withDriftingTimestamps_shouldShiftOverlappingStart() {
    // TTS drift: the third character starts before the second one ends
    let timestamps = vec![
        CharacterTimestamp::new("你", 0.0, 1.0),
        CharacterTimestamp::new("好", 1.0, 2.0),
        CharacterTimestamp::new("吗", 1.8, 2.5),
        CharacterTimestamp::new("呀", 2.5, 2.7),
    ];
    let cues = vec![TextCue::new("你好"), TextCue::new("吗呀")];

    let aligned = TimestampAligner::new().align(&cues, &timestamps);

    assert_time_eq(aligned[0].end_time, 2.0);
    assert_time_eq(aligned[1].start_time, 2.0 + FALLBACK_GAP_SECS);
    assert_monotonic(&aligned);
}

/// Test the global correction pass removes an injected overlap
#[test]
fn test_correct_overlaps_withOverlappingPair_shouldShiftAndEnforceMinDuration() {
    let mut cues = vec![
        TimedCue {
            text: "他走进了房间。".to_string(),
            start_time: 0.0,
            end_time: 2.0,
        },
        TimedCue {
            text: "他坐下。".to_string(),
            start_time: 1.8,
            end_time: 3.0,
        },
    ];

    correct_overlaps(&mut cues);

    assert_time_eq(cues[1].start_time, 2.0 + FALLBACK_GAP_SECS);
    // 3 stripped chars at the heuristic rate beats the floor
    assert_time_eq(cues[1].end_time, 2.0 + FALLBACK_GAP_SECS + 3.0 * SECS_PER_CHAR);
    assert_monotonic(&cues);
}

/// Test the global pass enforces the minimum duration for short cues
#[test]
fn test_correct_overlaps_withShortOverlappingCue_shouldApplyDurationFloor() {
    let mut cues = vec![
        TimedCue {
            text: "第一句。".to_string(),
            start_time: 0.0,
            end_time: 5.0,
        },
        TimedCue {
            text: "短。".to_string(),
            start_time: 4.9,
            end_time: 5.2,
        },
    ];

    correct_overlaps(&mut cues);

    assert_time_eq(cues[1].start_time, 5.0 + FALLBACK_GAP_SECS);
    assert_time_eq(
        cues[1].end_time,
        5.0 + FALLBACK_GAP_SECS + MIN_CUE_DURATION_SECS,
    );
    assert_monotonic(&cues);
}

/// Test invariants hold over a mixed match/miss sequence
#[test]
fn test_align_withMixedMatchesAndMisses_shouldStayMonotonic() {
    let text = "他走进了房间。他看了看四周。";
    let timestamps = timestamps_for(text, 0.15);
    let cues = vec![
        TextCue::new("他走进了房间。"),
        TextCue::new("凭空出现的句子"),
        TextCue::new("他看了看四周。"),
        TextCue::new("又一句缺席的话"),
    ];

    let aligned = TimestampAligner::new().align(&cues, &timestamps);

    assert_eq!(aligned.len(), 4);
    assert_monotonic(&aligned);
}

/// Test a punctuation-only cue keeps a zero-length heuristic range
#[test]
fn test_align_withPunctuationOnlyCue_shouldKeepZeroLengthRange() {
    let timestamps = timestamps_for("你好", 0.2);
    let cues = vec![TextCue::new("……"), TextCue::new("你好")];

    let aligned = TimestampAligner::new().align(&cues, &timestamps);

    assert_eq!(aligned.len(), 2);
    // No clean characters to match or to price heuristically
    assert_time_eq(aligned[0].start_time, 0.0);
    assert_time_eq(aligned[0].end_time, 0.0);
    // The following cue still gets its genuine timestamp range
    assert_time_eq(aligned[1].start_time, 0.0);
    assert_time_eq(aligned[1].end_time, 0.4);
    assert_monotonic(&aligned);
}

/// Test multi-clip merging applies the running offset
#[test]
fn test_merge_clips_withTwoClips_shouldOffsetSecondClip() {
    let clips = vec![
        TtsClip {
            timestamps: vec![CharacterTimestamp::new("你", 0.0, 1.0)],
            duration: 2.0,
        },
        TtsClip {
            timestamps: vec![CharacterTimestamp::new("好", 0.0, 0.5)],
            duration: 1.0,
        },
    ];

    let merged = merge_clips(&clips);

    assert_eq!(merged.len(), 2);
    assert_time_eq(merged[0].start_time, 0.0);
    assert_time_eq(merged[0].end_time, 1.0);
    assert_time_eq(merged[1].start_time, 2.0);
    assert_time_eq(merged[1].end_time, 2.5);
}

/// Test aligning no cues yields no timed cues
#[test]
fn test_align_withNoCues_shouldReturnEmpty() {
    let timestamps = timestamps_for("你好", 0.2);
    let aligned = TimestampAligner::new().align(&[], &timestamps);
    assert!(aligned.is_empty());
}
