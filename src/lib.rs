/*!
 * # subsync - Subtitle Segmentation & Synchronization Engine
 *
 * A Rust library that converts narrated text plus per-character
 * speech-synthesis timestamps into a synchronized subtitle track.
 *
 * ## Features
 *
 * - Split narration text into natural, length-bounded subtitle cues
 * - Map cues onto character-level TTS timestamps with drift-tolerant
 *   substring matching
 * - Guarantee strictly ordered, non-overlapping cue timing even when
 *   alignment fails mid-sequence
 * - Render cues into an ASS (Advanced SubStation Alpha) document
 * - Merge multi-clip TTS output into one document-relative timeline
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `punctuation`: Fixed punctuation tables and stripped-length helpers
 * - `word_segmenter`: Pluggable tokenization with an infallible fallback
 * - `text_segmenter`: Narration text to ordered text-only cues
 * - `timestamp_aligner`: Text cues to timed cues via clean-projection
 *   matching and overlap correction
 * - `subtitle_renderer`: Timed cues to an ASS subtitle document
 * - `engine`: Pipeline facade running the three stages in sequence
 * - `engine_config`: Configuration management
 * - `errors`: Custom error types for the engine
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod engine;
pub mod engine_config;
pub mod errors;
pub mod punctuation;
pub mod subtitle_renderer;
pub mod text_segmenter;
pub mod timestamp_aligner;
pub mod word_segmenter;

// Re-export main types for easier usage
pub use engine::SubtitleEngine;
pub use engine_config::EngineConfig;
pub use errors::{AlignmentError, EngineError, SegmentationError};
pub use subtitle_renderer::{SubtitleRenderer, DEFAULT_TITLE};
pub use text_segmenter::{TextCue, TextSegmenter, DEFAULT_MAX_CUE_LENGTH};
pub use timestamp_aligner::{
    correct_overlaps, merge_clips, CharacterTimestamp, TimedCue, TimestampAligner, TtsClip,
};
pub use word_segmenter::{default_segmenter, CharacterSegmenter, LexicalSegmenter, WordSegmenter};
