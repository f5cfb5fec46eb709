use anyhow::Result;
use log::debug;

use crate::engine_config::EngineConfig;
use crate::errors::EngineError;
use crate::subtitle_renderer::SubtitleRenderer;
use crate::text_segmenter::TextSegmenter;
use crate::timestamp_aligner::{CharacterTimestamp, TimedCue, TimestampAligner};
use crate::word_segmenter::WordSegmenter;

// @module: Pipeline facade running segmentation, alignment and rendering

/// The subtitle engine: narration text plus character timestamps in, a
/// rendered subtitle document out.
///
/// A pure, synchronous computation with no shared mutable state; one
/// engine per concurrent pipeline is safe, and so is sharing one across
/// threads since every call operates only on its own inputs.
pub struct SubtitleEngine {
    config: EngineConfig,
    segmenter: TextSegmenter,
    aligner: TimestampAligner,
    renderer: SubtitleRenderer,
}

impl Default for SubtitleEngine {
    fn default() -> Self {
        SubtitleEngine::new()
    }
}

impl SubtitleEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        SubtitleEngine::with_config(EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        SubtitleEngine {
            config,
            segmenter: TextSegmenter::new(),
            aligner: TimestampAligner::new(),
            renderer: SubtitleRenderer::new(),
        }
    }

    /// Create an engine with an explicit word segmenter, for callers that
    /// bring their own tokenizer.
    pub fn with_word_segmenter(
        config: EngineConfig,
        word_segmenter: Box<dyn WordSegmenter>,
    ) -> Self {
        SubtitleEngine {
            config,
            segmenter: TextSegmenter::with_word_segmenter(word_segmenter),
            aligner: TimestampAligner::new(),
            renderer: SubtitleRenderer::new(),
        }
    }

    /// Segment narration text and align the cues against the timestamp
    /// sequence.
    ///
    /// Empty text yields an empty cue sequence. Non-empty text with an
    /// empty timestamp sequence is a caller contract violation: alignment
    /// against zero timestamps cannot proceed, and inventing a timeline
    /// here would mask an upstream TTS failure.
    pub fn generate_cues(
        &self,
        text: &str,
        timestamps: &[CharacterTimestamp],
    ) -> Result<Vec<TimedCue>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        if timestamps.is_empty() {
            return Err(EngineError::EmptyTimestamps.into());
        }

        let cues = self.segmenter.segment(text, self.config.max_cue_length)?;
        debug!(
            "Segmented {} chars into {} cues, aligning against {} timestamps",
            text.chars().count(),
            cues.len(),
            timestamps.len()
        );

        Ok(self.aligner.align(&cues, timestamps))
    }

    /// Run the full pipeline and render the subtitle document.
    pub fn generate(
        &self,
        text: &str,
        timestamps: &[CharacterTimestamp],
        title: &str,
    ) -> Result<String> {
        let cues = self.generate_cues(text, timestamps)?;
        Ok(self.renderer.render(&cues, title))
    }
}
