use std::collections::HashMap;
use anyhow::Result;
use log::debug;
use once_cell::sync::Lazy;

use crate::errors::SegmentationError;
use crate::punctuation::{self, stripped_len};
use crate::word_segmenter::{default_segmenter, WordSegmenter};

// @module: Narration text segmentation into length-bounded subtitle cues

/// Default target maximum punctuation-stripped length per cue.
pub const DEFAULT_MAX_CUE_LENGTH: usize = 12;

// Grammatical particles that mark a natural break inside a clause, with a
// relative priority. Punctuation outranks all of them.
static BREAK_PARTICLES: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    HashMap::from([
        ('的', 3),
        ('了', 3),
        ('着', 2),
        ('地', 2),
        ('得', 2),
        ('是', 1),
        ('在', 1),
        ('和', 1),
        ('与', 1),
        ('或', 1),
        ('就', 1),
        ('而', 1),
    ])
});

/// Split stage: which separator set drives the sentence split.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SplitStage {
    /// Sentence terminators (full stop, exclamation, question mark, ...)
    Primary,
    /// Clause separators (comma, enumeration comma, semicolon)
    Secondary,
}

/// One text-only subtitle cue, in narration order.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCue {
    /// Cue text, including its punctuation
    pub text: String,
}

impl TextCue {
    /// Create a new text cue.
    pub fn new<S: Into<String>>(text: S) -> Self {
        TextCue { text: text.into() }
    }

    /// Punctuation-stripped length of the cue text, in characters.
    pub fn stripped_len(&self) -> usize {
        stripped_len(&self.text)
    }
}

/// Splits narration text into natural, length-bounded cues.
///
/// The word segmenter is chosen at construction time and decides the token
/// boundaries available to the greedy packer; it never fails (see
/// [`crate::word_segmenter`]).
pub struct TextSegmenter {
    word_segmenter: Box<dyn WordSegmenter>,
}

impl Default for TextSegmenter {
    fn default() -> Self {
        TextSegmenter::new()
    }
}

impl TextSegmenter {
    /// Create a segmenter with the default word segmenter.
    pub fn new() -> Self {
        TextSegmenter {
            word_segmenter: default_segmenter(),
        }
    }

    /// Create a segmenter with an explicit word segmenter.
    pub fn with_word_segmenter(word_segmenter: Box<dyn WordSegmenter>) -> Self {
        TextSegmenter { word_segmenter }
    }

    /// Split narration text into ordered cues whose punctuation-stripped
    /// length stays within `max_len` (except single tokens longer than the
    /// budget, which are hard-split into `max_len`-character pieces).
    ///
    /// Empty input yields an empty sequence. `max_len == 0` is a caller
    /// contract violation.
    pub fn segment(&self, text: &str, max_len: usize) -> Result<Vec<TextCue>> {
        if max_len == 0 {
            return Err(SegmentationError::InvalidMaxLength(max_len).into());
        }
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut chunks = split_sentences(text, SplitStage::Primary);

        // A single long run with no sentence terminators: retry on clause
        // separators so the packer gets natural boundaries to work with.
        if chunks.len() < 2 && stripped_len(text) > 2 * max_len {
            debug!(
                "Primary split produced {} chunk(s) for {} stripped chars, retrying with clause separators",
                chunks.len(),
                stripped_len(text)
            );
            chunks = split_sentences(text, SplitStage::Secondary);
        }

        let mut cues = Vec::new();
        for chunk in chunks {
            if stripped_len(&chunk) <= max_len {
                cues.push(TextCue::new(chunk));
            } else {
                self.pack_tokens(&chunk, max_len, &mut cues);
            }
        }

        Ok(post_filter(cues, max_len))
    }

    /// Greedily pack word tokens into cues of at most `max_len` stripped
    /// characters.
    fn pack_tokens(&self, chunk: &str, max_len: usize, cues: &mut Vec<TextCue>) {
        let tokens = self.word_segmenter.segment(chunk);
        let mut buffer = String::new();
        let mut buffer_len = 0usize;

        for token in tokens {
            let token_len = stripped_len(token);

            // A single token over the budget cannot be packed; flush and
            // hard-split it into fixed-size pieces.
            if token_len > max_len {
                if !buffer.is_empty() {
                    cues.push(TextCue::new(std::mem::take(&mut buffer)));
                    buffer_len = 0;
                }
                hard_split(token, max_len, cues);
                continue;
            }

            if buffer_len + token_len > max_len && !buffer.is_empty() {
                // A natural break candidate is looked up, but the flush
                // stays at the token boundary.
                // TODO: split the flushed cue at `_natural_break` and carry
                // the tail into the next buffer.
                let _natural_break = find_natural_break(&buffer);
                cues.push(TextCue::new(std::mem::take(&mut buffer)));
                buffer_len = 0;
            }

            buffer.push_str(token);
            buffer_len += token_len;
        }

        if !buffer.is_empty() {
            cues.push(TextCue::new(buffer));
        }
    }
}

/// Split text into chunks at the separators of the given stage, keeping
/// each separator (and any trailing closing marks) attached to the chunk
/// it closes.
fn split_sentences(text: &str, stage: SplitStage) -> Vec<String> {
    let is_boundary = |c: char| match stage {
        SplitStage::Primary => punctuation::is_primary_terminator(c),
        SplitStage::Secondary => punctuation::is_secondary_separator(c),
    };

    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        buffer.push(c);
        if is_boundary(c) {
            // Absorb separator runs ("……", "！？") and closing quotes so
            // the next chunk never opens with stray punctuation.
            while let Some(&next) = chars.peek() {
                if is_boundary(next) || punctuation::is_closing_mark(next) {
                    buffer.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            chunks.push(std::mem::take(&mut buffer));
        }
    }
    if !buffer.is_empty() {
        chunks.push(buffer);
    }

    chunks
}

/// Hard-split an over-long token into `max_len`-character pieces.
fn hard_split(token: &str, max_len: usize, cues: &mut Vec<TextCue>) {
    let chars: Vec<char> = token.chars().collect();
    for piece in chars.chunks(max_len) {
        cues.push(TextCue::new(piece.iter().collect::<String>()));
    }
}

/// Scan a buffer backward for the best natural break: punctuation first,
/// then grammatical particles by priority. Returns the char index of the
/// break character, or `None` when the buffer has no candidate.
fn find_natural_break(buffer: &str) -> Option<usize> {
    let chars: Vec<char> = buffer.chars().collect();
    let mut best: Option<(usize, u8)> = None;

    for (idx, c) in chars.iter().enumerate().rev() {
        let priority = if punctuation::is_punctuation(*c) {
            4
        } else {
            BREAK_PARTICLES.get(c).copied().unwrap_or(0)
        };
        if priority > 0 {
            match best {
                Some((_, found)) if found >= priority => {}
                _ => best = Some((idx, priority)),
            }
        }
    }

    best.map(|(idx, _)| idx)
}

/// Drop whitespace-only cues and fold single-character cues into a
/// neighbor. Content is never silently dropped: a tiny cue with no
/// previous cue (or whose previous cue is already over budget) is
/// prefixed onto the next non-empty one, and an input that reduces to
/// one character stays a standalone cue.
///
/// Backward merges are capped so orphans cannot chain onto one cue:
/// interior cues end up at most one stripped character over `max_len`,
/// and only the final cue can absorb a trailing orphan on top of that.
/// Cues whose stripped length is zero (punctuation-only chunks) pass
/// through unchanged.
fn post_filter(cues: Vec<TextCue>, max_len: usize) -> Vec<TextCue> {
    let mut result: Vec<TextCue> = Vec::with_capacity(cues.len());
    let mut carry: Option<String> = None;

    for cue in cues {
        if cue.text.trim().is_empty() {
            continue;
        }

        let mut text = cue.text;
        if let Some(prefix) = carry.take() {
            text = prefix + &text;
        }

        if stripped_len(&text) == 1 {
            match result.last_mut() {
                // Fold backward while the budget allows; a cue that has
                // already absorbed an orphan is full, later orphans wait
                // for the next cue.
                Some(previous) if stripped_len(&previous.text) <= max_len => {
                    previous.text.push_str(&text);
                }
                _ => carry = Some(text),
            }
        } else {
            result.push(TextCue::new(text));
        }
    }

    if let Some(rest) = carry {
        match result.last_mut() {
            // Nothing follows a trailing orphan, so it folds into the
            // last cue even when that pushes it past the budget.
            Some(previous) => previous.text.push_str(&rest),
            None => result.push(TextCue::new(rest)),
        }
    }

    result
}
