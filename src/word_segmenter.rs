use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pluggable word segmentation for cue packing
///
/// The text segmenter packs word units greedily, so token boundaries decide
/// where a cue may end. A language-aware tokenizer gives natural boundaries;
/// when it is unavailable the engine degrades to one token per character
/// rather than failing.
// Latin/digit runs stay whole, everything else is one token per character.
// The alternation always matches, so tokenization is lossless.
static TOKEN_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?s)[A-Za-z0-9]+|.").ok());

/// A word segmenter splits text into ordered tokens.
///
/// Invariant: concatenating the returned tokens reproduces the input
/// exactly. Segmentation never fails.
pub trait WordSegmenter: Send + Sync {
    /// Split text into word units, preserving order and content.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Regex-driven tokenizer: keeps Latin word runs together and emits one
/// token per CJK (or other) character.
pub struct LexicalSegmenter {
    pattern: &'static Regex,
}

impl LexicalSegmenter {
    /// Build a lexical segmenter, or `None` if the token pattern failed
    /// to compile.
    pub fn try_new() -> Option<Self> {
        TOKEN_PATTERN.as_ref().map(|pattern| LexicalSegmenter { pattern })
    }
}

impl WordSegmenter for LexicalSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Fallback tokenizer: one token per character. Always available.
pub struct CharacterSegmenter;

impl WordSegmenter for CharacterSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::with_capacity(text.chars().count());
        let mut indices = text.char_indices().peekable();
        while let Some((start, _)) = indices.next() {
            let end = indices.peek().map_or(text.len(), |(next, _)| *next);
            tokens.push(&text[start..end]);
        }
        tokens
    }
}

/// Default segmenter selection: lexical when available, character-level
/// otherwise. Never errors.
pub fn default_segmenter() -> Box<dyn WordSegmenter> {
    match LexicalSegmenter::try_new() {
        Some(segmenter) => Box::new(segmenter),
        None => {
            warn!("Lexical tokenizer unavailable, falling back to per-character segmentation");
            Box::new(CharacterSegmenter)
        }
    }
}
