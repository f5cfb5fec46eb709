use std::collections::HashSet;
use once_cell::sync::Lazy;

/// Punctuation tables shared by the segmenter and the aligner
///
/// Length budgets and alignment search keys are always computed on
/// punctuation-stripped text; the rendered output keeps the punctuation.
/// Sentence terminators used for the first-stage split, in priority order.
/// The terminator stays attached to the end of the chunk it closes.
pub const PRIMARY_TERMINATORS: &[char] = &[
    '。', '．', '.', '！', '!', '？', '?', '；', ';', '…', '：', ':',
];

/// Clause separators used for the second-stage split when the primary
/// set produces too few chunks for a long text.
pub const SECONDARY_SEPARATORS: &[char] = &['，', ',', '、', '；', ';'];

/// Closing quotes/brackets that trail a terminator and belong to the
/// chunk the terminator just closed.
pub const CLOSING_MARKS: &[char] = &[
    '”', '’', '》', '〉', '」', '』', '）', '】', '"', '\'', ')', ']', '}',
];

// Full punctuation set: CJK sentence/clause marks, CJK quotes and
// brackets, and common ASCII punctuation.
static PUNCTUATION: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(PRIMARY_TERMINATORS.iter().copied());
    set.extend(SECONDARY_SEPARATORS.iter().copied());
    set.extend(CLOSING_MARKS.iter().copied());
    set.extend([
        '“', '‘', '《', '〈', '「', '『', '（', '【', '—', '～', '·', '、',
    ]);
    set.extend("!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~".chars());
    set
});

/// Check whether a character belongs to the punctuation set.
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Remove all punctuation characters from a string.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !is_punctuation(*c)).collect()
}

/// Punctuation-stripped length of a string, in characters.
pub fn stripped_len(text: &str) -> usize {
    text.chars().filter(|c| !is_punctuation(*c)).count()
}

/// Check whether a character is a primary sentence terminator.
pub fn is_primary_terminator(c: char) -> bool {
    PRIMARY_TERMINATORS.contains(&c)
}

/// Check whether a character is a secondary clause separator.
pub fn is_secondary_separator(c: char) -> bool {
    SECONDARY_SEPARATORS.contains(&c)
}

/// Check whether a character is a closing quote or bracket.
pub fn is_closing_mark(c: char) -> bool {
    CLOSING_MARKS.contains(&c)
}
