/*!
 * Tests for the punctuation tables and stripped-length helpers
 */

use subsync::punctuation::{
    is_closing_mark, is_primary_terminator, is_punctuation, is_secondary_separator,
    strip_punctuation, stripped_len,
};

/// Test punctuation set membership for CJK and ASCII marks
#[test]
fn test_is_punctuation_withMixedMarks_shouldClassifyCorrectly() {
    assert!(is_punctuation('。'));
    assert!(is_punctuation('，'));
    assert!(is_punctuation('！'));
    assert!(is_punctuation('“'));
    assert!(is_punctuation('》'));
    assert!(is_punctuation('.'));
    assert!(is_punctuation(','));
    assert!(is_punctuation('"'));

    assert!(!is_punctuation('他'));
    assert!(!is_punctuation('A'));
    assert!(!is_punctuation('7'));
    assert!(!is_punctuation(' '));
}

/// Test terminator and separator classification
#[test]
fn test_separator_classes_withKnownMarks_shouldMatchTheirSets() {
    assert!(is_primary_terminator('。'));
    assert!(is_primary_terminator('？'));
    assert!(is_primary_terminator('…'));
    assert!(!is_primary_terminator('，'));

    assert!(is_secondary_separator('，'));
    assert!(is_secondary_separator('、'));
    assert!(!is_secondary_separator('。'));

    assert!(is_closing_mark('”'));
    assert!(is_closing_mark('）'));
    assert!(!is_closing_mark('“'));
}

/// Test punctuation stripping on mixed text
#[test]
fn test_strip_punctuation_withMixedText_shouldRemoveOnlyPunctuation() {
    assert_eq!(strip_punctuation("他说：“好。”"), "他说好");
    assert_eq!(strip_punctuation("Hello, world!"), "Hello world");
    assert_eq!(strip_punctuation("。，！？"), "");
    assert_eq!(strip_punctuation(""), "");
}

/// Test stripped length counts characters, not bytes
#[test]
fn test_stripped_len_withCjkText_shouldCountChars() {
    assert_eq!(stripped_len("他走进了房间。"), 6);
    assert_eq!(stripped_len("他看了看四周，然后坐下。"), 10);
    assert_eq!(stripped_len("，。"), 0);
}
