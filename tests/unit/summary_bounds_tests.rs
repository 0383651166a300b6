/*!
 * Tests for summary length bounds
 */

use summarize_pro::summarization::{SummaryBounds, MIN_SUMMARY_WORDS};

use crate::common::repeated_words;

#[test]
fn test_bounds_forText_withHundredWordsAtHalf_shouldBeFiftyAndTwentyFive() {
    let bounds = SummaryBounds::for_text(&repeated_words("word", 100), 50);
    assert_eq!(bounds, SummaryBounds { max_length: 50, min_length: 25 });
}

#[test]
fn test_bounds_withEveryPercentage_shouldFollowFloorFormula() {
    for word_count in [0, 1, 19, 20, 39, 40, 41, 99, 100, 1_000, 12_345] {
        for percentage in 10..=100u8 {
            let bounds = SummaryBounds::from_word_count(word_count, percentage);
            let expected_max = word_count * percentage as usize / 100;
            assert_eq!(bounds.max_length, expected_max);
            assert_eq!(bounds.min_length, (expected_max / 2).max(MIN_SUMMARY_WORDS));
            if bounds.max_length >= 20 {
                assert!(bounds.min_length <= bounds.max_length);
            }
        }
    }
}

#[test]
fn test_bounds_withShortInput_shouldKeepMinimumAboveMaximum() {
    let bounds = SummaryBounds::from_word_count(10, 100);
    assert_eq!(bounds, SummaryBounds { max_length: 10, min_length: 10 });
    assert!(bounds.is_consistent());

    let inverted = SummaryBounds::from_word_count(5, 10);
    assert_eq!(inverted, SummaryBounds { max_length: 0, min_length: 10 });
    assert!(!inverted.is_consistent());
}

#[test]
fn test_bounds_forText_withIrregularWhitespace_shouldCountWords() {
    let bounds = SummaryBounds::for_text("  alpha\tbeta\n\ngamma  delta ", 50);
    assert_eq!(bounds.max_length, 2);
}
