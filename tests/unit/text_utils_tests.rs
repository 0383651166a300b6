/*!
 * Tests for text helpers
 */

use summarize_pro::text_utils::{clean_model_output, join_chunks, split_into_chunks, word_count};

#[test]
fn test_word_count_withMixedWhitespace_shouldCountTokens() {
    assert_eq!(word_count("Para one.\nPara two."), 4);
    assert_eq!(word_count(" \t\n"), 0);
}

#[test]
fn test_split_into_chunks_withLongText_shouldRespectLimitAndOrder() {
    let lines: Vec<String> = (0..50).map(|i| format!("Line number {} of the document.", i)).collect();
    let text = lines.join("\n");

    let chunks = split_into_chunks(&text, 200);
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|chunk| chunk.text.chars().count() <= 200));
    assert_eq!(join_chunks(&chunks), text);
}

#[test]
fn test_split_into_chunks_withLongSingleParagraph_shouldRejoinUnchanged() {
    let sentence = "The committee reviewed the annual budget and approved the new plan.";
    let paragraph = vec![sentence; 20].join(" ");
    let text = format!("Heading\n{}\nClosing line", paragraph);

    let chunks = split_into_chunks(&text, 120);
    assert!(chunks.len() > 3);
    assert!(chunks.iter().all(|chunk| chunk.text.chars().count() <= 120));
    assert!(chunks.iter().any(|chunk| chunk.separator == " "));
    assert_eq!(chunks.last().map(|chunk| chunk.separator), Some(""));
    assert_eq!(join_chunks(&chunks), text);
}

#[test]
fn test_split_into_chunks_withShortText_shouldReturnSingleChunk() {
    let chunks = split_into_chunks("short", 100);
    assert_eq!(chunks.len(), 1);
    assert_eq!((chunks[0].text.as_str(), chunks[0].separator), ("short", ""));
}

#[test]
fn test_clean_model_output_withChatter_shouldReturnBareAnswer() {
    assert_eq!(clean_model_output("Here is the summary:\nThe cat sat."), "The cat sat.");
    assert_eq!(clean_model_output("```\nBonjour le monde\n```"), "Bonjour le monde");
    assert_eq!(clean_model_output("\"Quoted answer\""), "Quoted answer");
    assert_eq!(clean_model_output("  plain  "), "plain");
}
