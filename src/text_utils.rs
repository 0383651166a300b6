/*!
 * Text helpers shared by the translation and summarization services.
 *
 * - word counting used for summary length bounds
 * - splitting long input into request-sized chunks
 * - stripping the chatter LLMs like to wrap around their answers
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading lines such as "Here is the summary:" or "Translation:"
static PREAMBLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(here(?:'s| is) (?:the|a|your) [^:\n]*:|summary:|translation:|translated text:)\s*")
        .unwrap()
});

/// Markdown code fences wrapping the whole answer
static FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*\n(.*?)\n?\s*```\s*$").unwrap()
});

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A request-sized piece of text and the separator that followed it in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub text: String,
    /// `"\n"` between lines, `" "` inside a split line, empty after the last chunk
    pub separator: &'static str,
}

impl TextChunk {
    fn new(text: impl Into<String>, separator: &'static str) -> Self {
        Self {
            text: text.into(),
            separator,
        }
    }
}

/// Split text into chunks of at most `max_chars` characters, breaking on line boundaries
///
/// Lines longer than `max_chars` are split on spaces; a single word longer than the
/// limit becomes its own chunk. [`join_chunks`] restores the original text.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<TextChunk> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![TextChunk::new(text, "")];
    }

    let mut chunks = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if line_len > max_chars {
            if let Some((chunk, _)) = current.take() {
                chunks.push(TextChunk::new(chunk, "\n"));
            }
            let pieces = split_line_on_spaces(line, max_chars);
            let last = pieces.len().saturating_sub(1);
            for (index, piece) in pieces.into_iter().enumerate() {
                let separator = if index == last { "\n" } else { " " };
                chunks.push(TextChunk::new(piece, separator));
            }
            continue;
        }

        match current.as_mut() {
            // +1 for the newline joining this line to the chunk
            Some((chunk, len)) if *len + 1 + line_len <= max_chars => {
                chunk.push('\n');
                chunk.push_str(line);
                *len += 1 + line_len;
            }
            _ => {
                if let Some((chunk, _)) = current.take() {
                    chunks.push(TextChunk::new(chunk, "\n"));
                }
                current = Some((line.to_string(), line_len));
            }
        }
    }

    match current {
        Some((chunk, _)) => chunks.push(TextChunk::new(chunk, "")),
        None => {
            if let Some(last) = chunks.last_mut() {
                last.separator = "";
            }
        }
    }

    chunks
}

/// Concatenate chunks with the separators recorded by [`split_into_chunks`]
pub fn join_chunks(chunks: &[TextChunk]) -> String {
    chunks.iter().fold(String::new(), |mut joined, chunk| {
        joined.push_str(&chunk.text);
        joined.push_str(chunk.separator);
        joined
    })
}

fn split_line_on_spaces(line: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        match current.as_mut() {
            Some((piece, len)) if *len + 1 + word_len <= max_chars => {
                piece.push(' ');
                piece.push_str(word);
                *len += 1 + word_len;
            }
            _ => {
                if let Some((piece, _)) = current.take() {
                    pieces.push(piece);
                }
                current = Some((word.to_string(), word_len));
            }
        }
    }

    pieces.extend(current.map(|(piece, _)| piece));
    pieces
}

/// Strip code fences, preambles and wrapping quotes from a model answer
pub fn clean_model_output(response: &str) -> String {
    let mut text = response.trim().to_string();

    if let Some(caps) = FENCE_REGEX.captures(&text) {
        text = caps[1].trim().to_string();
    }

    text = PREAMBLE_REGEX.replace(&text, "").trim().to_string();

    let quoted = text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\u{201C}') && text.ends_with('\u{201D}')));
    if quoted && text.chars().filter(|c| matches!(c, '"' | '\u{201C}' | '\u{201D}')).count() == 2 {
        let mut chars = text.chars();
        chars.next();
        chars.next_back();
        text = chars.as_str().trim().to_string();
    }

    text
}
