//! Splits long input text into provider-safe chunks.
//!
//! Paragraph boundaries (blank lines) are preferred split points; a paragraph
//! that alone exceeds the budget is further split on sentence-ending
//! punctuation. A single sentence over the budget is emitted whole, so the
//! budget is a soft target for pathological inputs, never a mid-sentence cut.

use regex::Regex;

/// Split `text` into ordered chunks of at most `max_chars` bytes each
/// (modulo the single-oversized-sentence case).
///
/// Text already within the budget is returned untouched as a single chunk.
pub fn split(text: &str, max_chars: usize) -> Vec<String> {
    if text.len() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut buf = String::new();

    for paragraph in split_paragraphs(text) {
        if paragraph.len() <= max_chars {
            // Whole paragraph fits; join with a blank line inside a buffer.
            if !buf.is_empty() && buf.len() + 2 + paragraph.len() > max_chars {
                flush(&mut buf, &mut chunks);
            }
            if !buf.is_empty() {
                buf.push_str("\n\n");
            }
            buf.push_str(paragraph);
        } else {
            // Oversized paragraph: start it on a fresh buffer and accumulate
            // sentence units, keeping each sentence's own separator.
            if !buf.is_empty() {
                flush(&mut buf, &mut chunks);
            }
            for sentence in split_sentences(paragraph) {
                if !buf.is_empty() && buf.len() + sentence.len() > max_chars {
                    flush(&mut buf, &mut chunks);
                }
                buf.push_str(sentence);
            }
        }
    }

    flush(&mut buf, &mut chunks);

    if chunks.is_empty() {
        // Whitespace-only input yields no paragraphs; pass it through whole.
        chunks.push(text.to_string());
    }

    chunks
}

fn flush(buf: &mut String, chunks: &mut Vec<String>) {
    let trimmed = buf.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    buf.clear();
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    let paragraph_pattern = Regex::new(r"\n\s*\n").unwrap();
    paragraph_pattern
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// Split a paragraph into sentence units, each ending with its punctuation
/// and trailing whitespace so concatenation is lossless.
fn split_sentences(paragraph: &str) -> Vec<&str> {
    let sentence_pattern = Regex::new(r"[.!?]+\s+").unwrap();
    let mut units = Vec::new();
    let mut last_end = 0;

    for mat in sentence_pattern.find_iter(paragraph) {
        units.push(&paragraph[last_end..mat.end()]);
        last_end = mat.end();
    }

    if last_end < paragraph.len() {
        units.push(&paragraph[last_end..]);
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MAX: usize = 4000;

    #[test]
    fn test_split_short_text_returns_input_unchanged() {
        let text = "This is a short text.";
        let chunks = split(text, MAX);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_split_text_exactly_at_budget_is_single_chunk() {
        let text = "a".repeat(MAX);
        let chunks = split(&text, MAX);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_split_respects_max_size() {
        let sentence = "This is a sentence about nothing in particular. ";
        let text = sentence.repeat(300);
        let chunks = split(&text, MAX);

        assert!(chunks.len() > 1, "long text should produce multiple chunks");
        for chunk in &chunks {
            assert!(
                chunk.len() <= MAX,
                "chunk size {} exceeds budget {}",
                chunk.len(),
                MAX
            );
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn test_split_never_cuts_mid_sentence() {
        let sentence = "Every sentence ends with punctuation and a space. ";
        let text = sentence.repeat(250);
        let chunks = split(&text, MAX);

        for chunk in &chunks {
            assert!(
                chunk.ends_with('.'),
                "chunk should end at a sentence boundary: ...{:?}",
                &chunk[chunk.len().saturating_sub(20)..]
            );
        }
    }

    #[test]
    fn test_split_preserves_sentence_content_in_order() {
        let mut text = String::new();
        for i in 0..400 {
            text.push_str(&format!("Sentence number {} has a stable form. ", i));
        }
        let chunks = split(&text, MAX);
        let reconstructed = chunks.join(" ");

        let original_words: Vec<&str> = text.split_whitespace().collect();
        let reconstructed_words: Vec<&str> = reconstructed.split_whitespace().collect();
        assert_eq!(original_words, reconstructed_words);
    }

    #[test]
    fn test_split_paragraphs_before_sentences() {
        let paragraph = "A short paragraph here.";
        let text = vec![paragraph; 400].join("\n\n");
        let chunks = split(&text, MAX);

        for chunk in &chunks {
            assert!(chunk.len() <= MAX);
            // Paragraph joins inside a chunk keep a blank line.
            for part in chunk.split("\n\n") {
                assert_eq!(part, paragraph);
            }
        }
    }

    #[test]
    fn test_split_three_paragraphs_under_budget_each() {
        // Three paragraphs of ~3000 chars each, ~9000 total.
        let sentence = "This paragraph keeps going with steady sentences. ";
        let paragraph = sentence.repeat(60);
        let text = format!("{p}\n\n{p}\n\n{p}", p = paragraph.trim_end());
        assert!(text.len() > 8900);

        let chunks = split(&text, MAX);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.len() <= MAX);
        }
    }

    #[test]
    fn test_split_oversized_sentence_emitted_whole() {
        let oversized = format!("{}.", "word ".repeat(1200).trim_end());
        assert!(oversized.len() > MAX);
        let text = format!("Short lead-in sentence. {} Short tail sentence.", oversized);

        let chunks = split(&text, MAX);
        assert!(
            chunks.iter().any(|c| c.contains(oversized.trim())),
            "oversized sentence must not be cut mid-sentence"
        );
    }

    #[test]
    fn test_split_no_empty_chunks_for_whitespace_heavy_input() {
        let text = format!(
            "First paragraph.\n\n   \n\n{}\n\n\n\nLast paragraph.",
            "Middle sentence repeated. ".repeat(200)
        );
        let chunks = split(&text, MAX);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(!chunk.trim().is_empty());
        }
    }
}
