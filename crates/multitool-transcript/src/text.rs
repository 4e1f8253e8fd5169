//! Head/middle/tail sectioning of long text
//!
//! Long transcripts are reduced to three excerpts that fit a character
//! budget: 40% from the beginning, 20% around the middle sentence and 40%
//! from the end. Lengths are counted in characters, not bytes.

use std::sync::LazyLock;

use regex::Regex;

/// Sentence boundary: terminal punctuation followed by whitespace.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Number of sentences scanned on each side of the midpoint.
const MIDDLE_WINDOW: usize = 5;

/// Reduce `text` to a labeled beginning/middle/end excerpt of roughly
/// `max_length` characters.
///
/// Text that already fits is returned unchanged.
pub fn sectionize(text: &str, max_length: usize) -> String {
    let total = char_len(text);
    if total <= max_length {
        return text.to_string();
    }

    let sentences = split_sentences(text);

    let head_cap = max_length * 2 / 5;
    let mut head = String::new();
    for sentence in &sentences {
        if char_len(&head) + char_len(sentence) < head_cap {
            head.push_str(sentence);
            head.push(' ');
        } else {
            break;
        }
    }

    // The window is scanned in order and every sentence that still fits is
    // taken, so the excerpt may skip over long sentences.
    let middle_cap = max_length / 5;
    let mut middle = String::new();
    let mid = sentences.len() / 2;
    let window = mid.saturating_sub(MIDDLE_WINDOW)..sentences.len().min(mid + MIDDLE_WINDOW);
    for sentence in &sentences[window] {
        if char_len(&middle) + char_len(sentence) < middle_cap {
            middle.push_str(sentence);
            middle.push(' ');
        }
    }

    let tail_cap = max_length * 2 / 5;
    let mut tail_parts: Vec<&str> = Vec::new();
    let mut tail_len = 0;
    for sentence in sentences.iter().rev() {
        let len = char_len(sentence);
        if tail_len + len < tail_cap {
            tail_parts.push(sentence);
            tail_len += len + 1;
        } else {
            break;
        }
    }
    tail_parts.reverse();
    let tail: String = tail_parts.iter().map(|s| format!("{s} ")).collect();

    let omitted = total.saturating_sub(char_len(&head) + char_len(&middle) + char_len(&tail));

    [
        "**[Beginning]**".to_string(),
        head.trim().to_string(),
        String::new(),
        format!("... *about {} characters omitted* ...", group_digits(omitted)),
        String::new(),
        "**[Middle]**".to_string(),
        middle.trim().to_string(),
        String::new(),
        "... *omitted* ...".to_string(),
        String::new(),
        "**[End]**".to_string(),
        tail.trim().to_string(),
    ]
    .join("\n")
}

/// Split at whitespace runs that follow `.`, `!` or `?`.
///
/// The punctuation stays with its sentence and the whitespace is dropped.
/// Trailing whitespace after the final sentence yields an empty last piece.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Punctuation is ASCII, so start + 1 is a char boundary.
        sentences.push(&text[last..boundary.start() + 1]);
        last = boundary.end();
    }
    sentences.push(&text[last..]);
    sentences
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Format an integer with `,` thousands separators.
pub fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_returned_unchanged() {
        assert_eq!(sectionize("Hello there.", 200), "Hello there.");
        assert_eq!(sectionize("", 200), "");
    }

    #[test]
    fn exact_budget_is_identity() {
        let text = "a".repeat(300);
        assert_eq!(sectionize(&text, 300), text);
    }

    #[test]
    fn split_keeps_punctuation_and_drops_whitespace() {
        let parts = split_sentences("One. Two!  Three?\nFour");
        assert_eq!(parts, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn split_trailing_whitespace_yields_empty_piece() {
        let parts = split_sentences("One. Two. ");
        assert_eq!(parts, vec!["One.", "Two.", ""]);
    }

    #[test]
    fn split_ignores_punctuation_without_whitespace() {
        let parts = split_sentences("v1.2.3 is out. Yes");
        assert_eq!(parts, vec!["v1.2.3 is out.", "Yes"]);
    }

    #[test]
    fn unsplittable_text_omits_everything() {
        let text = "x".repeat(500);
        let out = sectionize(&text, 200);
        assert!(out.contains("about 500 characters omitted"));
        assert!(out.starts_with("**[Beginning]**\n\n"));
        assert!(out.ends_with("**[End]**\n"));
    }

    #[test]
    fn sections_take_from_both_ends() {
        let sentences: Vec<String> = (0..40).map(|i| format!("Sentence number {i:02}.")).collect();
        let text = sentences.join(" ");
        let out = sectionize(&text, 200);

        let head = out.split("**[Middle]**").next().unwrap();
        assert!(head.contains("Sentence number 00."));
        assert!(!head.contains("Sentence number 39."));

        let tail = out.split("**[End]**").nth(1).unwrap();
        assert!(tail.contains("Sentence number 39."));
        assert!(!tail.contains("Sentence number 00."));
    }

    #[test]
    fn middle_comes_from_around_the_midpoint() {
        let sentences: Vec<String> = (0..40).map(|i| format!("Sentence number {i:02}.")).collect();
        let text = sentences.join(" ");
        let out = sectionize(&text, 200);

        let middle = out
            .split("**[Middle]**")
            .nth(1)
            .unwrap()
            .split("... *omitted* ...")
            .next()
            .unwrap();
        // Window starts at index 15 (20 - 5); budget is 40 chars so two fit.
        assert_eq!(middle.trim(), "Sentence number 15. Sentence number 16.");
    }

    #[test]
    fn group_digits_inserts_separators() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(1234567), "1,234,567");
    }
}
