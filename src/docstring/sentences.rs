//! Sentence segmentation
//!
//! The conciseness metric needs descriptions split into sentences. The
//! segmenter is a service trait so a smarter tokenizer can be plugged in; the
//! default is a rule-based splitter that handles common abbreviations and
//! decimal numbers.

use lazy_static::lazy_static;
use regex::Regex;

/// Splits free text into an ordered list of sentences.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+[\s]").expect("static regex");
}

/// Abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "cf", "al", "approx", "dr", "mr", "mrs", "ms", "no", "fig", "eq",
    "sec", "min", "max", "resp",
];

/// Rule-based sentence splitter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    /// Whether the text ending at `end` (exclusive of the punctuation run)
    /// finishes with an abbreviation or a single-letter initial.
    fn ends_with_abbreviation(prefix: &str) -> bool {
        let last_word = prefix
            .rsplit(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("");
        let last_word = last_word.trim_end_matches('.');
        if last_word.len() == 1 && last_word.chars().all(|c| c.is_alphabetic()) {
            return true;
        }
        let lowered = last_word.to_lowercase();
        ABBREVIATIONS.iter().any(|abbr| lowered == *abbr)
    }

    fn is_decimal_break(text: &str, punct_start: usize, punct_end: usize) -> bool {
        let before_digit = text[..punct_start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit());
        let after_digit = text[punct_end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());
        before_digit && after_digit
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let mut sentences = Vec::new();
        let mut start = 0;
        for m in SENTENCE_END.find_iter(text) {
            let punct_start = m.start();
            let prefix = &text[start..punct_start];
            if Self::ends_with_abbreviation(prefix)
                || Self::is_decimal_break(text, punct_start, m.end())
            {
                continue;
            }
            let sentence = text[start..m.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = m.end();
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        sentences
    }
}
