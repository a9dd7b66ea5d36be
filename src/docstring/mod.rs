//! Docstring segmentation and structured parsing
//!
//! Splits a documentation block into its free-text description and its
//! structured-tag portion, and parses the tags of the four common docstring
//! conventions (ReST, Google, NumPy, Epytext). One convention is assumed per
//! docstring; mixed docstrings get best-effort results from whichever markers
//! appear first.

mod parser;
pub mod sentences;

pub use parser::{parse_docstring, DocConvention, ParsedDocstring};
pub use sentences::{RuleSegmenter, SentenceSegmenter};

use dashmap::DashMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    /// Markers that end the free-text description and start the structured
    /// section, across all four conventions plus interactive-example blocks.
    static ref DOC_TAG_PATTERN: Regex = Regex::new(
        r"(?im)^[ \t]*(:param|:returns?|:raises?|:rtype|examples?:|parameters\b|returns\b|raises\b|args\b|kwargs\b|yields\b|attributes\b|@param|@return|>>>)"
    )
    .expect("static regex");
}

/// The free-text prefix of a docstring, up to (not including) the first line
/// that opens a structured-tag section. The whole trimmed text when no tag is
/// found.
pub fn extract_description(doc_text: &str) -> String {
    match DOC_TAG_PATTERN.find(doc_text) {
        Some(m) => doc_text[..m.start()].trim().to_string(),
        None => doc_text.trim().to_string(),
    }
}

/// Content-keyed cache for structured docstring parses. Identical docstring
/// text is parsed once; safe to share across worker threads.
#[derive(Debug, Default)]
pub struct DocstringCache {
    entries: DashMap<String, Arc<ParsedDocstring>>,
}

impl DocstringCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, doc_text: &str) -> Arc<ParsedDocstring> {
        if let Some(parsed) = self.entries.get(doc_text) {
            return Arc::clone(&parsed);
        }
        let parsed = Arc::new(parse_docstring(doc_text));
        self.entries
            .insert(doc_text.to_string(), Arc::clone(&parsed));
        parsed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_stops_at_rest_tags() {
        let doc = "Adds a and b.\n\n:param a: first\n:param b: second\n";
        assert_eq!(extract_description(doc), "Adds a and b.");
    }

    #[test]
    fn description_stops_at_google_args() {
        let doc = "Fetch a record.\n\nArgs:\n    key: lookup key\n";
        assert_eq!(extract_description(doc), "Fetch a record.");
    }

    #[test]
    fn description_stops_at_numpy_header() {
        let doc = "Solve the system.\n\nParameters\n----------\na : ndarray\n";
        assert_eq!(extract_description(doc), "Solve the system.");
    }

    #[test]
    fn description_stops_at_epytext_tag() {
        let doc = "Multiply values.\n\n@param x: left factor\n";
        assert_eq!(extract_description(doc), "Multiply values.");
    }

    #[test]
    fn description_stops_at_doctest() {
        let doc = "Square a number.\n\n>>> square(2)\n4\n";
        assert_eq!(extract_description(doc), "Square a number.");
    }

    #[test]
    fn tagless_docstring_is_all_description() {
        assert_eq!(extract_description("  Just a sentence.  "), "Just a sentence.");
    }

    #[test]
    fn tag_matching_is_case_insensitive() {
        let doc = "Do a thing.\n\nARGS:\n    x: input\n";
        assert_eq!(extract_description(doc), "Do a thing.");
    }

    #[test]
    fn mid_line_keywords_do_not_split() {
        // "returns" inside prose is not a section header.
        let doc = "This function returns the sum of its inputs when called.";
        assert_eq!(extract_description(doc), doc);
    }

    #[test]
    fn cache_parses_identical_text_once() {
        let cache = DocstringCache::new();
        let a = cache.parse("Adds a and b.\n\n:param a: first\n");
        let b = cache.parse("Adds a and b.\n\n:param a: first\n");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }
}
