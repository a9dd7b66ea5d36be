//! Structured docstring parser
//!
//! Produces the short description, declared parameter names, and
//! return-section presence for the four documented conventions. Convention is
//! detected from the earliest recognizable marker in the text.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref REST_TAG: Regex =
        Regex::new(r"(?im)^[ \t]*:(param|returns?|raises?|rtype|type|keyword)\b").expect("static regex");
    static ref EPYTEXT_TAG: Regex =
        Regex::new(r"(?im)^[ \t]*@(param|returns?|raises?|rtype|type|keyword)\b").expect("static regex");
    static ref GOOGLE_SECTION: Regex = Regex::new(
        r"(?im)^[ \t]*(args|arguments|kwargs|returns|yields|raises|attributes)[ \t]*:[ \t]*$"
    )
    .expect("static regex");
    static ref NUMPY_SECTION: Regex = Regex::new(
        r"(?im)^[ \t]*(parameters|other parameters|returns|yields|raises|attributes)[ \t]*\r?\n[ \t]*-{3,}"
    )
    .expect("static regex");
    static ref REST_PARAM: Regex =
        Regex::new(r"(?im)^[ \t]*:param[ \t]+([^:\n]+):").expect("static regex");
    static ref REST_RETURN: Regex =
        Regex::new(r"(?im)^[ \t]*:(returns?|rtype)[^:\n]*:").expect("static regex");
    static ref EPYTEXT_PARAM: Regex =
        Regex::new(r"(?im)^[ \t]*@param[ \t]+([^:\n]+):").expect("static regex");
    static ref EPYTEXT_RETURN: Regex =
        Regex::new(r"(?im)^[ \t]*@(returns?|rtype)\b").expect("static regex");
    static ref GOOGLE_ARGS_HEADER: Regex =
        Regex::new(r"(?im)^[ \t]*(args|arguments|kwargs)[ \t]*:[ \t]*$").expect("static regex");
    static ref GOOGLE_RETURN_HEADER: Regex =
        Regex::new(r"(?im)^[ \t]*(returns|yields)[ \t]*:[ \t]*$").expect("static regex");
    static ref NUMPY_PARAMS_HEADER: Regex =
        Regex::new(r"(?im)^[ \t]*(parameters|other parameters)[ \t]*$").expect("static regex");
    static ref NUMPY_RETURN_HEADER: Regex =
        Regex::new(r"(?im)^[ \t]*(returns|yields)[ \t]*\r?\n[ \t]*-{3,}").expect("static regex");
    static ref IDENTIFIER: Regex = Regex::new(r"[A-Za-z_]\w*").expect("static regex");
}

/// Docstring convention, detected per docstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocConvention {
    Rest,
    Google,
    Numpy,
    Epytext,
    /// No structured markers at all.
    Plain,
}

/// Parse result for one documentation block.
#[derive(Debug, Clone)]
pub struct ParsedDocstring {
    pub convention: DocConvention,
    /// First paragraph of the free-text description, newline-joined to one
    /// line. None when the description is empty.
    pub short_description: Option<String>,
    /// Parameter names declared in the structured section.
    pub param_names: HashSet<String>,
    pub has_return_section: bool,
}

impl ParsedDocstring {
    /// Word count of the short description (0 when absent).
    pub fn short_description_words(&self) -> usize {
        self.short_description
            .as_deref()
            .map(|d| d.split_whitespace().count())
            .unwrap_or(0)
    }
}

/// Detect the convention from the earliest marker in the text.
fn detect_convention(text: &str) -> DocConvention {
    let candidates = [
        (REST_TAG.find(text), DocConvention::Rest),
        (EPYTEXT_TAG.find(text), DocConvention::Epytext),
        (NUMPY_SECTION.find(text), DocConvention::Numpy),
        (GOOGLE_SECTION.find(text), DocConvention::Google),
    ];
    candidates
        .into_iter()
        .filter_map(|(m, convention)| m.map(|m| (m.start(), convention)))
        .min_by_key(|(start, _)| *start)
        .map(|(_, convention)| convention)
        .unwrap_or(DocConvention::Plain)
}

/// Parse a docstring into its structured parts.
pub fn parse_docstring(doc_text: &str) -> ParsedDocstring {
    let description = super::extract_description(doc_text);
    let short_description = first_paragraph(&description);
    let convention = detect_convention(doc_text);

    let (param_names, has_return_section) = match convention {
        DocConvention::Rest => (
            capture_param_names(&REST_PARAM, doc_text),
            REST_RETURN.is_match(doc_text),
        ),
        DocConvention::Epytext => (
            capture_param_names(&EPYTEXT_PARAM, doc_text),
            EPYTEXT_RETURN.is_match(doc_text),
        ),
        DocConvention::Google => (
            google_param_names(doc_text),
            GOOGLE_RETURN_HEADER.is_match(doc_text),
        ),
        DocConvention::Numpy => (
            numpy_param_names(doc_text),
            NUMPY_RETURN_HEADER.is_match(doc_text),
        ),
        DocConvention::Plain => (HashSet::new(), false),
    };

    ParsedDocstring {
        convention,
        short_description,
        param_names,
        has_return_section,
    }
}

/// First paragraph of the description, joined to a single line.
fn first_paragraph(description: &str) -> Option<String> {
    let mut lines = Vec::new();
    for line in description.lines() {
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.trim());
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

/// ReST/Epytext param capture. The field may carry a type
/// (`:param int count:`); the declared name is the last token.
fn capture_param_names(pattern: &Regex, text: &str) -> HashSet<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            caps.get(1)
                .and_then(|field| field.as_str().split_whitespace().last())
                .map(|name| name.trim_matches('*').to_string())
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Google style: names are the leading identifiers of the indented lines
/// under an `Args:` header, e.g. `key (str): lookup key`.
fn google_param_names(text: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    let lines: Vec<&str> = text.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        if GOOGLE_ARGS_HEADER.is_match(lines[i]) {
            let header_indent = indent_of(lines[i]);
            let mut j = i + 1;
            while j < lines.len() {
                let line = lines[j];
                if line.trim().is_empty() {
                    j += 1;
                    continue;
                }
                if indent_of(line) <= header_indent {
                    break;
                }
                // Continuation lines are indented deeper than the name line;
                // an identifier followed by `:` or `(` marks a declaration.
                let trimmed = line.trim_start().trim_start_matches('*');
                if let Some(m) = IDENTIFIER.find(trimmed) {
                    if m.start() == 0 {
                        let rest = trimmed[m.end()..].trim_start();
                        if rest.starts_with(':') || rest.starts_with('(') {
                            names.insert(m.as_str().to_string());
                        }
                    }
                }
                j += 1;
            }
            i = j;
        } else {
            i += 1;
        }
    }
    names
}

/// NumPy style: names sit at the section indent under a
/// `Parameters` / `----------` header, as `name : type` or bare `name`.
fn numpy_param_names(text: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    let lines: Vec<&str> = text.lines().collect();
    let mut i = 0;
    while i + 1 < lines.len() {
        let is_params_header = NUMPY_PARAMS_HEADER.is_match(lines[i])
            && lines[i + 1].trim().chars().all(|c| c == '-')
            && lines[i + 1].trim().len() >= 3;
        if !is_params_header {
            i += 1;
            continue;
        }
        let section_indent = indent_of(lines[i]);
        let mut j = i + 2;
        while j < lines.len() {
            let line = lines[j];
            if line.trim().is_empty() {
                j += 1;
                continue;
            }
            // Next underlined header ends the section.
            if j + 1 < lines.len()
                && lines[j + 1].trim().len() >= 3
                && lines[j + 1].trim().chars().all(|c| c == '-')
            {
                break;
            }
            // Description lines are indented deeper than the names.
            if indent_of(line) == section_indent {
                let name_field = line.trim().split(':').next().unwrap_or("").trim();
                for name in name_field.split(',') {
                    let name = name.trim().trim_matches('*');
                    if !name.is_empty() && IDENTIFIER.is_match(name) {
                        names.insert(name.to_string());
                    }
                }
            }
            j += 1;
        }
        i = j;
    }
    names
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
