//! Python structural parser using tree-sitter
//!
//! Extracts docstrings and function records from Python source code. The walk
//! covers every `function_definition` (methods and nested functions included)
//! and collects module, class, and function docstrings in source order.

use crate::error::{AnalysisError, Result};
use crate::models::{FunctionRecord, SourceStructure};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use tree_sitter::{Node, Parser};

lazy_static! {
    /// Splits a trailing comment off a code line: `x = 1  # note` -> `x = 1`.
    /// A `#` glued directly to code is left alone, matching the original
    /// whitespace-then-hash rule.
    static ref TRAILING_COMMENT: Regex = Regex::new(r"\s+#").expect("static regex");
}

/// Parse Python source into its structure.
///
/// Fails with [`AnalysisError::Parse`] when the source has syntax errors; the
/// caller decides whether that skips the unit (batch) or propagates (single
/// file).
pub fn parse_source(source: &str, path: &Path) -> Result<SourceStructure> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|e| AnalysisError::Parse {
            path: path.to_path_buf(),
            reason: format!("failed to set Python language: {e}"),
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| AnalysisError::Parse {
        path: path.to_path_buf(),
        reason: "parser returned no tree".to_string(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(AnalysisError::Parse {
            path: path.to_path_buf(),
            reason: "syntax error".to_string(),
        });
    }

    let source_bytes = source.as_bytes();
    let lines: Vec<&str> = source.split('\n').collect();

    let mut structure = SourceStructure::default();

    // Module docstring first, then the recursive walk.
    if let Some(doc) = block_docstring(&root, source_bytes) {
        structure.docstrings.push(doc.0);
    }
    walk(&root, source_bytes, &lines, &mut structure);

    Ok(structure)
}

/// Recursive pre-order walk collecting class docstrings and function records.
fn walk(node: &Node, source: &[u8], lines: &[&str], structure: &mut SourceStructure) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" => {
                let record = build_function_record(&child, source, lines);
                if let Some(record) = record {
                    if let Some(doc) = &record.docstring {
                        structure.docstrings.push(doc.clone());
                    }
                    structure.functions.push(record);
                }
                // Nested definitions live inside the body block.
                walk(&child, source, lines, structure);
            }
            "class_definition" => {
                if let Some((doc, _)) = block_docstring(&child_body(&child), source) {
                    structure.docstrings.push(doc);
                }
                walk(&child, source, lines, structure);
            }
            // Decorators wrap the real definition one level down.
            "decorated_definition" => walk(&child, source, lines, structure),
            _ => {
                // Definitions can hide inside if/try/with blocks and similar.
                if child.named_child_count() > 0 {
                    walk(&child, source, lines, structure);
                }
            }
        }
    }
}

/// Node whose first statement holds the docstring: the body block for
/// definitions, the node itself for the module root.
fn child_body<'a>(node: &Node<'a>) -> Node<'a> {
    node.child_by_field_name("body").unwrap_or(*node)
}

/// Extract a docstring from a block-like node: present when the first
/// statement is a standalone string literal. Returns the cleaned text and the
/// physical line span of the literal.
fn block_docstring(block: &Node, source: &[u8]) -> Option<(String, (usize, usize))> {
    // Comments are named nodes in tree-sitter but not statements; skip them
    // so a leading comment does not hide the docstring.
    let mut cursor = block.walk();
    let first = block
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let string_node = first.named_child(0)?;
    if string_node.kind() != "string" && string_node.kind() != "concatenated_string" {
        return None;
    }
    let text = string_literal_content(&string_node, source)?;
    let span = (
        string_node.start_position().row,
        string_node.end_position().row,
    );
    Some((clean_docstring(&text), span))
}

/// Raw content of a string literal, without quotes or prefixes.
fn string_literal_content(node: &Node, source: &[u8]) -> Option<String> {
    // Prefer string_content children; they already exclude quote tokens.
    let mut parts = Vec::new();
    collect_string_content(node, source, &mut parts);
    // An empty literal ("" or """""") has no string_content child.
    Some(parts.concat())
}

fn collect_string_content(node: &Node, source: &[u8], parts: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "string_content" {
            if let Ok(text) = child.utf8_text(source) {
                parts.push(text.to_string());
            }
        } else if child.child_count() > 0 {
            collect_string_content(&child, source, parts);
        }
    }
}

/// Normalize a docstring the way Python's `inspect.cleandoc` does: strip the
/// first line's leading whitespace, remove the common indentation of the
/// remaining lines, and drop leading/trailing blank lines.
pub fn clean_docstring(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            cleaned.push(line.trim_start().to_string());
        } else if line.len() >= margin {
            cleaned.push(line[margin..].trim_end().to_string());
        } else {
            cleaned.push(line.trim().to_string());
        }
    }

    while cleaned.first().is_some_and(|line| line.is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|line| line.is_empty()) {
        cleaned.pop();
    }
    cleaned.join("\n")
}

/// Build a [`FunctionRecord`] for one `function_definition` node.
fn build_function_record(node: &Node, source: &[u8], lines: &[&str]) -> Option<FunctionRecord> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source)
        .ok()?
        .to_string();

    let params = extract_parameters(node.child_by_field_name("parameters"), source);
    let has_return_annotation = node.child_by_field_name("return_type").is_some();

    let body_start = node.start_position().row;
    let body_end = resolve_body_end(lines, body_start);

    let (docstring, docstring_lines) = match block_docstring(&child_body(node), source) {
        Some((doc, span)) => (Some(doc), Some(span)),
        None => (None, None),
    };

    Some(FunctionRecord {
        name,
        params,
        has_return_annotation,
        body_start,
        body_end,
        docstring,
        docstring_lines,
    })
}

/// Resolve the end of a function body by indentation: the body runs from the
/// `def` line to the first subsequent line indented at or below the `def`
/// line's level. Blank lines and `#`-only lines never terminate the scan.
fn resolve_body_end(lines: &[&str], def_line: usize) -> usize {
    let def_indent = indent_of(lines.get(def_line).copied().unwrap_or(""));
    let mut end = def_line + 1;
    while end < lines.len() {
        let line = lines[end];
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            end += 1;
            continue;
        }
        if indent_of(line) <= def_indent {
            break;
        }
        end += 1;
    }
    end
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Positional parameter names, with the implicit `self`/`cls` receivers
/// dropped. Splat parameters (`*args`, `**kwargs`) are not documentable
/// individually and are skipped.
fn extract_parameters(params_node: Option<Node>, source: &[u8]) -> Vec<String> {
    let Some(node) = params_node else {
        return vec![];
    };

    let mut params = Vec::new();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        let name = match child.kind() {
            "identifier" => child.utf8_text(source).ok().map(|s| s.to_string()),
            "typed_parameter" | "default_parameter" | "typed_default_parameter" => child
                .child_by_field_name("name")
                .and_then(|n| n.utf8_text(source).ok().map(|s| s.to_string()))
                .or_else(|| {
                    let mut inner = child.walk();
                    let name = child
                        .children(&mut inner)
                        .find(|c| c.kind() == "identifier")
                        .and_then(|c| c.utf8_text(source).ok().map(|s| s.to_string()));
                    name
                }),
            _ => None,
        };
        if let Some(name) = name {
            if name != "self" && name != "cls" {
                params.push(name);
            }
        }
    }

    params
}

/// Build the cleaned body of `target`: its span minus docstring lines, minus
/// lines belonging to any other function's span, minus blank and comment-only
/// lines, with trailing comments stripped. Nested functions are excluded so
/// their code is not counted against the parent's description.
pub fn cleaned_body(source: &str, functions: &[FunctionRecord], target: &FunctionRecord) -> String {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut cleaned: Vec<String> = Vec::new();

    for idx in target.body_start..target.body_end.min(lines.len()) {
        if functions.iter().any(|f| {
            f.docstring_lines
                .is_some_and(|(start, end)| start <= idx && idx <= end)
        }) {
            continue;
        }
        if functions
            .iter()
            .any(|f| f.body_start != target.body_start && f.contains_line(idx))
        {
            continue;
        }
        let line = lines[idx];
        let stripped = line.trim_start();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        let code = match TRAILING_COMMENT.find(line) {
            Some(m) => &line[..m.start()],
            None => line,
        };
        cleaned.push(code.trim_end().to_string());
    }

    cleaned.join("\n")
}
