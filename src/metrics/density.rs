//! Comment density
//!
//! Classifies every non-trivial source line as comment or code, tracking
//! triple-quote state so lines inside multi-line string blocks count as
//! comment lines, then normalizes the ratio against an ideal band.

use crate::config::Thresholds;
use crate::error::{AnalysisError, Result};

/// Compute the normalized comment density of a unit.
///
/// Lines shorter than 3 characters after trimming are ignored. A line opening
/// or inside a triple-quoted block is a comment line; a `#`-prefixed line is
/// a comment line; a line with an embedded `#` counts as both code and
/// comment. Fails when no relevant lines exist at all.
pub fn compute_comment_density<'a, I>(lines: I, thresholds: &Thresholds) -> Result<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut comment_lines = 0usize;
    let mut code_lines = 0usize;
    let mut in_multiline_string = false;

    for line in lines {
        let stripped = line.trim();
        if stripped.len() < 3 {
            continue;
        }

        // Triple-quoted blocks: the delimiter lines and everything between
        // them count as comment lines.
        if stripped.starts_with("'''") || stripped.starts_with("\"\"\"") {
            comment_lines += 1;
            if in_multiline_string {
                in_multiline_string = false;
            } else if stripped.matches("\"\"\"").count() == 1
                || stripped.matches("'''").count() == 1
            {
                in_multiline_string = true;
            }
            continue;
        } else if in_multiline_string {
            comment_lines += 1;
            continue;
        }

        if stripped.starts_with('#') {
            comment_lines += 1;
        } else if stripped.contains('#') {
            comment_lines += 1;
            code_lines += 1;
        } else {
            code_lines += 1;
        }
    }

    let total = comment_lines + code_lines;
    if total == 0 {
        return Err(AnalysisError::InsufficientData(
            "no comment or code lines found".to_string(),
        ));
    }
    let ratio = comment_lines as f64 / total as f64;

    Ok(normalize_comment_density(
        ratio,
        thresholds.ideal_density_low,
        thresholds.ideal_density_high,
        1.0,
    ))
}

/// Trapezoid normalization: ratios inside `[ideal_low, ideal_high]` score
/// 1.0; below the band the score ramps up linearly from 0; above it the
/// score decays linearly, reaching 0 at `max_ratio`.
pub fn normalize_comment_density(
    ratio: f64,
    ideal_low: f64,
    ideal_high: f64,
    max_ratio: f64,
) -> f64 {
    if (ideal_low..=ideal_high).contains(&ratio) {
        1.0
    } else if ratio < ideal_low {
        ratio / ideal_low
    } else if ratio >= max_ratio {
        0.0
    } else {
        (max_ratio - ratio) / (max_ratio - ideal_high)
    }
}
