//! Docstring completeness
//!
//! Scores every function against its docstring: does the docstring describe
//! the function, declare every parameter, and document the return value when
//! one is annotated? Scores average across all functions in the unit.

use crate::docstring::DocstringCache;
use crate::error::{AnalysisError, Result};
use crate::models::{FunctionRecord, SourceStructure};

/// Score one function/docstring pair in [0, 1].
///
/// +0.4 for a short description of at least two words, +0.3 when the function
/// has parameters and all of them are declared in the docstring, +0.3 when
/// the annotated return is documented — or when no return is annotated and
/// none is expected. No docstring scores 0.0.
pub fn assess_function(func: &FunctionRecord, cache: &DocstringCache) -> f64 {
    let Some(docstring) = &func.docstring else {
        return 0.0;
    };
    let parsed = cache.parse(docstring);

    let has_desc = parsed.short_description_words() >= 2;
    let has_all_params = !func.params.is_empty()
        && func
            .params
            .iter()
            .all(|name| parsed.param_names.contains(name));

    let mut score = 0.0;
    if has_desc {
        score += 0.4;
    }
    if has_all_params {
        score += 0.3;
    }
    if func.has_return_annotation && parsed.has_return_section {
        score += 0.3;
    } else if !func.has_return_annotation {
        // Return not expected, grant credit
        score += 0.3;
    }
    score
}

/// Mean completeness across every function found by the structural walk.
///
/// A unit where no function carries a docstring cannot be scored — that is
/// insufficient data, distinct from a legitimate 0.0.
pub fn compute_completeness(structure: &SourceStructure, cache: &DocstringCache) -> Result<f64> {
    if structure.functions.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "no function definitions found".to_string(),
        ));
    }
    if structure.functions.iter().all(|f| f.docstring.is_none()) {
        return Err(AnalysisError::InsufficientData(
            "no function has a docstring".to_string(),
        ));
    }

    let total: f64 = structure
        .functions
        .iter()
        .map(|f| assess_function(f, cache))
        .sum();
    Ok(total / structure.functions.len() as f64)
}
