//! CSV reporter
//!
//! One row per analyzed file plus one aggregate project row, with a header.
//! The `level` column distinguishes the two; `num_files` is only meaningful
//! on the project row. Column order matches what the dashboard expects.

use crate::models::{MetricSet, ProjectMetrics};

const HEADER: &str = "identifier,comment_density,completeness,conciseness,accuracy,overall_score,line_count,doc_type,num_files,level";

/// Aggregate-row identifier, fixed so downstream tooling can find it.
pub const PROJECT_IDENTIFIER: &str = "Project Results";

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn render(files: &[MetricSet], project: &ProjectMetrics) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for metrics in files {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},,file\n",
            escape(&metrics.identifier),
            metrics.comment_density,
            metrics.completeness,
            metrics.conciseness,
            metrics.accuracy,
            metrics.overall_score,
            metrics.line_count,
            metrics.doc_type,
        ));
    }

    out.push_str(&format!(
        "{},{},{},{},{},{},{},{},{},project\n",
        escape(PROJECT_IDENTIFIER),
        project.comment_density,
        project.completeness,
        project.conciseness,
        project.accuracy,
        project.overall_score,
        project.line_count,
        project.doc_type,
        project.num_files,
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::test_fixtures::{sample_files, sample_project};

    #[test]
    fn emits_header_file_rows_and_project_row() {
        let output = render(&sample_files(), &sample_project());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("identifier,comment_density"));
        assert!(lines[0].ends_with("num_files,level"));
        assert!(lines[1].ends_with(",file"));
        assert!(lines[1].contains("data/demo/add_llm.py"));
        assert!(lines[1].contains("LLM"));
        assert!(lines[3].starts_with("Project Results,"));
        assert!(lines[3].ends_with(",project"));
        assert!(lines[3].contains(",Mixed,"));
        assert!(lines[3].contains(",2,"));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
