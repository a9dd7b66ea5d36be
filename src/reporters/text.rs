//! Terminal reporter
//!
//! Compact per-file table plus a project summary block, colored by score:
//! green is good, yellow is middling, red needs work.

use crate::models::{MetricSet, ProjectMetrics};
use console::style;

fn colored_score(value: f64) -> String {
    let text = format!("{value:.3}");
    if value >= 0.66 {
        style(text).green().to_string()
    } else if value >= 0.33 {
        style(text).yellow().to_string()
    } else {
        style(text).red().to_string()
    }
}

pub fn render(files: &[MetricSet], project: &ProjectMetrics) -> String {
    let mut out = String::new();

    let name_width = files
        .iter()
        .map(|f| f.identifier.len())
        .chain(std::iter::once("Project Results".len()))
        .max()
        .unwrap_or(20)
        .max(10);

    out.push_str(&format!(
        "{:<name_width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>6}  {:>6}\n",
        style("file").bold(),
        "density",
        "complete",
        "concise",
        "accuracy",
        "overall",
        "lines",
        "docs",
    ));

    for metrics in files {
        out.push_str(&format!(
            "{:<name_width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>6}  {:>6}\n",
            metrics.identifier,
            colored_score(metrics.comment_density),
            colored_score(metrics.completeness),
            colored_score(metrics.conciseness),
            colored_score(metrics.accuracy),
            colored_score(metrics.overall_score),
            metrics.line_count,
            metrics.doc_type,
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "{} ({} files, {} lines, {})\n",
        style("Project Results").bold(),
        project.num_files,
        project.line_count,
        project.doc_type,
    ));
    out.push_str(&format!(
        "  comment_density: {}\n  completeness:    {}\n  conciseness:     {}\n  accuracy:        {}\n  overall_score:   {}\n",
        colored_score(project.comment_density),
        colored_score(project.completeness),
        colored_score(project.conciseness),
        colored_score(project.accuracy),
        colored_score(project.overall_score),
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::test_fixtures::{sample_files, sample_project};

    #[test]
    fn renders_every_file_and_the_summary() {
        let output = render(&sample_files(), &sample_project());
        assert!(output.contains("data/demo/add_llm.py"));
        assert!(output.contains("data/demo/norm_filter.py"));
        assert!(output.contains("Project Results"));
        assert!(output.contains("overall_score"));
        assert!(output.contains("2 files"));
        assert!(output.contains("100 lines"));
    }
}
