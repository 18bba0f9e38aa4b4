use crate::cli::OutputFormat;
use crate::models::{FileRecord, ScanReport};
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::fs;
use std::path::Path;

/// Generate and output a report in the specified format.
///
/// `show_all` includes files and categories with nothing to report;
/// by default they are omitted.
pub fn generate_report(
    report: &ScanReport,
    format: OutputFormat,
    output_path: Option<&Path>,
    show_all: bool,
) -> Result<()> {
    let output = match format {
        OutputFormat::Markdown => format_markdown(report, show_all),
        OutputFormat::Terminal => format_terminal(report, show_all),
        OutputFormat::Json => format_json(report)?,
    };

    if let Some(path) = output_path {
        fs::write(path, output)
            .with_context(|| format!("failed to write output to {}", path.display()))?;
        println!("Report written to {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn file_heading(record: &FileRecord) -> String {
    record
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| record.path.display().to_string())
}

/// Format report as Markdown
fn format_markdown(report: &ScanReport, show_all: bool) -> String {
    let mut output = String::new();

    for record in &report.files {
        if record.is_empty() && !show_all {
            continue;
        }

        output.push_str(&format!("# {}\n", file_heading(record)));

        if record.is_empty() {
            output.push_str("### No comments to report\n");
            continue;
        }

        for category in &record.categories {
            if category.comments.is_empty() {
                if show_all {
                    output.push_str(&format!("## {}\n", category.name));
                    output.push_str("### No comments to report\n");
                }
                continue;
            }

            output.push_str(&format!("## {}\n", category.name));
            for comment in &category.comments {
                output.push_str(&format!(" - __{}:__ {}\n", comment.line, comment.content));
            }
        }
    }

    if output.is_empty() {
        output.push_str("No comments found.\n");
    }

    output.push_str(&format!(
        "\n_{} comments across {} files, generated {}_\n",
        report.total_count,
        report.files.len(),
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Format report as terminal tables
fn format_terminal(report: &ScanReport, show_all: bool) -> String {
    let mut output = String::new();

    let line = "─".repeat(58);
    output.push_str(&format!("╭{}╮\n", line));
    output.push_str(&format!("│ {:^56} │\n", "Quarry - Marker Comment Report"));
    output.push_str(&format!("│ Files Scanned: {:<41} │\n", report.files.len()));
    output.push_str(&format!("│ Total Comments: {:<40} │\n", report.total_count));
    output.push_str(&format!(
        "│ Generated: {:<45} │\n",
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("╰{}╯\n\n", line));

    if !report.by_category.is_empty() {
        output.push_str("Summary by Category:\n");
        let mut summary_table = Table::new();
        summary_table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Category").fg(Color::Cyan),
                Cell::new("Count").fg(Color::Cyan),
            ]);

        let mut counts: Vec<_> = report.by_category.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        for (name, count) in counts {
            if *count == 0 && !show_all {
                continue;
            }
            summary_table.add_row(vec![name.as_str(), &count.to_string()]);
        }

        output.push_str(&format!("{}\n\n", summary_table));
    }

    if report.total_count > 0 {
        output.push_str("Comments:\n");
        let mut comment_table = Table::new();
        comment_table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Category").fg(Color::Cyan),
                Cell::new("File").fg(Color::Cyan),
                Cell::new("Line").fg(Color::Cyan),
                Cell::new("Comment").fg(Color::Cyan),
            ]);

        for record in &report.files {
            for category in &record.categories {
                for comment in &category.comments {
                    comment_table.add_row(vec![
                        Cell::new(&category.name),
                        Cell::new(record.path.display().to_string()),
                        Cell::new(comment.line.to_string()),
                        Cell::new(&comment.content),
                    ]);
                }
            }
        }

        output.push_str(&format!("{}\n", comment_table));
    }

    output
}

/// Format report as JSON
fn format_json(report: &ScanReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, Category, Comment};
    use std::path::PathBuf;

    fn create_test_report() -> ScanReport {
        let mut todo = Category::new("To Do", "TODO");
        todo.comments.push(Comment {
            marker: "TODO".to_string(),
            content: "refactor this".to_string(),
            line: 2,
        });
        let mut fixme = Category::new("Fix Me", "FIXME");
        fixme.comments.push(Comment {
            marker: "FIXME".to_string(),
            content: "off-by-one".to_string(),
            line: 4,
        });

        let populated = FileRecord {
            path: PathBuf::from("src/example.py"),
            categories: vec![todo, fixme],
        };
        let empty = FileRecord {
            path: PathBuf::from("src/clean.go"),
            categories: default_categories(),
        };

        ScanReport::new(vec![populated, empty])
    }

    #[test]
    fn test_format_markdown() {
        let report = create_test_report();
        let output = format_markdown(&report, false);

        assert!(output.contains("# example.py"));
        assert!(output.contains("## To Do"));
        assert!(output.contains(" - __2:__ refactor this"));
        assert!(output.contains("## Fix Me"));
        assert!(output.contains(" - __4:__ off-by-one"));
        // empty file omitted without --all
        assert!(!output.contains("clean.go"));
    }

    #[test]
    fn test_format_markdown_show_all() {
        let report = create_test_report();
        let output = format_markdown(&report, true);

        assert!(output.contains("# clean.go"));
        assert!(output.contains("### No comments to report"));
    }

    #[test]
    fn test_format_markdown_no_comments_at_all() {
        let report = ScanReport::new(vec![FileRecord {
            path: PathBuf::from("clean.rs"),
            categories: default_categories(),
        }]);
        let output = format_markdown(&report, false);
        assert!(output.contains("No comments found."));
    }

    #[test]
    fn test_format_terminal() {
        let report = create_test_report();
        let output = format_terminal(&report, false);

        assert!(output.contains("Quarry - Marker Comment Report"));
        assert!(output.contains("Total Comments: 2"));
        assert!(output.contains(&format!(
            "Generated: {}",
            report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
        )));
        assert!(output.contains("To Do"));
        assert!(output.contains("refactor this"));
        assert!(output.contains("src/example.py"));
    }

    #[test]
    fn test_format_json() {
        let report = create_test_report();
        let output = format_json(&report).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["total_count"], 2);
        assert_eq!(parsed["files"][0]["categories"][0]["name"], "To Do");
        assert_eq!(
            parsed["files"][0]["categories"][0]["comments"][0]["line"],
            2
        );
    }
}
