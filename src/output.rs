//! CLI output formatting for `convert`.
//!
//! Output is **class-centric**: each generated file is listed under its
//! namespace by resolved order and class name, with the output path as the
//! trailing detail. Failures follow, then the summary line.
//!
//! ```text
//! Root namespace: Acme.Docs (from Docs.csproj)
//!
//! Acme.Docs.Apps
//!     001 WelcomeApp → Welcome.g.cs
//! Acme.Docs.Apps.Setup
//!     001 IntroApp → Setup/Intro.g.cs
//!     002 _IndexApp → Setup/_Index.g.cs (metadata only)
//!
//! Failed
//!     2_Bad.md: Invalid frontmatter YAML: ...
//!
//! Generated 3 of 4 files; 1 failed
//! ```
//!
//! `format_*` functions return lines and do no I/O; `print_*` wrappers write
//! them to stdout.

use crate::generate::ConvertReport;
use crate::types::GeneratedFile;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `001 IntroApp → Setup/Intro.g.cs`
fn generated_line(file: &GeneratedFile) -> String {
    let mut line = format!(
        "{:03} {} → {}",
        file.order,
        file.class_name,
        display_path(&file.output)
    );
    if file.metadata_only {
        line.push_str(" (metadata only)");
    }
    line
}

/// The final line of a run.
pub fn summary_line(report: &ConvertReport) -> String {
    if report.failures.is_empty() {
        format!("Generated {} files successfully!", report.generated.len())
    } else {
        format!(
            "Generated {} of {} files; {} failed",
            report.generated.len(),
            report.total(),
            report.failures.len()
        )
    }
}

/// Format the result of a `convert` run.
pub fn format_convert_output(report: &ConvertReport) -> Vec<String> {
    let mut lines = Vec::new();

    let descriptor = report
        .root_namespace
        .descriptor
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    lines.push(format!(
        "Root namespace: {} (from {})",
        report.root_namespace.name, descriptor
    ));

    let mut files: Vec<&GeneratedFile> = report.generated.iter().collect();
    files.sort_by(|a, b| {
        (a.namespace.as_str(), a.order, a.class_name.as_str()).cmp(&(
            b.namespace.as_str(),
            b.order,
            b.class_name.as_str(),
        ))
    });

    if !files.is_empty() {
        lines.push(String::new());
    }
    let mut current_namespace: Option<&str> = None;
    for file in files {
        if current_namespace != Some(file.namespace.as_str()) {
            lines.push(file.namespace.clone());
            current_namespace = Some(file.namespace.as_str());
        }
        lines.push(format!("{}{}", indent(1), generated_line(file)));
    }

    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push("Failed".to_string());
        for failure in &report.failures {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                display_path(&failure.source),
                failure.error
            ));
        }
    }

    lines.push(String::new());
    lines.push(summary_line(report));
    lines
}

pub fn print_convert_output(report: &ConvertReport) {
    for line in format_convert_output(report) {
        println!("{}", line);
    }
}
