use std::collections::BTreeSet;
use std::time::Duration;

use crate::terminal::colors;
use colored::*;
use drone_common::report::ScanReport;

type Detail = (String, ColoredString);

pub fn tags_to_value(tags: &[String]) -> ColoredString {
    if tags.is_empty() {
        return "none".dimmed();
    }
    tags.join(", ").color(colors::ACCENT)
}

/// One line per run: version, invocation and number of targets.
pub fn runs_to_details(report: &ScanReport) -> Vec<Detail> {
    report
        .runs
        .iter()
        .enumerate()
        .map(|(idx, run)| {
            let value = format!(
                "v{} {} ({} target{})",
                run.version,
                run.command,
                run.findings.len(),
                plural(run.findings.len())
            );
            (format!("Run {}", idx + 1), value.color(colors::TEXT_DEFAULT))
        })
        .collect()
}

pub fn unmatched_notice(project_id: &str) -> String {
    format!(
        "The following host ports contained nikto results but did not exist in project {project_id}"
    )
}

/// Unmatched descriptors, one per line, exactly as recorded by the merge.
pub fn unmatched_lines(unmatched: &BTreeSet<String>) -> Vec<String> {
    unmatched.iter().cloned().collect()
}

pub fn summary(findings: usize, unmatched: usize, total_time: Duration) -> String {
    let findings: ColoredString = format!("{findings} finding{}", plural(findings))
        .bold()
        .green();
    let missing: ColoredString = format!("{unmatched} unmatched target{}", plural(unmatched))
        .bold()
        .color(colors::UNMATCHED);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    format!("Import Complete: {findings}, {missing} in {total_time}")
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
