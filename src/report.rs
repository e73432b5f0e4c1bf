//! Console report lines
//!
//! Builds the human-readable summary printed after a run. The binary prints
//! the lines; keeping them as data lets the wording be tested.

use crate::error::ReorderError;
use crate::profile::ReorderProfile;
use crate::run_state::RunStage;
use crate::runner::RunReport;

/// Lines describing a successful run, for stdout
pub fn success_lines(profile: &ReorderProfile, report: &RunReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.sections.len() * 2 + 5);

    for section in &report.sections {
        lines.push(format!("✓ extracted section {}", section.label));
    }
    for section in &report.sections {
        if section.layout_applied() {
            lines.push(format!("✓ section {}: {}", section.label, section.layout));
        } else {
            lines.push(format!(
                "! section {}: {} (container marker not found, tokens not placed)",
                section.label, section.layout
            ));
        }
    }

    let labels: Vec<&str> = profile.sections.iter().map(|s| s.label.as_str()).collect();
    let layouts: Vec<String> = report.sections.iter().map(|s| s.layout.to_string()).collect();

    lines.push(String::new());
    let path = report.path.display();
    lines.push(if report.dry_run {
        format!("✓ Dry run complete, {path} not written")
    } else if report.written {
        format!("✓ Sections reordered: {path}")
    } else {
        format!("✓ Already in order, nothing written: {path}")
    });
    lines.push(format!("Order: {}", labels.join(", ")));
    lines.push(format!("Layout: {}", layouts.join(", ")));
    lines.push(format!("Region: bytes {}..{}", report.region.start, report.region.end));
    lines
}

/// Lines describing a failed run, for stderr
pub fn failure_lines(
    profile: &ReorderProfile,
    err: &ReorderError,
    failed_at: Option<RunStage>,
) -> Vec<String> {
    let mut lines = Vec::new();
    match err {
        ReorderError::SectionCount { missing, .. } => {
            for spec in &profile.sections {
                if missing.contains(&spec.label) {
                    lines.push(format!("✗ failed to extract section {}", spec.label));
                } else {
                    lines.push(format!("✓ extracted section {}", spec.label));
                }
            }
        }
        ReorderError::Boundary(_) => {
            lines.push("✗ could not locate the boundaries of the engine region".to_string());
        }
        _ => {}
    }
    if let Some(stage) = failed_at {
        lines.push(format!("✗ aborted during {stage}"));
    }
    lines
}
