//! Output formatting for CLI

use crate::diff::TokenDiff;
use crate::export::variables::display_value;
use crate::models::TransformWarning;
use crate::sync::{
    DiffReport, DiffSource, ExportReport, ImportReport, StudioPullReport, StudioPushReport,
    SyncRun,
};

fn phases(run: &SyncRun) -> String {
    run.history()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Format warnings, if any
pub fn format_warnings(warnings: &[TransformWarning]) -> String {
    if warnings.is_empty() {
        return String::new();
    }
    let mut output = format!("\n⚠️  {} warning(s):\n", warnings.len());
    for warning in warnings {
        output.push_str(&format!("  - {}\n", warning));
    }
    output
}

/// Format an export report
pub fn format_export_report(report: &ExportReport, verbose: bool) -> String {
    let mut output = String::new();

    if report.dry_run {
        output.push_str("Dry run: nothing was sent\n");
    }
    for path in &report.missing_files {
        output.push_str(&format!("  (skipped missing {})\n", path));
    }

    output.push_str(&format!(
        "\n{} collection(s), {} variable(s):\n",
        report.collection_count(),
        report.variable_count()
    ));
    for count in &report.counts {
        output.push_str(&format!(
            "  {:<12} {:>4}  ({})\n",
            count.category, count.variables, count.collection
        ));
    }

    if verbose {
        output.push_str("\nVariables:\n");
        for (variable, value) in report
            .batch
            .variables
            .iter()
            .zip(&report.batch.variable_mode_values)
        {
            output.push_str(&format!(
                "  {} = {}\n",
                variable.name,
                display_value(&value.value)
            ));
        }
    }

    if let Some(response) = &report.response {
        output.push_str(&format!(
            "\n✅ Remote file accepted the batch ({} id(s) assigned)\n",
            response.meta.temp_id_to_real_id.len()
        ));
    }

    output.push_str(&format_warnings(&report.warnings));
    output.push_str(&format!("\nPhases: {}\n", phases(&report.run)));
    output
}

/// Format an import report
pub fn format_import_report(report: &ImportReport) -> String {
    let mut output = String::new();

    if report.dry_run {
        output.push_str("Dry run: no files were modified\n");
    }
    output.push_str(&format!(
        "\nFetched {} collection(s), {} variable(s)\n",
        report.collections, report.variables_fetched
    ));

    for entry in &report.categories {
        output.push_str(&format!(
            "\n{}: {} token(s) imported, +{} ~{} -{}\n",
            entry.category,
            entry.imported,
            entry.diff.added.len(),
            entry.diff.modified.len(),
            entry.diff.removed.len()
        ));
        if !entry.conflicts.is_empty() {
            output.push_str("  Kept local-only tokens:\n");
            for path in &entry.conflicts {
                output.push_str(&format!("    {}\n", path));
            }
        }
    }

    if !report.variables.is_empty() {
        output.push_str("\nVariables:\n");
        for variable in &report.variables {
            output.push_str(&format!(
                "  [{}] {} = {}\n",
                variable.category,
                variable.name,
                variable.value
            ));
        }
    }

    if !report.written_files.is_empty() {
        output.push_str("\n✅ Wrote:\n");
        for path in &report.written_files {
            output.push_str(&format!("  {}\n", path));
        }
    }

    output.push_str(&format_warnings(&report.warnings));
    output.push_str(&format!("\nPhases: {}\n", phases(&report.run)));
    output
}

/// Format a diff as added / modified / removed sections
pub fn format_diff(diff: &TokenDiff) -> String {
    if diff.is_empty() {
        return "\n✅ No differences\n".to_string();
    }

    let mut output = String::new();
    if !diff.added.is_empty() {
        output.push_str(&format!("\nAdded ({}):\n", diff.added.len()));
        for entry in &diff.added {
            output.push_str(&format!("  + {}: {}\n", entry.path, entry.value));
        }
    }
    if !diff.modified.is_empty() {
        output.push_str(&format!("\nModified ({}):\n", diff.modified.len()));
        for entry in &diff.modified {
            output.push_str(&format!(
                "  ~ {}: {} -> {}\n",
                entry.path, entry.old_value, entry.new_value
            ));
        }
    }
    if !diff.removed.is_empty() {
        output.push_str(&format!("\nRemoved ({}):\n", diff.removed.len()));
        for entry in &diff.removed {
            output.push_str(&format!("  - {}: {}\n", entry.path, entry.old_value));
        }
    }
    output
}

/// Format a diff report
pub fn format_diff_report(report: &DiffReport, verbose: bool) -> String {
    let against = match report.source {
        DiffSource::Remote => "remote variables",
        DiffSource::Studio => "leaf-format files",
    };
    let mut output = format!("Local tokens vs {}\n", against);

    if verbose && !report.variables.is_empty() {
        output.push_str(&format!("\n{} remote variable(s):\n", report.variables.len()));
        for variable in &report.variables {
            output.push_str(&format!(
                "  {} = {}\n",
                variable.name,
                variable.value
            ));
        }
    }

    output.push_str(&format_diff(&report.diff));
    output.push_str(&format_warnings(&report.warnings));
    output
}

/// Format a leaf-format push report
pub fn format_studio_push_report(report: &StudioPushReport) -> String {
    let mut output = format!(
        "\n✅ Wrote {} token(s) to {} file(s):\n",
        report.token_count,
        report.written_files.len()
    );
    for path in &report.written_files {
        output.push_str(&format!("  {}\n", path));
    }
    output.push_str(&format_warnings(&report.warnings));
    output
}

/// Format a leaf-format pull report
pub fn format_studio_pull_report(report: &StudioPullReport) -> String {
    let mut output = String::new();
    if report.dry_run {
        output.push_str("Dry run: no files were modified\n");
    }
    for path in &report.missing_files {
        output.push_str(&format!("  (not found: {})\n", path));
    }
    output.push('\n');
    for (category, count) in &report.counts {
        output.push_str(&format!("  {:<12} {:>4} token(s)\n", category, count));
    }
    if !report.written_files.is_empty() {
        output.push_str("\n✅ Wrote:\n");
        for path in &report.written_files {
            output.push_str(&format!("  {}\n", path));
        }
    }
    output.push_str(&format_warnings(&report.warnings));
    output
}
