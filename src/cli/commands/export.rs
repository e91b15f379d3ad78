//! Export command implementation

use crate::cli::commands::CommandContext;
use crate::cli::error::CliError;
use crate::cli::output::format_export_report;
use crate::sync::ExportOptions;

/// Handle the export command
pub async fn handle_export(
    context: &CommandContext,
    dry_run: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let client = context.client()?;
    let report = context
        .session()
        .export(&client, &ExportOptions { dry_run })
        .await?;

    println!("{}", format_export_report(&report, verbose || dry_run));
    Ok(())
}
