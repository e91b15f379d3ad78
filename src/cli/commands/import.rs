//! Import command implementation

use crate::cli::commands::CommandContext;
use crate::cli::error::CliError;
use crate::cli::output::format_import_report;
use crate::sync::{ImportOptions, MergeStrategy};

/// Handle the import command
pub async fn handle_import(
    context: &CommandContext,
    dry_run: bool,
    verbose: bool,
    overwrite: bool,
) -> Result<(), CliError> {
    let client = context.client()?;
    let options = ImportOptions {
        dry_run,
        verbose,
        strategy: if overwrite {
            MergeStrategy::Overwrite
        } else {
            MergeStrategy::Merge
        },
    };
    let report = context.session().import(&client, &options).await?;

    println!("{}", format_import_report(&report));
    Ok(())
}
