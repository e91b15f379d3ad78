//! Diff command implementation

use crate::cli::commands::CommandContext;
use crate::cli::error::CliError;
use crate::cli::output::format_diff_report;

/// Handle the diff command
pub async fn handle_diff(
    context: &CommandContext,
    studio: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let report = if studio {
        context.session().diff_studio().await?
    } else {
        let client = context.client()?;
        context.session().diff_remote(&client).await?
    };

    println!("{}", format_diff_report(&report, verbose));
    Ok(())
}
