//! Leaf-format (Tokens Studio) command implementations

use crate::cli::commands::CommandContext;
use crate::cli::error::CliError;
use crate::cli::output::{format_studio_pull_report, format_studio_push_report};

/// Handle `studio push`
pub async fn handle_studio_push(context: &CommandContext) -> Result<(), CliError> {
    let report = context.session().studio_push().await?;
    println!("{}", format_studio_push_report(&report));
    Ok(())
}

/// Handle `studio pull`
pub async fn handle_studio_pull(context: &CommandContext, dry_run: bool) -> Result<(), CliError> {
    let report = context.session().studio_pull(dry_run).await?;
    println!("{}", format_studio_pull_report(&report));
    Ok(())
}
