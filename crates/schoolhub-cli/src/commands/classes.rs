//! Class listing.

use clap::Args;

use schoolhub_client::ClientContext;
use schoolhub_core::error::AppError;

use super::dashboard::{ClassRow, rows};
use crate::output::{self, OutputFormat};

/// Arguments for `classes`
#[derive(Debug, Args)]
pub struct ClassesArgs {
    /// Show one class instead of the selection list
    #[arg(long)]
    pub id: Option<i64>,
}

/// List classes, or show a single class
pub async fn execute(
    args: &ClassesArgs,
    ctx: &ClientContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match args.id {
        Some(id) => {
            super::enter(ctx, &format!("/classes/{id}")).await?;
            let class = ctx.classes.get(id).await?;
            output::print_item(
                &class,
                format,
                &[
                    ("ID", class.id.to_string()),
                    ("Class", class.label()),
                    ("School", class.school_name.clone().unwrap_or_else(|| "-".into())),
                ],
            );
        }
        None => {
            let classes = ctx.classes.list_for_selection().await?;
            output::print_list(&rows::<_, ClassRow>(&classes), format);
        }
    }
    Ok(())
}
