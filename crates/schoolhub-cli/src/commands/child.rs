//! Parent action: add a child.

use clap::Args;

use schoolhub_client::ClientContext;
use schoolhub_client::dto::AddChildRequest;
use schoolhub_core::error::AppError;
use schoolhub_core::types::Role;

use crate::output::{self, OutputFormat};

/// Arguments for `add-child`
#[derive(Debug, Args)]
pub struct AddChildArgs {
    /// Child's first name (will prompt if not provided)
    #[arg(long)]
    pub first_name: Option<String>,
    /// Child's last name (will prompt if not provided)
    #[arg(long)]
    pub last_name: Option<String>,
    /// Class ID; pick from `schoolhub classes`
    #[arg(long)]
    pub class_id: i64,
}

/// Add a child, then show the refreshed list
pub async fn execute(
    args: &AddChildArgs,
    ctx: &ClientContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::enter(ctx, Role::Parent.home_path()).await?;

    let request = AddChildRequest {
        first_name: super::prompt_text(&args.first_name, "First name")?,
        last_name: super::prompt_text(&args.last_name, "Last name")?,
        class_id: args.class_id,
    };

    let mut view = ctx.parent_dashboard();
    view.add_child(&request).await?;
    if let Some(message) = view.error_message {
        output::print_warning(&message);
    }

    output::print_success(&format!(
        "Added {} {}",
        request.first_name, request.last_name
    ));
    if format == OutputFormat::Json {
        output::print_item(&view.children, format, &[]);
    }
    Ok(())
}
