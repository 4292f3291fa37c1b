//! Route guard inspection.

use clap::Args;

use schoolhub_client::ClientContext;
use schoolhub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for `navigate`
#[derive(Debug, Args)]
pub struct NavigateArgs {
    /// Path to open, e.g. `/classes/4`
    pub path: String,
}

/// Navigate to a path and report where the session ends up
pub async fn execute(
    args: &NavigateArgs,
    ctx: &ClientContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let nav = ctx.navigator.navigate(&args.path).await?;

    let redirects = nav
        .redirects
        .iter()
        .filter_map(|d| d.redirect_path())
        .collect::<Vec<_>>()
        .join(" -> ");
    let params = nav
        .location
        .params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ");

    output::print_item(
        &nav,
        format,
        &[
            ("Requested", nav.requested.clone()),
            ("Route", nav.location.route.clone()),
            ("Path", nav.location.path.clone()),
            ("Redirects", if redirects.is_empty() { "-".into() } else { redirects }),
            ("Params", if params.is_empty() { "-".into() } else { params }),
            ("Navbar", (!nav.location.hide_navbar).to_string()),
        ],
    );
    if nav.location.not_found && format == OutputFormat::Table {
        output::print_warning("Page not found");
    }
    Ok(())
}
