//! Session commands: login, logout, whoami, register.

use clap::Args;
use serde::Serialize;

use schoolhub_client::ClientContext;
use schoolhub_client::dto::RegisterRequest;
use schoolhub_core::error::AppError;
use schoolhub_core::types::Role;

use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Email (will prompt if not provided)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Role: parent, teacher or admin
    #[arg(short, long)]
    pub role: Role,
    /// Preferred language
    #[arg(short, long, default_value = "en")]
    pub language: String,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct WhoAmI {
    authenticated: bool,
    role: Option<String>,
    display_name: Option<String>,
    home: Option<&'static str>,
}

/// Log in, store the session, and enter the role's dashboard
pub async fn login(
    args: &LoginArgs,
    ctx: &ClientContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let username = super::prompt_text(&args.username, "Username")?;
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let session = ctx.auth.login(&username, &password).await?;
    let home = ctx.auth.landing_route(&session).await?;
    let nav = ctx.navigator.navigate(home).await?;

    match format {
        OutputFormat::Table => output::print_success(&format!(
            "Welcome, {}! Opened {}",
            session.display_name.as_deref().unwrap_or("User"),
            nav.location.path
        )),
        OutputFormat::Json => output::print_item(&nav, format, &[]),
    }
    Ok(())
}

/// Clear the stored session
pub async fn logout(ctx: &ClientContext) -> Result<(), AppError> {
    ctx.auth.logout().await?;
    output::print_success("Logged out");
    Ok(())
}

/// Show the stored session without contacting the backend
pub async fn whoami(ctx: &ClientContext, format: OutputFormat) -> Result<(), AppError> {
    let session = ctx.session.get().await?;
    let info = WhoAmI {
        authenticated: session.is_authenticated(),
        home: session.known_role().map(|r| r.home_path()),
        role: session.role,
        display_name: session.display_name,
    };

    if !info.authenticated && format == OutputFormat::Table {
        output::print_warning("Not logged in");
        return Ok(());
    }

    output::print_item(
        &info,
        format,
        &[
            ("Name", info.display_name.clone().unwrap_or_default()),
            ("Role", info.role.clone().unwrap_or_default()),
            ("Home", info.home.unwrap_or("-").to_string()),
        ],
    );
    Ok(())
}

/// Create an account
pub async fn register(args: &RegisterArgs, ctx: &ClientContext) -> Result<(), AppError> {
    let username = super::prompt_text(&args.username, "Username")?;
    let email = super::prompt_text(&args.email, "Email")?;
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let request = RegisterRequest {
        username,
        email,
        password,
        role: args.role,
        language: args.language.clone(),
    };
    ctx.auth.register(&request).await?;

    output::print_success(&format!(
        "Account '{}' created. Log in with `schoolhub login`.",
        request.username
    ));
    Ok(())
}
