//! CLI command definitions and dispatch.

pub mod announce;
pub mod auth;
pub mod child;
pub mod classes;
pub mod dashboard;
pub mod navigate;

use clap::{Parser, Subcommand};
use tracing::debug;

use schoolhub_client::ClientContext;
use schoolhub_core::config::AppConfig;
use schoolhub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// SchoolHub command-line client
#[derive(Debug, Parser)]
#[command(name = "schoolhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads `config/{env}` over `config/default`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(auth::LoginArgs),
    /// Clear the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Create an account
    Register(auth::RegisterArgs),
    /// Resolve a path through the route guard
    Navigate(navigate::NavigateArgs),
    /// Show a role dashboard
    Dashboard(dashboard::DashboardArgs),
    /// List classes or show one
    Classes(classes::ClassesArgs),
    /// Register a child under the logged-in parent
    AddChild(child::AddChildArgs),
    /// Publish an announcement
    Announce(announce::AnnounceArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let ctx = ClientContext::new(config)?;
        match &self.command {
            Commands::Login(args) => auth::login(args, &ctx, self.format).await,
            Commands::Logout => auth::logout(&ctx).await,
            Commands::Whoami => auth::whoami(&ctx, self.format).await,
            Commands::Register(args) => auth::register(args, &ctx).await,
            Commands::Navigate(args) => navigate::execute(args, &ctx, self.format).await,
            Commands::Dashboard(args) => dashboard::execute(args, &ctx, self.format).await,
            Commands::Classes(args) => classes::execute(args, &ctx, self.format).await,
            Commands::AddChild(args) => child::execute(args, &ctx, self.format).await,
            Commands::Announce(args) => announce::execute(args, &ctx).await,
        }
    }
}

/// Helper: enter `path` through the navigator, failing when the guard
/// sends the session elsewhere.
pub async fn enter(ctx: &ClientContext, path: &str) -> Result<(), AppError> {
    let nav = ctx.navigator.navigate(path).await?;
    debug!(requested = path, landed = %nav.location.path, "Navigated");
    if nav.location.path == schoolhub_auth::guard::routes::normalize(path) {
        return Ok(());
    }
    output::print_warning(&format!("Redirected to {}", nav.location.path));
    Err(AppError::authorization(format!(
        "Not allowed to open '{path}' with the current session"
    )))
}

/// Helper: prompt for a value when it was not given on the command line
pub fn prompt_text(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}
