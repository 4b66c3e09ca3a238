// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `ClickList` CLI - grocery pickup ordering from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Log in (credentials from flags, CLICKLIST_EMAIL/CLICKLIST_PASSWORD or .env)
//! clicklist login --email shopper@example.com
//!
//! # Browse
//! clicklist favorites
//! clicklist recent --format json --pretty
//!
//! # Cart
//! clicklist cart
//! clicklist add 0001111041700 2
//! clicklist remove 0001111041700
//!
//! # Forget the saved session
//! clicklist logout
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clicklist_api::ClickListError;
use clicklist_store::{LogLevel, StoreError};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{AppContext, cart, config, items, login};

// ============================================================================
// CLI Definition
// ============================================================================

/// `ClickList` CLI - favorites, recent purchases and cart for grocery pickup.
#[derive(Parser)]
#[command(name = "clicklist")]
#[command(about = "Grocery pickup ordering CLI")]
#[command(long_about = r#"
ClickList talks to the Kroger ClickList ordering API.

Log in once; the session is saved and reused by later commands
until you log out or the server expires it.

Examples:
  clicklist login                 # Uses CLICKLIST_EMAIL / CLICKLIST_PASSWORD
  clicklist favorites             # List favorite items
  clicklist add 0001111041700 2   # Add two units of a favorite
  clicklist cart --format json    # Cart as JSON
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logs, no error text).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Settings file to use instead of the default.
    #[arg(long, global = true, env = "CLICKLIST_CONFIG")]
    pub config: Option<PathBuf>,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and save the session.
    Login(login::LoginArgs),

    /// Forget the saved session.
    Logout,

    /// List favorite items.
    #[command(visible_alias = "fav")]
    Favorites,

    /// List recently purchased items.
    Recent,

    /// Show the cart.
    Cart,

    /// Add a favorite or recently purchased item to the cart.
    Add(cart::AddArgs),

    /// Remove an item from the cart.
    #[command(visible_alias = "rm")]
    Remove(cart::RemoveArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Not logged in, or the server rejected the session.
    LoginRequired = 2,
    /// Bad input (quantity, price, unknown item).
    InvalidInput = 3,
    /// Settings file could not be used.
    ConfigError = 4,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(e) = err.downcast_ref::<ClickListError>() {
            return match e {
                ClickListError::InvalidArgument(_) => ExitCode::InvalidInput,
                e if e.requires_login() => ExitCode::LoginRequired,
                _ => ExitCode::Error,
            };
        }
        if let Some(StoreError::Config(_) | StoreError::Corrupt { .. }) =
            err.downcast_ref::<StoreError>()
        {
            return ExitCode::ConfigError;
        }
        if err.downcast_ref::<commands::ItemNotFound>().is_some() {
            return ExitCode::InvalidInput;
        }
        ExitCode::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("clicklist=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("clicklist={level}")))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    // A missing .env is fine; credentials may come from flags or the shell.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let ctx = AppContext::load(cli.config.clone()).await;
    let level = ctx.as_ref().map_or(LogLevel::default(), |c| c.settings.log_level);
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match ctx {
        Ok(ctx) => run(&cli, &ctx).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
            if ExitCode::for_error(&e) == ExitCode::LoginRequired {
                eprintln!("Run `clicklist login` to start a new session.");
            }
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }
}

async fn run(cli: &Cli, ctx: &AppContext) -> Result<()> {
    match &cli.command {
        Commands::Login(args) => login::run(args, ctx, cli).await,
        Commands::Logout => login::logout(ctx, cli).await,
        Commands::Favorites => items::run(items::ItemList::Favorites, ctx, cli).await,
        Commands::Recent => items::run(items::ItemList::Recent, ctx, cli).await,
        Commands::Cart => cart::show(ctx, cli).await,
        Commands::Add(args) => cart::add(args, ctx, cli).await,
        Commands::Remove(args) => cart::remove(args, ctx, cli).await,
        Commands::Config(args) => config::run(args, ctx, cli).await,
    }
}
