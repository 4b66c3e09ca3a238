//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use clicklist_store::{Settings, default_cache_dir, default_config_dir};
use tracing::info;

use super::AppContext;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a settings file with the defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, ctx: &AppContext, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(ctx, cli),
        ConfigAction::Path => show_paths(ctx, cli),
        ConfigAction::Init { force } => init_config(ctx, *force).await,
    }
}

fn show_config(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let settings = &ctx.settings;

    match cli.format {
        OutputFormat::Text => {
            let client = &settings.client;
            println!("ClickList Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Base URL:      {}", client.base_url);
            println!("Timeout:       {}s", client.timeout_secs);
            println!("Max redirects: {}", client.max_redirects);
            println!("CSRF cookie:   {}", client.csrf_cookie);
            println!("CSRF header:   {}", client.csrf_header);
            println!("Log level:     {}", settings.log_level);
            println!("Session file:  {}", settings.session_path().display());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(settings)?);
        }
    }

    Ok(())
}

fn show_paths(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let cache_dir = default_cache_dir();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Cache dir:     {}", cache_dir.display());
            println!("Settings file: {}", ctx.settings_path.display());
            println!("Session file:  {}", ctx.sessions.path().display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "configDir": config_dir.display().to_string(),
                "cacheDir": cache_dir.display().to_string(),
                "settingsFile": ctx.settings_path.display().to_string(),
                "sessionFile": ctx.sessions.path().display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn init_config(ctx: &AppContext, force: bool) -> Result<()> {
    let path = &ctx.settings_path;

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Settings::default().save(path).await?;
    info!(path = %path.display(), "Settings initialized");
    println!("Wrote default settings to {}", path.display());

    Ok(())
}
