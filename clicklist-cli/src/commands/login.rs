//! Login and logout commands.

use anyhow::Result;
use clap::Args;
use clicklist_api::ClickListError;
use clicklist_store::StoredSession;
use tracing::info;

use super::AppContext;
use crate::output::{JsonFormatter, LoginOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long, short, env = "CLICKLIST_EMAIL")]
    pub email: String,

    /// Account password.
    #[arg(long, env = "CLICKLIST_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Runs the login command.
pub async fn run(args: &LoginArgs, ctx: &AppContext, cli: &Cli) -> Result<()> {
    let mut client = ctx.client()?;
    let response = client.login(&args.email, &args.password).await?;

    let session = client.take_session().ok_or(ClickListError::NotLoggedIn)?;
    ctx.sessions
        .save(&StoredSession::new(args.email.as_str(), session))
        .await?;
    info!(path = %ctx.sessions.path().display(), "Session saved");

    let output = LoginOutput::from_response(&args.email, &response);
    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_login(&output));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}

/// Runs the logout command. Only the saved session is removed; the server
/// is not contacted.
pub async fn logout(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let removed = ctx.sessions.delete().await?;

    match cli.format {
        OutputFormat::Text => {
            if removed {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({ "loggedOut": removed });
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}
