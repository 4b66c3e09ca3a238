//! Cart commands: show, add, remove.

use anyhow::Result;
use clap::Args;
use clicklist_api::{AddToCartResult, ClickListClient, ClickListError};
use clicklist_core::{CatalogItem, Quantity};
use tracing::debug;

use super::{AppContext, ItemNotFound};
use crate::output::{JsonFormatter, RemoveOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product code (UPC) of a favorite or recently purchased item.
    pub upc: String,

    /// Units to add.
    #[arg(default_value = "1")]
    pub quantity: String,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product code (UPC) of the cart entry.
    pub upc: String,
}

/// Shows the cart.
pub async fn show(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let (mut client, email) = ctx.logged_in_client().await?;
    let result = client.cart().await;
    let cart = ctx.finish(&client, &email, result).await?;

    match cli.format {
        OutputFormat::Text => println!("{}", TextFormatter::new(!cli.no_color).format_cart(&cart)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&cart)?),
    }
    Ok(())
}

/// Adds an item to the cart.
pub async fn add(args: &AddArgs, ctx: &AppContext, cli: &Cli) -> Result<()> {
    let quantity: Quantity = args.quantity.parse().map_err(ClickListError::from)?;
    let (mut client, email) = ctx.logged_in_client().await?;

    let result = add_item(&mut client, &args.upc, quantity).await;
    let result = ctx.finish(&client, &email, result).await?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_added(&result));
        }
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&result)?),
    }
    Ok(())
}

/// Removes an item from the cart.
pub async fn remove(args: &RemoveArgs, ctx: &AppContext, cli: &Cli) -> Result<()> {
    let (mut client, email) = ctx.logged_in_client().await?;
    let response = client.remove_from_cart(&args.upc).await;
    let removed = ctx.finish(&client, &email, response).await?;

    let output = RemoveOutput {
        upc: args.upc.clone(),
        removed,
    };
    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_removed(&output));
        }
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&output)?),
    }
    Ok(())
}

/// Finds `upc` in the shopper's lists and adds it.
async fn add_item(
    client: &mut ClickListClient,
    upc: &str,
    quantity: Quantity,
) -> Result<AddToCartResult> {
    let item = find_item(client, upc).await?;
    Ok(client.add_to_cart(&item, quantity).await?)
}

/// Looks `upc` up in favorites, then in recent purchases.
async fn find_item(client: &mut ClickListClient, upc: &str) -> Result<CatalogItem> {
    if let Some(item) = client.favorites().await?.into_iter().find(|i| i.upc == upc) {
        debug!(upc, "Found in favorites");
        return Ok(item);
    }
    if let Some(item) = client
        .recent_purchases()
        .await?
        .into_iter()
        .find(|i| i.upc == upc)
    {
        debug!(upc, "Found in recent purchases");
        return Ok(item);
    }
    Err(ItemNotFound {
        upc: upc.to_string(),
    }
    .into())
}
