//! Favorites and recent purchases.

use anyhow::Result;
use tracing::info;

use super::AppContext;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Which item list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemList {
    /// Favorite items.
    Favorites,
    /// Recently purchased items.
    Recent,
}

impl ItemList {
    /// Heading used in text output.
    pub fn title(self) -> &'static str {
        match self {
            ItemList::Favorites => "Favorites",
            ItemList::Recent => "Recent purchases",
        }
    }
}

/// Runs the favorites or recent command.
pub async fn run(list: ItemList, ctx: &AppContext, cli: &Cli) -> Result<()> {
    let (mut client, email) = ctx.logged_in_client().await?;

    let result = match list {
        ItemList::Favorites => client.favorites().await,
        ItemList::Recent => client.recent_purchases().await,
    };
    let items = ctx.finish(&client, &email, result).await?;
    info!(list = list.title(), count = items.len(), "Items listed");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_items(list.title(), &items));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&items)?);
        }
    }
    Ok(())
}
