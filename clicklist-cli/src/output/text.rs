//! Text output formatting with colors.

use clicklist_api::AddToCartResult;
use clicklist_core::{Cart, CartItem, CatalogItem};
use serde_json::Value;

use super::json::{LoginOutput, RemoveOutput};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Marker printed next to promotional prices.
const YELLOW_TAG: &str = "*";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the login confirmation.
    pub fn format_login(&self, output: &LoginOutput) -> String {
        let mut lines = vec![format!("Logged in as {}", self.bold(&output.email))];
        if let Some(store) = &output.store {
            lines.push(format!(
                "Store: {} {}",
                store.name,
                self.dim(&format!("({}, {})", store.code, store.address))
            ));
        }
        lines.join("\n")
    }

    /// Formats a favorites or recent purchases list.
    pub fn format_items(&self, title: &str, items: &[CatalogItem]) -> String {
        let mut lines = vec![self.bold(&format!("{title} ({})", items.len()))];
        if items.is_empty() {
            lines.push(self.dim("  (none)"));
        }

        for item in items {
            let price = item
                .unit_price()
                .map_or_else(|_| "-".to_string(), format_price);
            let tag = if item.current_price_is_yellow_tag {
                self.yellow(YELLOW_TAG)
            } else {
                " ".to_string()
            };
            lines.push(format!(
                "  {:<14} {:>8}{} {}",
                item.upc,
                price,
                tag,
                item.display_name()
            ));
        }
        lines.join("\n")
    }

    /// Formats the cart.
    pub fn format_cart(&self, cart: &Cart) -> String {
        let heading = match &cart.order_id {
            Some(id) => format!("Cart {}", self.dim(&format!("(order {id})"))),
            None => "Cart".to_string(),
        };
        let mut lines = vec![self.bold(&heading)];

        if cart.is_empty() {
            lines.push(self.dim("  (empty)"));
            return lines.join("\n");
        }

        let mut total = 0.0;
        for item in &cart.cart_items {
            let line_total = item
                .total_price
                .or_else(|| item.unit_price.map(|p| p * f64::from(item.quantity)));
            total += line_total.unwrap_or_default();
            lines.push(format!(
                "  {:<14} x{:<3} {:>8} {}",
                item.upc,
                item.quantity,
                line_total.map_or_else(|| "-".to_string(), format_price),
                cart_item_name(item)
            ));
        }

        lines.push(format!(
            "  {} units, {}",
            cart.total_units(),
            self.bold(&format_price(total))
        ));
        lines.join("\n")
    }

    /// Formats the add-to-cart confirmation.
    pub fn format_added(&self, result: &AddToCartResult) -> String {
        format!(
            "{} {} x {} ({}), {} in cart",
            self.green("Added"),
            result.item.quantity,
            result.item.item.display_name(),
            result.item.upc(),
            self.bold(&result.quantity.to_string())
        )
    }

    /// Formats the remove confirmation.
    pub fn format_removed(&self, output: &RemoveOutput) -> String {
        if output.removed.is_some() {
            format!("{} {}", self.green("Removed"), output.upc)
        } else {
            format!("{} was not in the cart", output.upc)
        }
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, style: &str, text: &str) -> String {
        if self.use_colors {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }
}

/// `$1.99`
pub(crate) fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

fn cart_item_name(item: &CartItem) -> &str {
    ["description", "name", "title"]
        .iter()
        .find_map(|key| item.extra.get(*key).and_then(Value::as_str))
        .unwrap_or("")
}
