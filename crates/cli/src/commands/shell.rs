//! Interactive shop session.
//!
//! Reads one command per line from stdin and runs it against a single
//! [`Shop`], so state (session, cart, filters) carries over between lines.
//! A failed write prints the backend's message and the session continues.

use clap::{Parser, Subcommand};
use shopfront_client::{LoginCredentials, Shop};
use shopfront_core::{
    CartItemId, FiltersUpdate, MobileNumber, OrderId, PaymentMode, ProductId, QuantityAction,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{CliError, FilterArgs, render};

/// One line of shell input.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// Log in with a mobile number and one-time password
    Login {
        mobile: MobileNumber,
        otp: String,
        /// Full name, for first-time registration
        #[arg(long, num_args = 1..)]
        name: Vec<String>,
    },
    /// End the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Reload and list products with the current filters
    Products,
    /// Change the product filters and reload the listing
    Filter(FilterArgs),
    /// List the best-selling products
    MostBought,
    /// Show the cart
    Cart,
    /// Add one unit of a product to the cart
    Add { product_id: ProductId },
    /// Increase a cart line by one
    Inc { item_id: CartItemId },
    /// Decrease a cart line by one
    Dec { item_id: CartItemId },
    /// Remove a cart line
    Rm { item_id: CartItemId },
    /// Empty the cart
    Clear,
    /// Reload and list orders
    Orders,
    /// Place an order for the whole cart
    Order { payment_mode: PaymentMode },
    /// Cancel an order
    Cancel { order_id: OrderId },
    /// Navigate to a view through the router guard
    Go { path: String },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Run the shell until `quit` or end of input.
pub async fn run(shop: &mut Shop) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.first() {
            None => continue,
            Some(word) if word.starts_with('#') => continue,
            Some(_) => {}
        }

        let command = match Line::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                render::print_error(&e.render().to_string());
                continue;
            }
        };

        match execute(shop, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => render::print_error(&format!("error: {}", e.user_message())),
        }
    }

    Ok(())
}

async fn execute(
    shop: &mut Shop,
    command: ShellCommand,
) -> Result<Flow, shopfront_client::ClientError> {
    match command {
        ShellCommand::Login { mobile, otp, name } => {
            let mut credentials = LoginCredentials::new(mobile, otp);
            if !name.is_empty() {
                credentials = credentials.with_full_name(name.join(" "));
            }
            let response = shop.login(&credentials).await?;
            render::print(&format!("{}\n", response.message));
            render::print(&render::cart(shop.state().cart()));
        }
        ShellCommand::Logout => {
            shop.logout().await;
            render::print("Logged out.\n");
        }
        ShellCommand::Whoami => {
            if !shop.state().is_authenticated() {
                shop.check_auth().await;
            }
            render::print(&render::user(shop.state().user()));
        }
        ShellCommand::Products => {
            shop.fetch_products().await;
            render::print(&render::products(shop.state().filtered_products()));
        }
        ShellCommand::Filter(args) => {
            shop.apply_filters(FiltersUpdate::from(args)).await;
            render::print(&render::products(shop.state().filtered_products()));
        }
        ShellCommand::MostBought => {
            shop.fetch_most_bought().await;
            render::print(&render::products(shop.state().most_bought()));
        }
        ShellCommand::Cart => {
            shop.fetch_cart().await;
            render::print(&render::cart(shop.state().cart()));
        }
        ShellCommand::Add { product_id } => {
            shop.add_to_cart(product_id).await?;
            render::print(&render::cart(shop.state().cart()));
        }
        ShellCommand::Inc { item_id } => {
            shop.update_cart_quantity(item_id, QuantityAction::Increase)
                .await?;
            render::print(&render::cart(shop.state().cart()));
        }
        ShellCommand::Dec { item_id } => {
            shop.update_cart_quantity(item_id, QuantityAction::Decrease)
                .await?;
            render::print(&render::cart(shop.state().cart()));
        }
        ShellCommand::Rm { item_id } => {
            shop.remove_from_cart(item_id).await?;
            render::print(&render::cart(shop.state().cart()));
        }
        ShellCommand::Clear => {
            shop.clear_cart().await?;
            render::print(&render::cart(shop.state().cart()));
        }
        ShellCommand::Orders => {
            shop.fetch_orders().await;
            render::print(&render::orders(shop.state().orders()));
        }
        ShellCommand::Order { payment_mode } => {
            let placed = shop.place_order(payment_mode).await?;
            render::print(&format!("Placed {} order(s).\n", placed.len()));
            render::print(&render::orders(shop.state().orders()));
        }
        ShellCommand::Cancel { order_id } => {
            let order = shop.cancel_order(order_id).await?;
            render::print(&format!("Order {} is {}.\n", order.id, order.status()));
        }
        ShellCommand::Go { path } => {
            let navigation = shop.navigate(&path).await;
            render::print(&format!("-> {}\n", navigation.location()));
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        Line::try_parse_from(line.split_whitespace()).unwrap().command
    }

    #[test]
    fn test_parse_login_with_name() {
        let ShellCommand::Login { mobile, otp, name } =
            parse("login 9876543210 1234 --name Priya Sharma")
        else {
            panic!("expected login");
        };
        assert_eq!(mobile.as_str(), "9876543210");
        assert_eq!(otp, "1234");
        assert_eq!(name, ["Priya", "Sharma"]);
    }

    #[test]
    fn test_parse_ids_and_modes() {
        assert!(matches!(
            parse("add 5"),
            ShellCommand::Add { product_id } if product_id == ProductId::new(5)
        ));
        assert!(matches!(
            parse("dec 7"),
            ShellCommand::Dec { item_id } if item_id == CartItemId::new(7)
        ));
        assert!(matches!(
            parse("order online"),
            ShellCommand::Order {
                payment_mode: PaymentMode::Online
            }
        ));
        assert!(matches!(parse("exit"), ShellCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Line::try_parse_from(["add", "five"]).is_err());
        assert!(Line::try_parse_from(["order", "card"]).is_err());
        assert!(Line::try_parse_from(["login", "not-a-number", "1234"]).is_err());
        assert!(Line::try_parse_from(["filter", "--sale", "--no-sale"]).is_err());
    }
}
