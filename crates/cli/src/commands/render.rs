//! Plain-text rendering of store contents.

use std::fmt::Write;

use shopfront_core::{CartItem, Order, Product, User, cart_item_count, cart_total};

/// Write rendered output to stdout.
#[allow(clippy::print_stdout)]
pub fn print(text: &str) {
    print!("{text}");
}

/// Write a message to stderr.
#[allow(clippy::print_stderr)]
pub fn print_error(text: &str) {
    eprintln!("{text}");
}

pub fn products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products.\n".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "#{:<5} {:<32} {:>10}  {}{}{}",
            product.id,
            product.title,
            product.price,
            product.category,
            if product.is_sale { "  [sale]" } else { "" },
            if product.sold { "  [sold]" } else { "" },
        );
    }
    out
}

pub fn cart(items: &[CartItem]) -> String {
    if items.is_empty() {
        return "Cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "line {:<5} {:<32} {:>3} x {:>10} = {:>10}",
            item.id,
            item.product.title,
            item.quantity,
            item.product.price,
            item.line_total(),
        );
    }
    let _ = writeln!(
        out,
        "{} item(s), total {}",
        cart_item_count(items),
        cart_total(items)
    );
    out
}

pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders.\n".to_string();
    }

    let mut out = String::new();
    for order in orders {
        let _ = writeln!(
            out,
            "order {:<5} {:<32} {:>3} x {:>10} = {:>10}  {:<6} {}  {}",
            order.id,
            order.product.title,
            order.quantity,
            order.price,
            order.total(),
            order.payment_mode,
            order.status(),
            order.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    out
}

pub fn user(user: Option<&User>) -> String {
    user.map_or_else(
        || "Not logged in.\n".to_string(),
        |user| format!("{} ({}), user #{}\n", user.display_name(), user.mobile, user.id),
    )
}
