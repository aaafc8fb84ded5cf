//! Seed data for the fake backend.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shopfront_client::LoginCredentials;
use shopfront_core::{MobileNumber, Price, Product, ProductId};

/// CSRF token the backend issues until a login rotates it.
pub const CSRF_TOKEN: &str = "csrf-initial-4f2a9c";

/// Mobile number of the test user.
pub const MOBILE: &str = "9876543210";

/// The only one-time password the backend accepts.
pub const OTP: &str = "123456";

/// Ids handed out for carts, orders and users start above this.
pub const FIRST_ID: i64 = 100;

/// Credentials the backend accepts.
///
/// # Panics
///
/// Panics if [`MOBILE`] stops being a valid mobile number.
#[must_use]
pub fn credentials() -> LoginCredentials {
    let mobile = MobileNumber::parse(MOBILE).expect("fixture mobile number is valid");
    LoginCredentials::new(mobile, OTP)
}

fn created_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_557_600, 0).unwrap_or_default()
}

fn product(id: i64, title: &str, price: Decimal, category: &str, is_sale: bool) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::new(price),
        description: format!("{title} from the {category} range"),
        category: category.to_string(),
        image_url: format!("https://img.example.test/products/{id}.jpg"),
        sold: false,
        is_sale,
        date_of_sale: is_sale.then(|| NaiveDate::from_ymd_opt(2024, 6, 1)).flatten(),
        created_at: created_at(),
    }
}

/// Catalog served by `GET /api/products/`.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(1, "Trail Runner", Decimal::new(149_900, 2), "Shoes", false),
        product(2, "Canvas Sneaker", Decimal::new(79_950, 2), "Shoes", true),
        product(3, "Linen Shirt", Decimal::new(1_199, 0), "Clothing", false),
        product(4, "Denim Jacket", Decimal::new(2_499, 0), "Clothing", true),
        product(5, "Leather Wallet", Decimal::new(450, 0), "Accessories", false),
        product(6, "Silk Scarf", Decimal::new(35_075, 2), "Accessories", true),
    ]
}
