use chrono::{DateTime, Utc};

use bookstore_domain::id::{AccountId, BookId, OrderId};
use bookstore_domain::money::{Decimal, is_valid_amount};
use bookstore_domain::role::Role;

use crate::error::ShopError;

/// A stored account. `password_hash` is an encoded argon2 digest and never leaves the service.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Informational stock count. Orders do not decrement it.
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full field set accepted by catalog create and update.
#[derive(Debug, Clone)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

impl BookDraft {
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.title.trim().is_empty() || self.author.trim().is_empty() {
            return Err(ShopError::MissingData);
        }
        if self.quantity < 0 {
            return Err(ShopError::InvalidQuantity);
        }
        if !is_valid_amount(self.price) {
            return Err(ShopError::InvalidPrice);
        }
        Ok(())
    }
}

/// An order header together with every line item committed with it.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub account_id: AccountId,
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order. `price` is the unit price snapshot taken at order time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: OrderId,
    pub book_id: BookId,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Order ready to be written: prices resolved, total computed.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub account_id: AccountId,
    pub total_amount: Decimal,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub book_id: BookId,
    pub quantity: i32,
    pub price: Decimal,
}
