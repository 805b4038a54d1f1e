use std::collections::HashMap;

use tracing::{info, instrument};

use bookstore_domain::id::{AccountId, BookId, OrderId};
use bookstore_domain::money::{Decimal, is_valid_amount, order_total};

use crate::domain::repository::{BookRepository, OrderRepository};
use crate::domain::types::{NewOrder, NewOrderItem, Order};
use crate::error::ShopError;

// ── PlaceOrder ───────────────────────────────────────────────────────────────

pub struct OrderLineInput {
    pub book_id: BookId,
    pub quantity: i32,
    /// Unit price the client saw. Checked against the catalog when present.
    pub price: Option<Decimal>,
}

pub struct PlaceOrderInput {
    pub items: Vec<OrderLineInput>,
    /// Total the client computed. Checked against the server total when present.
    pub total_amount: Option<Decimal>,
}

#[derive(Debug)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub total_amount: Decimal,
}

pub struct PlaceOrderUseCase<O: OrderRepository, B: BookRepository> {
    pub orders: O,
    pub books: B,
}

impl<O: OrderRepository, B: BookRepository> PlaceOrderUseCase<O, B> {
    /// Prices come from the catalog; every check runs before the single write.
    #[instrument(skip_all, fields(account_id = %account_id, lines = input.items.len()))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        input: PlaceOrderInput,
    ) -> Result<PlacedOrder, ShopError> {
        if input.items.is_empty() {
            return Err(ShopError::MissingData);
        }
        for line in &input.items {
            if line.quantity <= 0 {
                return Err(ShopError::InvalidQuantity);
            }
            if line.price.is_some_and(|p| !is_valid_amount(p)) {
                return Err(ShopError::InvalidPrice);
            }
        }
        if input.total_amount.is_some_and(|t| !is_valid_amount(t)) {
            return Err(ShopError::InvalidPrice);
        }

        let mut ids: Vec<BookId> = input.items.iter().map(|l| l.book_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let catalog: HashMap<BookId, Decimal> = self
            .books
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b.price))
            .collect();

        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let price = *catalog.get(&line.book_id).ok_or(ShopError::BookNotFound)?;
            if line.price.is_some_and(|p| p != price) {
                return Err(ShopError::PriceMismatch);
            }
            items.push(NewOrderItem {
                book_id: line.book_id,
                quantity: line.quantity,
                price,
            });
        }

        let total_amount = order_total(items.iter().map(|i| (i.price, i.quantity)))
            .ok_or(ShopError::InvalidQuantity)?;
        if input.total_amount.is_some_and(|t| t != total_amount) {
            return Err(ShopError::TotalMismatch);
        }

        let id = self
            .orders
            .create_with_items(&NewOrder {
                account_id,
                total_amount,
                items,
            })
            .await?;
        info!(order_id = %id, %total_amount, "order placed");
        Ok(PlacedOrder { id, total_amount })
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListOrdersUseCase<O> {
    pub async fn execute(&self, account_id: AccountId) -> Result<Vec<Order>, ShopError> {
        self.orders.list_for_account(account_id).await
    }
}
