use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookstore_auth_types::guard::Authenticated;
use bookstore_domain::id::{AccountId, BookId, OrderId};
use bookstore_domain::money::Decimal;

use crate::domain::types::{Order, OrderItem};
use crate::error::ShopError;
use crate::handlers::AppJson;
use crate::state::AppState;
use crate::usecase::order::{
    ListOrdersUseCase, OrderLineInput, PlaceOrderInput, PlaceOrderUseCase,
};

// ── POST /api/orders ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub book_id: BookId,
    pub quantity: i32,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderLineRequest>,
    pub total_amount: Option<Decimal>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub id: OrderId,
    #[serde(serialize_with = "bookstore_core::serde::to_money_string")]
    pub total_amount: Decimal,
    pub message: &'static str,
}

pub async fn place_order(
    identity: Authenticated,
    State(state): State<AppState>,
    AppJson(body): AppJson<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), ShopError> {
    let usecase = PlaceOrderUseCase {
        orders: state.order_repo(),
        books: state.book_repo(),
    };
    let placed = usecase
        .execute(
            identity.account_id,
            PlaceOrderInput {
                items: body
                    .items
                    .into_iter()
                    .map(|line| OrderLineInput {
                        book_id: line.book_id,
                        quantity: line.quantity,
                        price: line.price,
                    })
                    .collect(),
                total_amount: body.total_amount,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            id: placed.id,
            total_amount: placed.total_amount,
            message: "Order placed successfully",
        }),
    ))
}

// ── GET /api/orders ──────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i32,
    pub order_id: OrderId,
    pub book_id: BookId,
    pub quantity: i32,
    #[serde(serialize_with = "bookstore_core::serde::to_money_string")]
    pub price: Decimal,
    #[serde(serialize_with = "bookstore_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            order_id: item.order_id,
            book_id: item.book_id,
            quantity: item.quantity,
            price: item.price,
            created_at: item.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: AccountId,
    #[serde(serialize_with = "bookstore_core::serde::to_money_string")]
    pub total_amount: Decimal,
    #[serde(serialize_with = "bookstore_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "bookstore_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.account_id,
            total_amount: order.total_amount,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

pub async fn list_orders(
    identity: Authenticated,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ShopError> {
    let usecase = ListOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase.execute(identity.account_id).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
