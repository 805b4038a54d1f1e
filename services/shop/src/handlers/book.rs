use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookstore_auth_types::guard::RequireAdmin;
use bookstore_domain::id::BookId;
use bookstore_domain::money::Decimal;

use crate::domain::types::{Book, BookDraft};
use crate::error::ShopError;
use crate::handlers::{AppJson, AppPath, MessageResponse};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateBookUseCase, DeleteBookUseCase, GetBookUseCase, ListBooksUseCase, UpdateBookUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub quantity: i32,
    #[serde(serialize_with = "bookstore_core::serde::to_money_string")]
    pub price: Decimal,
    #[serde(serialize_with = "bookstore_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "bookstore_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
            image_url: book.image_url,
            quantity: book.quantity,
            price: book.price,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Body for create and update. Every field is replaced on update.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub quantity: i32,
    pub price: Option<Decimal>,
}

impl TryFrom<BookRequest> for BookDraft {
    type Error = ShopError;

    fn try_from(body: BookRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: body.title,
            author: body.author,
            description: body.description.filter(|d| !d.is_empty()),
            image_url: body.image_url.filter(|u| !u.is_empty()),
            quantity: body.quantity,
            price: body.price.ok_or(ShopError::MissingData)?,
        })
    }
}

// ── GET /api/books ───────────────────────────────────────────────────────────

pub async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookResponse>>, ShopError> {
    let usecase = ListBooksUseCase {
        repo: state.book_repo(),
    };
    let books = usecase.execute().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

// ── GET /api/books/{id} ──────────────────────────────────────────────────────

pub async fn get_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<BookId>,
) -> Result<Json<BookResponse>, ShopError> {
    let usecase = GetBookUseCase {
        repo: state.book_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/books ──────────────────────────────────────────────────────────

pub async fn create_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(body): AppJson<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ShopError> {
    let usecase = CreateBookUseCase {
        repo: state.book_repo(),
    };
    let book = usecase.execute(body.try_into()?).await?;
    tracing::info!(book_id = %book.id, account_id = %admin.account_id, "book created");
    Ok((StatusCode::CREATED, Json(book.into())))
}

// ── PUT /api/books/{id} ──────────────────────────────────────────────────────

pub async fn update_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<BookId>,
    AppJson(body): AppJson<BookRequest>,
) -> Result<Json<BookResponse>, ShopError> {
    let usecase = UpdateBookUseCase {
        repo: state.book_repo(),
    };
    let book = usecase.execute(id, body.try_into()?).await?;
    tracing::info!(book_id = %id, account_id = %admin.account_id, "book updated");
    Ok(Json(book.into()))
}

// ── DELETE /api/books/{id} ───────────────────────────────────────────────────

pub async fn delete_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<BookId>,
) -> Result<Json<MessageResponse>, ShopError> {
    let usecase = DeleteBookUseCase {
        repo: state.book_repo(),
    };
    usecase.execute(id).await?;
    tracing::info!(book_id = %id, account_id = %admin.account_id, "book deleted");
    Ok(Json(MessageResponse {
        message: "Book deleted successfully",
    }))
}
