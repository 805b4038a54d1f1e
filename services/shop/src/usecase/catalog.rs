use bookstore_domain::id::BookId;

use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, BookDraft};
use crate::error::ShopError;

// ── ListBooks ────────────────────────────────────────────────────────────────

pub struct ListBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> ListBooksUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Book>, ShopError> {
        self.repo.list().await
    }
}

// ── GetBook ──────────────────────────────────────────────────────────────────

pub struct GetBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetBookUseCase<R> {
    pub async fn execute(&self, id: BookId) -> Result<Book, ShopError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ShopError::BookNotFound)
    }
}

// ── CreateBook ───────────────────────────────────────────────────────────────

pub struct CreateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> CreateBookUseCase<R> {
    pub async fn execute(&self, draft: BookDraft) -> Result<Book, ShopError> {
        draft.validate()?;
        self.repo.create(&draft).await
    }
}

// ── UpdateBook ───────────────────────────────────────────────────────────────

pub struct UpdateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> UpdateBookUseCase<R> {
    /// Changing the price does not touch existing line items; they keep their snapshot.
    pub async fn execute(&self, id: BookId, draft: BookDraft) -> Result<Book, ShopError> {
        draft.validate()?;
        self.repo
            .update(id, &draft)
            .await?
            .ok_or(ShopError::BookNotFound)
    }
}

// ── DeleteBook ───────────────────────────────────────────────────────────────

pub struct DeleteBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> DeleteBookUseCase<R> {
    pub async fn execute(&self, id: BookId) -> Result<(), ShopError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(ShopError::BookNotFound)
        }
    }
}
