#![allow(async_fn_in_trait)]

use bookstore_domain::id::{AccountId, BookId, OrderId};

use crate::domain::types::{Account, Book, BookDraft, NewAccount, NewOrder, Order};
use crate::error::ShopError;

/// Repository for accounts.
pub trait AccountRepository: Send + Sync {
    /// Exact, case-sensitive email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ShopError>;

    /// Insert an account. A duplicate email yields [`ShopError::EmailAlreadyRegistered`].
    async fn create(&self, account: &NewAccount) -> Result<AccountId, ShopError>;
}

/// Repository for catalog items.
pub trait BookRepository: Send + Sync {
    /// All books ordered by id.
    async fn list(&self) -> Result<Vec<Book>, ShopError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, ShopError>;

    /// Books among `ids` that exist; absent ids are simply missing from the result.
    async fn find_by_ids(&self, ids: &[BookId]) -> Result<Vec<Book>, ShopError>;

    async fn create(&self, draft: &BookDraft) -> Result<Book, ShopError>;

    /// Replace every field. Returns `None` if the book does not exist.
    async fn update(&self, id: BookId, draft: &BookDraft) -> Result<Option<Book>, ShopError>;

    /// Returns `true` if a row was deleted. A book still referenced by a line item
    /// yields [`ShopError::BookInUse`].
    async fn delete(&self, id: BookId) -> Result<bool, ShopError>;
}

/// Repository for orders and their line items.
pub trait OrderRepository: Send + Sync {
    /// Insert the header and every line item in one transaction. Any failure leaves
    /// nothing behind.
    async fn create_with_items(&self, order: &NewOrder) -> Result<OrderId, ShopError>;

    /// Orders owned by `account_id`, oldest first, each with its items in insertion order.
    async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<Order>, ShopError>;
}

/// Salted, deliberately slow password hashing. The only component that sees raw passwords.
pub trait CredentialService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, ShopError>;

    /// `Ok(false)` for a non-matching pair; `Err` only for an unreadable digest.
    fn verify(&self, password: &str, digest: &str) -> Result<bool, ShopError>;

    /// A digest no password matches, costing the same to verify as a stored one. Login checks
    /// against it when the email is unknown.
    fn decoy_digest(&self) -> &str;
}
