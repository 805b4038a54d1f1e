use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use bookstore_domain::id::{AccountId, BookId, OrderId};
use bookstore_domain::money::Decimal;
use bookstore_domain::role::Role;
use bookstore_shop::domain::repository::{
    AccountRepository, BookRepository, CredentialService, OrderRepository,
};
use bookstore_shop::domain::types::{
    Account, Book, BookDraft, NewAccount, NewOrder, Order, OrderItem,
};
use bookstore_shop::error::ShopError;
use bookstore_shop_migration::Migrator;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ── FakeCredentials ──────────────────────────────────────────────────────────

/// Reversible stand-in for argon2 so use-case tests stay fast.
#[derive(Clone, Default)]
pub struct FakeCredentials;

impl CredentialService for FakeCredentials {
    fn hash(&self, password: &str) -> Result<String, ShopError> {
        Ok(format!("fake${password}"))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, ShopError> {
        Ok(digest.strip_prefix("fake$") == Some(password))
    }

    fn decoy_digest(&self) -> &str {
        "fake-decoy"
    }
}

/// [`FakeCredentials`] that counts `verify` calls.
#[derive(Clone, Default)]
pub struct CountingCredentials {
    pub verifications: Arc<AtomicUsize>,
}

impl CredentialService for CountingCredentials {
    fn hash(&self, password: &str) -> Result<String, ShopError> {
        FakeCredentials.hash(password)
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, ShopError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        FakeCredentials.verify(password, digest)
    }

    fn decoy_digest(&self) -> &str {
        FakeCredentials.decoy_digest()
    }
}

// ── MockAccountRepo ──────────────────────────────────────────────────────────

pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<Account>>> {
        Arc::clone(&self.accounts)
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ShopError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn create(&self, account: &NewAccount) -> Result<AccountId, ShopError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(ShopError::EmailAlreadyRegistered);
        }
        let id = AccountId(accounts.len() as i32 + 1);
        let now = Utc::now();
        accounts.push(Account {
            id,
            name: account.name.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            role: account.role,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }
}

pub fn test_account(id: i32, email: &str, password: &str, role: Role) -> Account {
    Account {
        id: AccountId(id),
        name: "Tester".into(),
        email: email.into(),
        password_hash: format!("fake${password}"),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ── MockBookRepo ─────────────────────────────────────────────────────────────

pub struct MockBookRepo {
    pub books: Arc<Mutex<Vec<Book>>>,
    /// Ids that behave as referenced by a line item on delete.
    pub in_use: Vec<BookId>,
}

impl MockBookRepo {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(Mutex::new(books)),
            in_use: vec![],
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl BookRepository for MockBookRepo {
    async fn list(&self) -> Result<Vec<Book>, ShopError> {
        Ok(self.books.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, ShopError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[BookId]) -> Result<Vec<Book>, ShopError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &BookDraft) -> Result<Book, ShopError> {
        let mut books = self.books.lock().unwrap();
        let book = book_from_draft(BookId(books.len() as i32 + 1), draft);
        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: BookId, draft: &BookDraft) -> Result<Option<Book>, ShopError> {
        let mut books = self.books.lock().unwrap();
        Ok(books.iter_mut().find(|b| b.id == id).map(|b| {
            *b = book_from_draft(id, draft);
            b.clone()
        }))
    }

    async fn delete(&self, id: BookId) -> Result<bool, ShopError> {
        if self.in_use.contains(&id) {
            return Err(ShopError::BookInUse);
        }
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }
}

fn book_from_draft(id: BookId, draft: &BookDraft) -> Book {
    Book {
        id,
        title: draft.title.clone(),
        author: draft.author.clone(),
        description: draft.description.clone(),
        image_url: draft.image_url.clone(),
        quantity: draft.quantity,
        price: draft.price,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn book_draft(title: &str, price: &str) -> BookDraft {
    BookDraft {
        title: title.into(),
        author: "Author".into(),
        description: None,
        image_url: None,
        quantity: 5,
        price: dec(price),
    }
}

pub fn test_book(id: i32, price: &str) -> Book {
    book_from_draft(BookId(id), &book_draft(&format!("Book {id}"), price))
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

pub struct MockOrderRepo {
    pub orders: Arc<Mutex<Vec<Order>>>,
}

impl MockOrderRepo {
    pub fn empty() -> Self {
        Self {
            orders: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn orders_handle(&self) -> Arc<Mutex<Vec<Order>>> {
        Arc::clone(&self.orders)
    }
}

impl OrderRepository for MockOrderRepo {
    async fn create_with_items(&self, order: &NewOrder) -> Result<OrderId, ShopError> {
        let mut orders = self.orders.lock().unwrap();
        let id = OrderId(orders.len() as i32 + 1);
        let now = Utc::now();
        orders.push(Order {
            id,
            account_id: order.account_id,
            total_amount: order.total_amount,
            items: order
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| OrderItem {
                    id: i as i32 + 1,
                    order_id: id,
                    book_id: item.book_id,
                    quantity: item.quantity,
                    price: item.price,
                    created_at: now,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<Order>, ShopError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.account_id == account_id)
            .cloned()
            .collect())
    }
}

// ── SQLite store ─────────────────────────────────────────────────────────────

/// Fresh in-memory store with every migration applied. A single pooled connection keeps
/// the database alive for the lifetime of the handle.
pub async fn migrated_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}
