use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, RuntimeErr, SqlErr, TransactionError,
    TransactionTrait,
};

use bookstore_domain::id::{AccountId, BookId, OrderId};
use bookstore_domain::money::to_money;
use bookstore_domain::role::Role;
use bookstore_shop_schema::{accounts, books, order_items, orders};

use crate::domain::repository::{AccountRepository, BookRepository, OrderRepository};
use crate::domain::types::{
    Account, Book, BookDraft, NewAccount, NewOrder, Order, OrderItem,
};
use crate::error::ShopError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Postgres `23001` (restrict_violation) and SQLite `1811` (SQLITE_CONSTRAINT_TRIGGER, raised
/// by `ON DELETE RESTRICT`) are not classified by [`DbErr::sql_err`].
const RESTRICT_VIOLATION_CODES: [&str; 2] = ["23001", "1811"];

fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
        || is_restrict_violation(err)
}

fn is_restrict_violation(err: &DbErr) -> bool {
    let (DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e))) = err
    else {
        return false;
    };
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| RESTRICT_VIOLATION_CODES.contains(&code.as_ref()))
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ShopError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        model.map(account_from_model).transpose()
    }

    async fn create(&self, account: &NewAccount) -> Result<AccountId, ShopError> {
        let now = Utc::now();
        let inserted = accounts::ActiveModel {
            name: Set(account.name.clone()),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            role: Set(account.role.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(model) => Ok(AccountId(model.id)),
            Err(e) if is_unique_violation(&e) => Err(ShopError::EmailAlreadyRegistered),
            Err(e) => Err(anyhow::Error::new(e).context("create account").into()),
        }
    }
}

fn account_from_model(model: accounts::Model) -> Result<Account, ShopError> {
    let role = model
        .role
        .parse::<Role>()
        .with_context(|| format!("account {} has unreadable role", model.id))?;
    Ok(Account {
        id: AccountId(model.id),
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: DatabaseConnection,
}

impl BookRepository for DbBookRepository {
    async fn list(&self) -> Result<Vec<Book>, ShopError> {
        let models = books::Entity::find()
            .order_by_asc(books::Column::Id)
            .all(&self.db)
            .await
            .context("list books")?;
        Ok(models.into_iter().map(book_from_model).collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, ShopError> {
        let model = books::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find book by id")?;
        Ok(model.map(book_from_model))
    }

    async fn find_by_ids(&self, ids: &[BookId]) -> Result<Vec<Book>, ShopError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = books::Entity::find()
            .filter(books::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .context("find books by ids")?;
        Ok(models.into_iter().map(book_from_model).collect())
    }

    async fn create(&self, draft: &BookDraft) -> Result<Book, ShopError> {
        let now = Utc::now();
        let model = books::ActiveModel {
            title: Set(draft.title.clone()),
            author: Set(draft.author.clone()),
            description: Set(draft.description.clone()),
            image_url: Set(draft.image_url.clone()),
            quantity: Set(draft.quantity),
            price: Set(draft.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create book")?;
        Ok(book_from_model(model))
    }

    async fn update(&self, id: BookId, draft: &BookDraft) -> Result<Option<Book>, ShopError> {
        let updated = books::ActiveModel {
            id: Set(id.0),
            title: Set(draft.title.clone()),
            author: Set(draft.author.clone()),
            description: Set(draft.description.clone()),
            image_url: Set(draft.image_url.clone()),
            quantity: Set(draft.quantity),
            price: Set(draft.price),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await;

        match updated {
            Ok(model) => Ok(Some(book_from_model(model))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update book").into()),
        }
    }

    async fn delete(&self, id: BookId) -> Result<bool, ShopError> {
        // `None` means the book is still referenced by an order line.
        let deleted = self
            .db
            .transaction::<_, Option<bool>, DbErr>(move |txn| {
                Box::pin(async move {
                    let references = order_items::Entity::find()
                        .filter(order_items::Column::BookId.eq(id.0))
                        .count(txn)
                        .await?;
                    if references > 0 {
                        return Ok(None);
                    }
                    let res = books::Entity::delete_by_id(id.0).exec(txn).await?;
                    Ok(Some(res.rows_affected > 0))
                })
            })
            .await;

        match deleted {
            Ok(Some(found)) => Ok(found),
            Ok(None) => Err(ShopError::BookInUse),
            // An order line was inserted between the count and the delete.
            Err(TransactionError::Transaction(e)) if is_foreign_key_violation(&e) => {
                Err(ShopError::BookInUse)
            }
            Err(e) => Err(anyhow::Error::new(e).context("delete book").into()),
        }
    }
}

fn book_from_model(model: books::Model) -> Book {
    Book {
        id: BookId(model.id),
        title: model.title,
        author: model.author,
        description: model.description,
        image_url: model.image_url,
        quantity: model.quantity,
        price: to_money(model.price),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn create_with_items(&self, order: &NewOrder) -> Result<OrderId, ShopError> {
        let created = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                let order = order.clone();
                Box::pin(async move {
                    let now = Utc::now();
                    let header = orders::ActiveModel {
                        account_id: Set(order.account_id.0),
                        total_amount: Set(order.total_amount),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    for item in &order.items {
                        order_items::ActiveModel {
                            order_id: Set(header.id),
                            book_id: Set(item.book_id.0),
                            quantity: Set(item.quantity),
                            price: Set(item.price),
                            created_at: Set(now),
                            updated_at: Set(now),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(header.id)
                })
            })
            .await;

        match created {
            Ok(id) => Ok(OrderId(id)),
            // The referenced book was deleted after the order was priced.
            Err(TransactionError::Transaction(e)) if is_foreign_key_violation(&e) => {
                Err(ShopError::BookNotFound)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("create order with items")
                .into()),
        }
    }

    async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<Order>, ShopError> {
        let rows = orders::Entity::find()
            .filter(orders::Column::AccountId.eq(account_id.0))
            .order_by_asc(orders::Column::Id)
            .find_with_related(order_items::Entity)
            .order_by_asc(order_items::Column::Id)
            .all(&self.db)
            .await
            .context("list orders with items")?;
        Ok(rows.into_iter().map(order_from_models).collect())
    }
}

fn order_from_models((header, items): (orders::Model, Vec<order_items::Model>)) -> Order {
    Order {
        id: OrderId(header.id),
        account_id: AccountId(header.account_id),
        total_amount: to_money(header.total_amount),
        items: items
            .into_iter()
            .map(|item| OrderItem {
                id: item.id,
                order_id: OrderId(item.order_id),
                book_id: BookId(item.book_id),
                quantity: item.quantity,
                price: to_money(item.price),
                created_at: item.created_at,
            })
            .collect(),
        created_at: header.created_at,
        updated_at: header.updated_at,
    }
}
