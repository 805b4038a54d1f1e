use sea_orm_migration::prelude::*;

mod m20251001_000001_create_accounts;
mod m20251001_000002_create_books;
mod m20251001_000003_create_orders;
mod m20251001_000004_create_order_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_accounts::Migration),
            Box::new(m20251001_000002_create_books::Migration),
            Box::new(m20251001_000003_create_orders::Migration),
            Box::new(m20251001_000004_create_order_items::Migration),
        ]
    }
}
