use sea_orm_migration::prelude::*;

use bookstore_shop_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
