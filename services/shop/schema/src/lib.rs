//! sea-orm entities for the shop store.

pub mod accounts;
pub mod books;
pub mod order_items;
pub mod orders;
