pub mod account;
pub mod bootstrap;
pub mod catalog;
pub mod order;
