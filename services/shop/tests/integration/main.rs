mod account_test;
mod bootstrap_test;
mod catalog_test;
mod helpers;
mod order_test;
