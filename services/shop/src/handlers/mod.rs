pub mod account;
pub mod book;
pub mod health;
pub mod order;

use axum::extract::{FromRequest, FromRequestParts};
use serde::Serialize;

use crate::error::ShopError;

/// JSON body extractor whose rejection is a [`ShopError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ShopError))]
pub struct AppJson<T>(pub T);

/// Path extractor whose rejection is a [`ShopError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ShopError))]
pub struct AppPath<T>(pub T);

/// `{"message": "..."}` acknowledgement body.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
