use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use bookstore_core::error::not_found;
use bookstore_core::health::healthz;
use bookstore_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::config::ShopConfig;
use crate::handlers::{
    account::{admin_login, login, me, register},
    book::{create_book, delete_book, get_book, list_books, update_book},
    health::readyz,
    order::{list_orders, place_order},
};
use crate::state::AppState;

/// Transport settings applied around every route.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub request_timeout: Duration,
    pub cors_allowed_origin: Option<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            cors_allowed_origin: None,
        }
    }
}

impl From<&ShopConfig> for HttpOptions {
    fn from(config: &ShopConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            cors_allowed_origin: config.cors_allowed_origin.clone(),
        }
    }
}

pub fn build_router(state: AppState, options: &HttpOptions) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/admin/login", post(admin_login))
        .route("/api/me", get(me))
        // Catalog
        .route("/api/books", get(list_books).post(create_book))
        .route(
            "/api/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        // Orders
        .route("/api/orders", get(list_orders).post(place_order))
        .fallback(not_found)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            options.request_timeout,
        ));

    let router = match options.cors_allowed_origin.as_deref().map(cors_layer) {
        Some(Some(cors)) => router.layer(cors),
        _ => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}

fn cors_layer(origin: &str) -> Option<CorsLayer> {
    let Ok(origin) = HeaderValue::from_str(origin) else {
        tracing::warn!(origin, "ignoring unparsable CORS origin");
        return None;
    };
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
    )
}
