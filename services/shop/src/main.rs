use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::info;

use bookstore_auth_types::token::TokenService;
use bookstore_core::tracing::init_tracing;

use bookstore_shop::config::ShopConfig;
use bookstore_shop::infra::credential::Argon2Credentials;
use bookstore_shop::router::{HttpOptions, build_router};
use bookstore_shop::state::AppState;
use bookstore_shop::usecase::bootstrap::EnsureAdminUseCase;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ShopConfig::from_env();

    let db_timeout = Duration::from_secs(config.db_timeout_secs);
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .connect_timeout(db_timeout)
        .acquire_timeout(db_timeout)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        tokens: TokenService::new(config.jwt_secret.as_bytes()),
        credentials: Argon2Credentials::default(),
    };

    if let Some(seed) = &config.admin {
        let usecase = EnsureAdminUseCase {
            repo: state.account_repo(),
            credentials: state.credentials.clone(),
        };
        usecase
            .execute(seed)
            .await
            .expect("failed to ensure admin account");
    }

    let router = build_router(state, &HttpOptions::from(&config));
    let http_addr = format!("0.0.0.0:{}", config.shop_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("shop service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
