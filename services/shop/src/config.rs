/// Shop service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ShopConfig {
    /// Database connection URL.
    pub database_url: String,
    /// HMAC key for session tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3000). Env var: `SHOP_PORT`.
    pub shop_port: u16,
    /// Pool size (default 10). Env var: `DB_MAX_CONNECTIONS`.
    pub db_max_connections: u32,
    /// Connect and acquire timeout in seconds (default 5). Env var: `DB_TIMEOUT_SECS`.
    pub db_timeout_secs: u64,
    /// Per-request timeout in seconds (default 10). Env var: `REQUEST_TIMEOUT_SECS`.
    pub request_timeout_secs: u64,
    /// Single browser origin allowed by CORS. Env var: `CORS_ALLOWED_ORIGIN`.
    pub cors_allowed_origin: Option<String>,
    /// Admin account ensured at startup, when configured.
    pub admin: Option<AdminSeed>,
}

/// `ADMIN_EMAIL` / `ADMIN_PASSWORD` / `ADMIN_NAME`.
#[derive(Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl ShopConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            shop_port: parse_or("SHOP_PORT", 3000),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            db_timeout_secs: parse_or("DB_TIMEOUT_SECS", 5),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 10),
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN"),
            admin: match (non_empty("ADMIN_EMAIL"), non_empty("ADMIN_PASSWORD")) {
                (Some(email), Some(password)) => Some(AdminSeed {
                    name: non_empty("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_owned()),
                    email,
                    password,
                }),
                _ => None,
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
