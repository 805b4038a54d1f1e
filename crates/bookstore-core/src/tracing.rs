use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or blank. sqlx statement logging stays quiet.
pub const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

/// Install the JSON stdout subscriber. Later calls are no-ops.
pub fn init_tracing() {
    let rust_log = std::env::var("RUST_LOG").ok();
    let _ = tracing_subscriber::registry()
        .with(filter_from(rust_log.as_deref()))
        .with(fmt::layer().json())
        .try_init();
}

/// An unparsable `RUST_LOG` falls back to [`DEFAULT_DIRECTIVES`] instead of silencing output.
fn filter_from(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
