use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when `RUST_LOG` is unset: the service crate at `debug`, SQL statement
/// logging from sea-orm muted, everything else at `info`.
pub fn default_directives(service_crate: &str) -> String {
    format!("info,sqlx=warn,sea_orm=warn,{service_crate}=debug")
}

fn env_filter(service_crate: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(service_crate)))
}

/// Install the JSON stdout subscriber for `service_crate` (its Rust crate name, e.g.
/// `papdaew_auth`). Event fields are flattened to the top level and the request span, which
/// carries the `x-request-id`, is attached to every line.
///
/// Later calls are ignored.
pub fn init_tracing(service_crate: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(service_crate))
        .with(
            fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(false),
        )
        .try_init();
}
