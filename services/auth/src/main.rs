use sea_orm::Database;
use tracing::info;

use papdaew_auth::config::AuthConfig;
use papdaew_auth::router::build_router;
use papdaew_auth::security::password::CredentialHasher;
use papdaew_auth::state::AppState;
use papdaew_core::config::Config;
use papdaew_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing(env!("CARGO_CRATE_NAME"));

    let config = AuthConfig::from_env();

    let hasher = match (config.argon2_memory_kib, config.argon2_iterations) {
        (None, None) => CredentialHasher::default(),
        (memory, iterations) => CredentialHasher::new(
            memory.unwrap_or(argon2::Params::DEFAULT_M_COST),
            iterations.unwrap_or(argon2::Params::DEFAULT_T_COST),
        )
        .expect("invalid ARGON2_* configuration"),
    };

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState::new(db, &config, hasher);

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
