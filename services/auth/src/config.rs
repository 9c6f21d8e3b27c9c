use serde::Deserialize;

use papdaew_auth_types::token::DEFAULT_SESSION_TTL_SECS;
use papdaew_core::config::Config;

/// Auth service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in seconds. Env var: `JWT_EXPIRES_IN_SECS`.
    #[serde(default = "default_jwt_expires_in_secs")]
    pub jwt_expires_in_secs: u64,
    /// Public base URL used in verification links.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// TCP port to listen on (default 3000).
    #[serde(default = "default_auth_port")]
    pub auth_port: u16,
    /// `production` turns on `Secure` cookies.
    #[serde(default = "default_node_env")]
    pub node_env: String,
    /// Argon2 memory cost in KiB; library default when unset.
    pub argon2_memory_kib: Option<u32>,
    /// Argon2 iteration count; library default when unset.
    pub argon2_iterations: Option<u32>,
}

fn default_jwt_expires_in_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

fn default_api_url() -> String {
    "http://localhost:3000".to_owned()
}

fn default_auth_port() -> u16 {
    3000
}

fn default_node_env() -> String {
    "development".to_owned()
}

impl Config for AuthConfig {}

impl AuthConfig {
    pub fn is_production(&self) -> bool {
        self.node_env.eq_ignore_ascii_case("production")
    }
}
