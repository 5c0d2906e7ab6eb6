use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub redis_url: String,
    /// MongoDB connection string for the destination seed source.
    pub mongo_url: String,
    /// MongoDB database holding the `destinations` collection.
    pub mongo_db_name: String,
    /// Shared secret for signing quiz tokens (HS256).
    pub jwt_secret: String,
    /// Public base URL of this service, used when building invite deep links.
    pub public_base_url: String,
    /// Set to "production" for JSON logging, anything else for human-readable.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking.
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}
