/// Shared application state
///
/// Built once in `main` and borrowed by the controllers for the lifetime
/// of the session.

use sqlx::PgPool;
use std::sync::Arc;

use epicevents_core::telemetry::Telemetry;

use crate::config::Config;

/// State shared across the interactive session
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Telemetry collector handle
    pub telemetry: Telemetry,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        let telemetry = Telemetry::new(config.telemetry.dsn.clone());

        Self {
            db,
            config: Arc::new(config),
            telemetry,
        }
    }
}
