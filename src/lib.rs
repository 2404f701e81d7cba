pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use sea_orm::DatabaseConnection;

pub use config::Config;
pub use error::{AppError, AppResult};

// `sea_orm::DatabaseConnection` only derives `Clone` when the `mock` feature is
// disabled. The integration tests pull in `sea-orm/mock` (via the `mock`
// feature), which removes that derive, so under `mock` we provide an equivalent
// hand-written `Clone` that reproduces the derived behaviour variant-by-variant.
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

#[cfg(feature = "mock")]
impl Clone for AppState {
    fn clone(&self) -> Self {
        let db = match &self.db {
            DatabaseConnection::SqlxPostgresPoolConnection(c) => {
                DatabaseConnection::SqlxPostgresPoolConnection(c.clone())
            }
            DatabaseConnection::MockDatabaseConnection(c) => {
                DatabaseConnection::MockDatabaseConnection(c.clone())
            }
            DatabaseConnection::Disconnected => DatabaseConnection::Disconnected,
            #[allow(unreachable_patterns)]
            _ => DatabaseConnection::Disconnected,
        };
        AppState {
            db,
            config: self.config.clone(),
        }
    }
}
