//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::infra::Database;
use user_service_lib::service::UserService;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub database: Database,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserService>, database: Database, config: GatewayConfig) -> Self {
        Self {
            users,
            database,
            config,
        }
    }

    /// State backed by the user service wired onto `database`.
    pub fn from_database(database: Database, config: GatewayConfig) -> Self {
        let users = user_service_lib::user_service(&database);
        Self::new(users, database, config)
    }
}
