use std::sync::Arc;

use micropos_core::settings::Settings;
use micropos_db::TableClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backend client. Tests substitute an in-memory implementation.
    pub client: Arc<dyn TableClient>,
    /// Application settings (version, environment, backend credentials).
    pub settings: Arc<Settings>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// The backend client as a trait object reference, as repositories take it.
    pub fn db(&self) -> &dyn TableClient {
        self.client.as_ref()
    }
}
