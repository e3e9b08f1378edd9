pub mod store;

pub use store::Datastore;

use shared_config::AppConfig;

/// Shared axum state: the loaded configuration plus the record store every
/// cell's services operate on.
pub struct AppState {
    pub config: AppConfig,
    pub store: Datastore,
}
