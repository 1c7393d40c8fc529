//! Shared application state for all routes.

use crate::service::DataManager;

#[derive(Clone)]
pub struct AppState {
    pub manager: DataManager,
}

impl AppState {
    pub fn new(manager: DataManager) -> Self {
        AppState { manager }
    }
}
