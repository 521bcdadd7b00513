//! Library catalog server
//!
//! REST JSON API over books, readers and borrow records kept in a relational
//! store. Rows are mapped into typed records through explicit column tables
//! (see [`store::mapper`]).

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the service graph over a store handle
    pub fn new(config: AppConfig, store: Arc<dyn store::Store>) -> Self {
        let repository = repository::Repository::new(store);
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
