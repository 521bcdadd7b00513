//! API handlers for the library REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
pub mod readers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration: the browser client is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books/max-borrow-period/", get(books::blank_max_borrow_period))
        .route("/books/max-borrow-period/:title", get(books::get_max_borrow_period))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id/borrows", get(books::get_book_borrows))
        .route("/books/:id/full", get(books::get_book_full))
        // Authors
        .route("/authors/:id", get(authors::get_author))
        // Readers
        .route("/readers", get(readers::list_readers))
        .route("/readers", post(readers::refresh_reader_info))
        .route("/readers/uppercase-emails", get(readers::get_uppercase_emails))
        .route("/readers/lowercase-emails", get(readers::get_lowercase_emails))
        .route("/readers/:id", get(readers::get_reader))
        .route("/readers/:id/borrows", get(readers::get_reader_borrows))
        .route("/readers/:id/full", get(readers::get_reader_full))
        .route("/readers/:id/statistics", get(readers::get_reader_statistics))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
