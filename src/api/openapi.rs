//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health, readers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "1.0.0",
        description = "Books, readers and borrow records"
    ),
    servers(
        (url = "/api", description = "Library API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::get_book_borrows,
        books::get_book_full,
        books::get_max_borrow_period,
        // Authors
        authors::get_author,
        // Readers
        readers::list_readers,
        readers::get_reader,
        readers::get_reader_borrows,
        readers::get_reader_full,
        readers::get_reader_statistics,
        readers::get_uppercase_emails,
        readers::get_lowercase_emails,
        readers::refresh_reader_info,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::models::Book,
            crate::models::ConditionGrade,
            crate::models::Author,
            crate::models::Borrow,
            crate::models::Reader,
            crate::models::ReaderStatistics,
            books::BookFullResponse,
            readers::ReaderFullResponse,
            readers::ReaderInfoResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Authors"),
        (name = "readers", description = "Readers and their borrows"),
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
