//! Book endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Borrow},
    AppState,
};

/// Book with its borrow history
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookFullResponse {
    pub book: Book,
    /// Newest first
    pub borrows: Vec<Borrow>,
}

/// List all books with author names
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books ordered by title", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get book details
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Book>> {
    state
        .services
        .catalog
        .get_book(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
}

/// Get the borrow history of a book
#[utoipa::path(
    get,
    path = "/books/{id}/borrows",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Borrows, newest first", body = Vec<Borrow>)
    )
)]
pub async fn get_book_borrows(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.catalog.get_book_borrows(id).await?;
    Ok(Json(borrows))
}

/// Get a book together with its borrow history
#[utoipa::path(
    get,
    path = "/books/{id}/full",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book and borrows", body = BookFullResponse),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Lookup failed")
    )
)]
pub async fn get_book_full(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookFullResponse>> {
    state
        .services
        .catalog
        .get_book_full(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
}

/// Longest borrow period recorded for a title
#[utoipa::path(
    get,
    path = "/books/max-borrow-period/{title}",
    tag = "books",
    params(
        ("title" = String, Path, description = "Book title")
    ),
    responses(
        (status = 200, description = "Free-form result lines", body = Vec<String>),
        (status = 400, description = "Blank title")
    )
)]
pub async fn get_max_borrow_period(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let lines = state.services.catalog.max_borrow_period(&title).await?;
    Ok(Json(lines))
}

/// Title segment left empty: rejected by the same validation as a blank title
pub async fn blank_max_borrow_period(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let lines = state.services.catalog.max_borrow_period("").await?;
    Ok(Json(lines))
}
