//! Reader endpoints

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::{Borrow, Reader, ReaderStatistics},
    repository::readers::EmailCase,
    AppState,
};

/// Reader summary, borrows and statistics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReaderFullResponse {
    /// Reader fields, without the borrow list
    pub reader: Reader,
    /// Newest first, with elapsed days
    pub borrows: Vec<Borrow>,
    pub statistics: ReaderStatistics,
}

/// Reader selected for an info refresh
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RefreshInfoQuery {
    /// Reader ID
    pub id: i32,
}

/// Reader id of an info refresh, taken from the query string.
///
/// A missing or malformed id is rejected with the refresh payload rather than
/// a plain-text body, using reader id 0.
pub struct RefreshTarget(pub i32);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RefreshTarget {
    type Rejection = (StatusCode, Json<ReaderInfoResponse>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<RefreshInfoQuery>::from_request_parts(parts, state).await {
            Ok(Query(query)) => Ok(Self(query.id)),
            Err(rejection) => Err(ReaderInfoResponse::failure(0, rejection.body_text())),
        }
    }
}

/// Outcome of an info refresh
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReaderInfoResponse {
    pub success: bool,
    pub message: String,
    pub reader_id: i32,
    /// Updated info text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ReaderInfoResponse {
    fn failure(reader_id: i32, reason: impl std::fmt::Display) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                success: false,
                message: format!("Error: {}", reason),
                reader_id,
                info: None,
            }),
        )
    }
}

/// List all readers with returned-book counts
#[utoipa::path(
    get,
    path = "/readers",
    tag = "readers",
    responses(
        (status = 200, description = "Readers ordered by name", body = Vec<Reader>)
    )
)]
pub async fn list_readers(State(state): State<AppState>) -> AppResult<Json<Vec<Reader>>> {
    let readers = state.services.readers.list_readers().await?;
    Ok(Json(readers))
}

/// Get a reader with read count and borrows
#[utoipa::path(
    get,
    path = "/readers/{id}",
    tag = "readers",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    responses(
        (status = 200, description = "Reader details", body = Reader),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn get_reader(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Reader>> {
    state
        .services
        .readers
        .get_reader_detailed(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Reader with id {} not found", id)))
}

/// Get the borrows of a reader
#[utoipa::path(
    get,
    path = "/readers/{id}/borrows",
    tag = "readers",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    responses(
        (status = 200, description = "Borrows, newest first", body = Vec<Borrow>)
    )
)]
pub async fn get_reader_borrows(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.readers.get_reader_borrows(id).await?;
    Ok(Json(borrows))
}

/// Get a reader with borrows and statistics
#[utoipa::path(
    get,
    path = "/readers/{id}/full",
    tag = "readers",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    responses(
        (status = 200, description = "Reader, borrows and statistics", body = ReaderFullResponse),
        (status = 404, description = "Reader not found"),
        (status = 500, description = "Lookup failed")
    )
)]
pub async fn get_reader_full(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReaderFullResponse>> {
    state
        .services
        .readers
        .get_reader_full(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Reader with id {} not found", id)))
}

/// Get borrow statistics of a reader
#[utoipa::path(
    get,
    path = "/readers/{id}/statistics",
    tag = "readers",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    responses(
        (status = 200, description = "Statistics, zeroed without borrows", body = ReaderStatistics)
    )
)]
pub async fn get_reader_statistics(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReaderStatistics>> {
    let statistics = state.services.readers.get_statistics(id).await?;
    Ok(Json(statistics))
}

async fn emails(state: &AppState, case: EmailCase) -> AppResult<Json<Vec<String>>> {
    let emails = state.services.readers.get_emails(case).await?;
    if emails.is_empty() {
        return Err(AppError::NotFound("No emails".to_string()));
    }
    Ok(Json(emails))
}

/// Reader emails in upper case
#[utoipa::path(
    get,
    path = "/readers/uppercase-emails",
    tag = "readers",
    responses(
        (status = 200, description = "Non-blank emails, alphabetically", body = Vec<String>),
        (status = 404, description = "No emails")
    )
)]
pub async fn get_uppercase_emails(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    emails(&state, EmailCase::Upper).await
}

/// Reader emails in lower case
#[utoipa::path(
    get,
    path = "/readers/lowercase-emails",
    tag = "readers",
    responses(
        (status = 200, description = "Non-blank emails, alphabetically", body = Vec<String>),
        (status = 404, description = "No emails")
    )
)]
pub async fn get_lowercase_emails(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    emails(&state, EmailCase::Lower).await
}

/// Recompute a reader's info text
#[utoipa::path(
    post,
    path = "/readers",
    tag = "readers",
    params(RefreshInfoQuery),
    responses(
        (status = 200, description = "Info updated", body = ReaderInfoResponse),
        (status = 400, description = "Reader missing or update failed", body = ReaderInfoResponse)
    )
)]
pub async fn refresh_reader_info(
    State(state): State<AppState>,
    RefreshTarget(reader_id): RefreshTarget,
) -> (StatusCode, Json<ReaderInfoResponse>) {
    match state.services.readers.refresh_info(reader_id).await {
        Ok(info) => (
            StatusCode::OK,
            Json(ReaderInfoResponse {
                success: true,
                message: "Info updated".to_string(),
                reader_id,
                info: Some(info),
            }),
        ),
        Err(e) => ReaderInfoResponse::failure(reader_id, e),
    }
}
