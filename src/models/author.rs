//! Author model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::Book;
use crate::{
    column,
    store::{Column, MapRow},
};

/// Author with the books credited to them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub author_id: i32,
    pub author_name: String,
    pub birth_year: Option<i32>,
    /// Number of books by this author, computed at read time
    pub books_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<Book>>,
}

impl MapRow for Author {
    const COLUMNS: &'static [Column<Self>] = &[
        column!(Author, "AuthorId" => author_id),
        column!(Author, "AuthorName" => author_name),
        column!(Author, "BirthYear" => birth_year),
    ];
}
