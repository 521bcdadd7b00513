//! Book model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    column,
    store::{Column, MapRow},
};

/// Presentation bucket for a book's physical condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConditionGrade {
    Good,
    Fair,
    Poor,
}

impl ConditionGrade {
    /// Bucket a condition percentage: above 70 is good, above 30 fair, else poor
    pub fn from_percent(percent: Decimal) -> Self {
        if percent > Decimal::from(70) {
            ConditionGrade::Good
        } else if percent > Decimal::from(30) {
            ConditionGrade::Fair
        } else {
            ConditionGrade::Poor
        }
    }
}

/// Book as listed in the catalog, with its author's name joined in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: i32,
    pub title: String,
    pub author_id: i32,
    pub year_published: Option<i32>,
    pub pages: Option<i32>,
    pub genre: Option<String>,
    /// Physical condition, 0-100
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub condition_percent: Decimal,
    pub author_name: Option<String>,
    /// Derived from `condition_percent` when the book is served
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub condition_grade: Option<ConditionGrade>,
}

impl Book {
    /// Attach the presentation grade derived from the condition percentage
    pub fn graded(mut self) -> Self {
        self.condition_grade = Some(ConditionGrade::from_percent(self.condition_percent));
        self
    }
}

impl MapRow for Book {
    const COLUMNS: &'static [Column<Self>] = &[
        column!(Book, "BookId" => book_id),
        column!(Book, "Title" => title),
        column!(Book, "AuthorId" => author_id),
        column!(Book, "YearPublished" => year_published),
        column!(Book, "Pages" => pages),
        column!(Book, "Genre" => genre),
        column!(Book, "ConditionPercent" => condition_percent),
        column!(Book, "AuthorName" => author_name),
    ];
}

/// Title lookup for the longest borrow period
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BorrowPeriodQuery {
    #[validate(custom(function = "not_blank", message = "Book title is required"))]
    pub title: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
