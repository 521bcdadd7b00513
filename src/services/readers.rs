//! Readers service: reader lookups, statistics and info refresh

use crate::{
    api::readers::ReaderFullResponse,
    error::{AppError, AppResult},
    models::{Borrow, Reader, ReaderStatistics},
    repository::{readers::EmailCase, Repository},
    store::StoreError,
};

/// Returned by an info refresh that left the info field empty
pub const INFO_PLACEHOLDER: &str = "Info added";

#[derive(Clone)]
pub struct ReadersService {
    repository: Repository,
}

/// Why an info refresh failed, before being reported for the reader
#[derive(Debug, thiserror::Error)]
enum RefreshFailure {
    #[error("reader does not exist")]
    MissingReader,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReadersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All readers with their returned-book count, by name
    pub async fn list_readers(&self) -> AppResult<Vec<Reader>> {
        Ok(self.repository.readers.list_with_read_count().await?)
    }

    /// Reader with `books_read` and `borrows` attached.
    ///
    /// Base fields, read count and borrows are fetched one after another.
    pub async fn get_reader_detailed(&self, reader_id: i32) -> AppResult<Option<Reader>> {
        let Some(mut reader) = self.repository.readers.get_by_id(reader_id).await? else {
            return Ok(None);
        };

        reader.books_read = self
            .repository
            .borrows
            .count_returned_by_reader(reader_id)
            .await?;
        reader.borrows = Some(self.repository.borrows.list_for_reader(reader_id).await?);
        Ok(Some(reader))
    }

    /// Borrows of a reader with elapsed days, newest first
    pub async fn get_reader_borrows(&self, reader_id: i32) -> AppResult<Vec<Borrow>> {
        Ok(self.repository.borrows.list_for_reader(reader_id).await?)
    }

    /// Borrow statistics; zeroed for a reader without borrows
    pub async fn get_statistics(&self, reader_id: i32) -> AppResult<ReaderStatistics> {
        Ok(self.repository.borrows.statistics_for_reader(reader_id).await?)
    }

    /// Reader, borrows and statistics in one payload
    pub async fn get_reader_full(&self, reader_id: i32) -> AppResult<Option<ReaderFullResponse>> {
        let Some(mut reader) = self.get_reader_detailed(reader_id).await.map_err(|e| match e {
            AppError::Store(source) => AppError::Lookup {
                context: format!("Failed to load full info for reader {}", reader_id),
                source,
            },
            other => other,
        })?
        else {
            return Ok(None);
        };

        let statistics = self
            .repository
            .borrows
            .statistics_for_reader(reader_id)
            .await
            .map_err(AppError::lookup(format!(
                "Failed to load statistics for reader {}",
                reader_id
            )))?;

        let borrows = reader.borrows.take().unwrap_or_default();
        Ok(Some(ReaderFullResponse {
            reader,
            borrows,
            statistics,
        }))
    }

    /// Non-blank reader emails in the given case, alphabetically
    pub async fn get_emails(&self, case: EmailCase) -> AppResult<Vec<String>> {
        Ok(self.repository.readers.emails(case).await?)
    }

    /// Recompute a reader's info text through the store procedure and return it.
    ///
    /// The procedure is only invoked for an existing reader. Every failure is
    /// reported as [`AppError::ReaderUpdate`] carrying the reader id.
    pub async fn refresh_info(&self, reader_id: i32) -> AppResult<String> {
        self.try_refresh_info(reader_id).await.map_err(|e| {
            tracing::warn!("Info refresh failed for reader {}: {}", reader_id, e);
            AppError::ReaderUpdate {
                reader_id,
                reason: e.to_string(),
            }
        })
    }

    async fn try_refresh_info(&self, reader_id: i32) -> Result<String, RefreshFailure> {
        if self.repository.readers.get_by_id(reader_id).await?.is_none() {
            return Err(RefreshFailure::MissingReader);
        }

        self.repository.readers.recompute_info(reader_id).await?;

        let info = self
            .repository
            .readers
            .get_info(reader_id)
            .await?
            .filter(|info| !info.trim().is_empty())
            .unwrap_or_else(|| INFO_PLACEHOLDER.to_string());

        tracing::info!("Refreshed info of reader {}", reader_id);
        Ok(info)
    }
}
