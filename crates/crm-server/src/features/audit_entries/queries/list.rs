//! List audit entries query
//!
//! Newest first unless told otherwise.

use serde::Deserialize;

use crate::audit::AuditEntry;
use crate::db::{AuditRepository, AuditSortField};
use crate::error::AppError;
use crate::features::shared::{Page, PageError, PageRequest, Sort, SortError};

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_SIZE: i64 = 100;
pub const DEFAULT_SORT_BY: &str = "creationDatetime";
pub const DEFAULT_SORT_DIR: &str = "desc";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAuditEntriesQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListAuditEntriesError {
    #[error(transparent)]
    InvalidSort(#[from] SortError),

    #[error(transparent)]
    InvalidPage(#[from] PageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ListAuditEntriesError> for AppError {
    fn from(err: ListAuditEntriesError) -> Self {
        match err {
            ListAuditEntriesError::InvalidSort(e) => AppError::InvalidSortParameter(e.to_string()),
            ListAuditEntriesError::InvalidPage(e) => AppError::BadRequest(e.to_string()),
            ListAuditEntriesError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(repository))]
pub async fn handle(
    repository: &dyn AuditRepository,
    query: ListAuditEntriesQuery,
) -> Result<Page<AuditEntry>, ListAuditEntriesError> {
    let sort = Sort::<AuditSortField>::parse(
        query.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY),
        query.sort_dir.as_deref().unwrap_or(DEFAULT_SORT_DIR),
    )?;
    let request = PageRequest::new(
        query.page.unwrap_or(DEFAULT_PAGE),
        query.size.unwrap_or(DEFAULT_SIZE),
    )?;

    let (rows, total) = repository.find_page(&request, &sort).await?;
    Ok(Page::new(rows, &request, total))
}
