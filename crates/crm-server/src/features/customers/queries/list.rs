//! List customers query
//!
//! Sort and paging parameters are checked, in that order, before the
//! repository is called.

use serde::Deserialize;

use crate::db::{CustomerRepository, CustomerSortField};
use crate::error::AppError;
use crate::features::shared::{Page, PageError, PageRequest, Sort, SortError};
use crate::models::Customer;

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_SIZE: i64 = 10;
pub const DEFAULT_SORT_BY: &str = "name";
pub const DEFAULT_SORT_DIR: &str = "asc";

/// Query string of `GET /api/customers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListCustomersError {
    #[error(transparent)]
    InvalidSort(#[from] SortError),

    #[error(transparent)]
    InvalidPage(#[from] PageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ListCustomersError> for AppError {
    fn from(err: ListCustomersError) -> Self {
        match err {
            ListCustomersError::InvalidSort(e) => AppError::InvalidSortParameter(e.to_string()),
            ListCustomersError::InvalidPage(e) => AppError::BadRequest(e.to_string()),
            ListCustomersError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(repository))]
pub async fn handle(
    repository: &dyn CustomerRepository,
    query: ListCustomersQuery,
) -> Result<Page<Customer>, ListCustomersError> {
    let sort = Sort::<CustomerSortField>::parse(
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
