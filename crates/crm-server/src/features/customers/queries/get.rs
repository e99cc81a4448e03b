//! Get customer by id

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::models::Customer;

#[derive(Debug, thiserror::Error)]
pub enum GetCustomerError {
    #[error("Customer not found with id {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<GetCustomerError> for AppError {
    fn from(err: GetCustomerError) -> Self {
        match err {
            GetCustomerError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetCustomerError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(repository))]
pub async fn handle(repository: &dyn CustomerRepository, id: i64) -> Result<Customer, GetCustomerError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or(GetCustomerError::NotFound(id))
}
