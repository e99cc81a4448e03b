//! Update customer command
//!
//! A full overwrite: every field comes from the validated input, so optional
//! fields sent as `null` or left out are cleared. The id never changes.

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::models::{Customer, CustomerInput};

#[derive(Debug, thiserror::Error)]
pub enum UpdateCustomerError {
    #[error("Customer not found with id {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UpdateCustomerError> for AppError {
    fn from(err: UpdateCustomerError) -> Self {
        match err {
            UpdateCustomerError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateCustomerError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(repository, input))]
pub async fn handle(
    repository: &dyn CustomerRepository,
    id: i64,
    input: CustomerInput,
) -> Result<Customer, UpdateCustomerError> {
    repository
        .update(id, input)
        .await?
        .ok_or(UpdateCustomerError::NotFound(id))
}
