//! Delete customer command

use crate::db::CustomerRepository;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum DeleteCustomerError {
    #[error("Customer not found with id {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<DeleteCustomerError> for AppError {
    fn from(err: DeleteCustomerError) -> Self {
        match err {
            DeleteCustomerError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteCustomerError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(repository))]
pub async fn handle(repository: &dyn CustomerRepository, id: i64) -> Result<(), DeleteCustomerError> {
    if repository.delete_by_id(id).await? {
        Ok(())
    } else {
        Err(DeleteCustomerError::NotFound(id))
    }
}
