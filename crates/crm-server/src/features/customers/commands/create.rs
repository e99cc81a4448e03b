//! Create customer command

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::models::{Customer, CustomerInput};

#[derive(Debug, thiserror::Error)]
pub enum CreateCustomerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CreateCustomerError> for AppError {
    fn from(err: CreateCustomerError) -> Self {
        match err {
            CreateCustomerError::Database(e) => AppError::Database(e),
        }
    }
}

/// Store a validated customer and return it with its assigned id.
#[tracing::instrument(skip(repository, input), fields(name = %input.name))]
pub async fn handle(
    repository: &dyn CustomerRepository,
    input: CustomerInput,
) -> Result<Customer, CreateCustomerError> {
    let customer = repository.insert(&input).await?;
    tracing::debug!(customer_id = customer.id, "Customer stored");
    Ok(customer)
}
