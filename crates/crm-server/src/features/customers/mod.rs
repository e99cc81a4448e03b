//! Customer management
//!
//! Create, read, update, delete and paged listing of customers under
//! `/api/customers`. Mutations are audited by [`crate::audit::AuditLayer`].

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;


pub use commands::{CreateCustomerError, DeleteCustomerError, UpdateCustomerError};
pub use queries::{GetCustomerError, ListCustomersError, ListCustomersQuery};
pub use routes::customers_routes;
pub use types::{CustomerPayload, CustomerResponse};
