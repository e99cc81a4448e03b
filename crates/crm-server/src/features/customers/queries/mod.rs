pub mod get;
pub mod list;

pub use get::GetCustomerError;
pub use list::{ListCustomersError, ListCustomersQuery};
