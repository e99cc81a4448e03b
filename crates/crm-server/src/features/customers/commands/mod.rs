pub mod create;
pub mod delete;
pub mod update;

pub use create::CreateCustomerError;
pub use delete::DeleteCustomerError;
pub use update::UpdateCustomerError;
