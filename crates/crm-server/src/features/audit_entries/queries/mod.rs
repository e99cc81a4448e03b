pub mod list;

pub use list::{ListAuditEntriesError, ListAuditEntriesQuery};
