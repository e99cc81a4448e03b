//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **extract**: request extractors whose rejections become [`AppError`](crate::error::AppError)s
//! - **pagination**: page requests and the page envelope
//! - **sorting**: allow-listed sort fields and directions
//! - **validation**: payload validation and field error collection
//! - **test_helpers**: in-memory repositories (test-only)

pub mod extract;
pub mod pagination;
pub mod sorting;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use pagination::{Page, PageError, PageRequest};
pub use sorting::{Sort, SortDirection, SortError, SortField};
pub use validation::{Validate, ValidationErrors};
