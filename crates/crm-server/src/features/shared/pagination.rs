//! Shared pagination utilities
//!
//! Zero-based page requests and the page envelope returned by every list
//! endpoint.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crm_server::features::shared::pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 20)?;
//! assert_eq!(request.offset(), 40);
//!
//! // After fetching rows and the total count...
//! let page = Page::new(rows, &request, total);
//! ```

use serde::Serialize;

/// Largest page size served; bigger requests are clamped.
pub const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Page index must not be less than zero")]
    NegativePage,

    #[error("Page size must not be less than one")]
    SizeTooSmall,
}

/// A checked page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// `page` must be `>= 0` and `size >= 1`. Sizes above [`MAX_PAGE_SIZE`]
    /// are clamped.
    pub fn new(page: i64, size: i64) -> Result<Self, PageError> {
        if page < 0 {
            return Err(PageError::NegativePage);
        }
        if size < 1 {
            return Err(PageError::SizeTooSmall);
        }
        Ok(Self {
            page,
            size: size.min(MAX_PAGE_SIZE),
        })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Row offset for `OFFSET`, saturating on absurd page numbers.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_elements = total_elements.max(0);
        let total_pages = (total_elements + request.size - 1) / request.size;
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
