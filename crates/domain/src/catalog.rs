//! Catalog query parameters: ordering and pagination.

use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

/// Field a category listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkuSortKey {
    CreateTime,
    Price,
    Sales,
}

/// Sort order for SKU listings, parsed from `ordering=[-]field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkuOrdering {
    pub key: SkuSortKey,
    pub descending: bool,
}

impl Default for SkuOrdering {
    fn default() -> Self {
        Self {
            key: SkuSortKey::CreateTime,
            descending: true,
        }
    }
}

impl FromStr for SkuOrdering {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, field) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let key = match field {
            "create_time" => SkuSortKey::CreateTime,
            "price" => SkuSortKey::Price,
            "sales" => SkuSortKey::Sales,
            _ => return Err(ValidationError::InvalidOrdering(s.to_owned())),
        };
        Ok(Self { key, descending })
    }
}

/// A page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    page_size: u32,
}

impl Page {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 20;

    /// Build a page request; missing values take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPage`] when `page` is zero or
    /// `page_size` is outside `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE);
        if page == 0 || page_size == 0 || page_size > Self::MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPage {
                max_page_size: Self::MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, page_size })
    }

    #[must_use]
    pub fn page(self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_size(self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the total count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    #[must_use]
    pub fn new(page: Page, count: u64, results: Vec<T>) -> Self {
        Self {
            count,
            page: page.page(),
            page_size: page.page_size(),
            results,
        }
    }

    /// Transform each result, keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            page: self.page,
            page_size: self.page_size,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
