//! Pagination utilities for service layer
//!
//! `Pagination` normalizes page inputs, `Sort` carries the requested order and
//! `Page` is the envelope returned by every list operation. Repositories always
//! append `id ASC` after the requested order so listings are reproducible.

use std::fmt;

use serde::Serialize;

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

pub const MAX_PER_PAGE: u32 = 100;

impl Pagination {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        let d = Self::default();
        Self { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) }
    }

    /// Clamp to sane defaults and convert to a 0-based page index and page size.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }

    /// Number of rows preceding this page.
    pub fn offset(self) -> u64 {
        let (idx, per_page) = self.normalize();
        idx * per_page
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 10 } }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A sortable column of some entity.
pub trait SortField: Copy + Default + fmt::Debug {
    fn parse(raw: &str) -> Option<Self>;
    fn as_str(&self) -> &'static str;
    /// Accepted names, used in error messages.
    fn allowed() -> &'static [&'static str];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> Sort<F> {
    pub fn asc(field: F) -> Self { Self { field, direction: SortDirection::Asc } }

    pub fn desc(field: F) -> Self { Self { field, direction: SortDirection::Desc } }

    /// Parse `field` or `field,asc|desc`. Blank input yields the default order.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        let (field, direction) = match raw.split_once(',') {
            Some((f, d)) => (f.trim(), Some(d.trim())),
            None => (raw, None),
        };
        let field = F::parse(&field.to_ascii_lowercase()).ok_or_else(|| {
            ServiceError::Validation(format!(
                "unknown sort field '{}', expected one of: {}",
                field,
                F::allowed().join(", ")
            ))
        })?;
        let direction = match direction.map(|d| d.to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(d) => {
                return Err(ServiceError::Validation(format!(
                    "unknown sort direction '{}', expected asc or desc",
                    d
                )))
            }
        };
        Ok(Self { field, direction })
    }
}

impl<F: SortField> fmt::Display for Sort<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.field.as_str(), dir)
    }
}

/// Page specification handed to repositories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageRequest<F> {
    pub pagination: Pagination,
    pub sort: Sort<F>,
}

impl<F> PageRequest<F> {
    pub fn new(pagination: Pagination, sort: Sort<F>) -> Self { Self { pagination, sort } }
}

/// A bounded, ordered slice of a result set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page index actually served
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total_items: u64) -> Self {
        let (idx, per_page) = pagination.normalize();
        Self {
            items,
            page: idx + 1,
            per_page,
            total_items,
            total_pages: total_items.div_ceil(per_page),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
