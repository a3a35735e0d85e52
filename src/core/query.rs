//! Pagination of filtered, ordered collections

use serde::Serialize;
use std::num::IntErrorKind;

/// Items per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Parse the raw `page` query parameter.
///
/// Returns a page number only for a positive integer. Absent, empty, zero,
/// negative and non-numeric values all yield `None`, which the pagination
/// engine serves as page 1. A number too large for `usize` saturates, so it
/// is served as the last page like any other page past the end.
pub fn parse_page(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| match s.parse::<usize>() {
        Ok(page) => Some(page),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(usize::MAX),
        Err(_) => None,
    })
    .filter(|page| *page >= 1)
}

/// One page of a collection together with its navigation state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on this page, in collection order
    pub items: Vec<T>,

    /// 1-based number of the page actually served
    pub number: usize,

    /// Maximum number of items per page
    pub page_size: usize,

    /// Total number of items in the collection (after filtering)
    pub total: usize,

    /// Number of pages; an empty collection still has one empty page
    pub total_pages: usize,

    /// Whether a previous page exists
    pub has_previous: bool,

    /// Whether a next page exists
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Whether the collection behind this page is empty
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whether the collection spans more than one page
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    pub fn previous_page_number(&self) -> Option<usize> {
        self.has_previous.then(|| self.number - 1)
    }

    pub fn next_page_number(&self) -> Option<usize> {
        self.has_next.then(|| self.number + 1)
    }

    /// Pagination metadata for API responses
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta {
            page: self.number,
            limit: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_previous,
        }
    }

    /// Transform the items while keeping the navigation state
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// Slice an ordered collection into the requested page.
///
/// Out-of-range requests never fail: a missing page or one below 1 serves
/// page 1, and a page past the end serves the last page.
pub fn paginate<T>(items: Vec<T>, requested_page: Option<usize>, page_size: usize) -> Page<T> {
    // Ensure page_size is at least 1 to avoid division by zero
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);

    let number = requested_page
        .filter(|page| *page >= 1)
        .unwrap_or(1)
        .min(total_pages);
    let start = (number - 1) * page_size;

    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        number,
        page_size,
        total,
        total_pages,
        has_previous: number > 1,
        has_next: number < total_pages,
    }
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,

    /// The search fragment the data was filtered with
    pub search: String,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}
