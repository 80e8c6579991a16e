//! Offset/limit pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Page size used when a limit is present but not a positive number.
pub const DEFAULT_LIMIT: u64 = 5;
/// Maximum page size.
pub const MAX_LIMIT: u64 = 100;

/// Request window for paginated queries.
///
/// Without a limit the whole collection is returned starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items to skip.
    pub offset: u64,
    /// Maximum number of items to return.
    pub limit: Option<u64>,
}

impl PageRequest {
    /// Build a request from raw query values.
    ///
    /// An unparsable offset counts as zero; a present but unparsable or
    /// zero limit falls back to [`DEFAULT_LIMIT`].
    pub fn from_raw(offset: Option<&str>, limit: Option<&str>) -> Self {
        let offset = offset
            .and_then(|o| o.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let limit = limit.map(|l| match l.trim().parse::<u64>() {
            Ok(n) if n > 0 => n.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        });
        Self { offset, limit }
    }

    /// Compute navigation metadata for a collection of `total` items.
    ///
    /// Returns `None` when no limit was requested.
    pub fn summarize(&self, total: u64) -> Option<PageSummary> {
        let limit = self.limit?;
        let total_pages = total.div_ceil(limit);
        let current_page = self.offset.div_ceil(limit) + 1;

        let prev_offset = if self.offset == 0 {
            None
        } else {
            Some(self.offset.saturating_sub(limit))
        };
        let next = self.offset + limit;
        let next_offset = if total == 0 || next > total - 1 {
            None
        } else {
            Some(next)
        };

        Some(PageSummary {
            limit,
            total_items: total,
            total_pages,
            current_page,
            first_offset: 0,
            last_offset: total_pages.saturating_sub(1) * limit,
            prev_offset,
            next_offset,
        })
    }
}

/// Navigation metadata for a paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Page size.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Current page number (1-based).
    pub current_page: u64,
    /// Offset of the first page.
    pub first_offset: u64,
    /// Offset of the last page.
    pub last_offset: u64,
    /// Offset of the previous page, if any.
    pub prev_offset: Option<u64>,
    /// Offset of the next page, if any.
    pub next_offset: Option<u64>,
}
