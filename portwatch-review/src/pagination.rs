//! Skip/limit paging for entry listings

use serde::Deserialize;

/// Page size when the request does not give one
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page a single request may ask for
pub const MAX_LIMIT: i64 = 1_000;

/// Query parameters of `GET /api/training-data` and `GET /api/knowledge`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Entries to skip from the start (insertion order)
    pub skip: i64,
    /// Maximum entries to return
    pub limit: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Sanitized LIMIT/OFFSET pair for the SQL query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl ListParams {
    /// Clamp to valid bounds: skip >= 0, limit in [0, MAX_LIMIT]
    ///
    /// # Examples
    /// ```
    /// use portwatch_review::pagination::ListParams;
    ///
    /// let page = ListParams { skip: -5, limit: 50_000 }.page();
    /// assert_eq!(page.offset, 0);
    /// assert_eq!(page.limit, 1_000);
    /// ```
    pub fn page(&self) -> Page {
        Page {
            offset: self.skip.max(0),
            limit: self.limit.clamp(0, MAX_LIMIT),
        }
    }
}
