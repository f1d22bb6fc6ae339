//! Normalized page outcome.

use serde::{Deserialize, Serialize};

/// One backend row: field name to value. The schema belongs to the remote
/// service.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Error string carried by a page whose data query returned no rows.
pub const EMPTY_RESULT_MESSAGE: &str = "Error fetching data";

/// The result of one page fetch, as consumed by the table renderer.
///
/// Serialized with the renderer's keys: `data`, `page`, `totalCount` and an
/// optional `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Rows of this page, in backend order.
    #[serde(rename = "data")]
    pub rows: Vec<Record>,
    /// The 0-based page these rows belong to.
    pub page: u64,
    /// Row count for the applied search filter, ignoring paging.
    pub total_count: u64,
    /// User-visible condition for a recoverable failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageResult {
    /// Creates a successful page.
    pub fn new(rows: Vec<Record>, page: u64, total_count: u64) -> Self {
        Self {
            rows,
            page,
            total_count,
            error: None,
        }
    }

    /// Creates the result reported when the data query returned no rows.
    pub fn empty(page: u64) -> Self {
        Self {
            rows: Vec::new(),
            page,
            total_count: 0,
            error: Some(EMPTY_RESULT_MESSAGE.to_string()),
        }
    }

    /// Returns true if this page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pages needed to show `total_count` rows at `page_size`.
    pub fn page_count(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(page_size)
    }
}
