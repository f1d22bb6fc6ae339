//! Abstract table queries.
//!
//! A `QueryRequest` is built once per fetch by the table renderer and never
//! mutated afterwards. Validation happens at construction, whether the value
//! comes from code or from a JSON payload.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for the ordered column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortDirection {
    /// Returns the protocol keyword for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The column a query is ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    /// Backend field name of the column.
    pub field: String,
}

impl OrderBy {
    /// Creates an ordering on the given field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// One page request from the table renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQueryRequest", into = "RawQueryRequest")]
pub struct QueryRequest {
    page: u64,
    page_size: u64,
    order_by: Option<OrderBy>,
    order_direction: SortDirection,
    search: Option<String>,
}

impl QueryRequest {
    /// Creates an unsorted, unfiltered request for `page` (0-based).
    ///
    /// Fails with [`Error::InvalidPageSize`] when `page_size` is zero.
    pub fn new(page: u64, page_size: u64) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }
        Ok(Self {
            page,
            page_size,
            order_by: None,
            order_direction: SortDirection::default(),
            search: None,
        })
    }

    /// Orders the request by `field` in `direction`.
    #[must_use]
    pub fn with_order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some(OrderBy::new(field));
        self.order_direction = direction;
        self
    }

    /// Sets the free-text search term. A blank term clears the search.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = normalize_search(Some(term.into()));
        self
    }

    /// Returns the 0-based page index.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the number of rows per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the sort column, if any.
    pub fn order_by(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    /// Returns the sort direction. Only meaningful when `order_by` is set.
    pub fn order_direction(&self) -> SortDirection {
        self.order_direction
    }

    /// Returns the search term, if any. Never empty.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Number of rows preceding this page.
    pub fn skip(&self) -> u64 {
        self.page.saturating_mul(self.page_size)
    }
}

fn normalize_search(term: Option<String>) -> Option<String> {
    term.filter(|t| !t.trim().is_empty())
}

/// Wire shape of a query as a renderer emits it (camelCase keys).
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQueryRequest {
    page: Option<u64>,
    page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order_by: Option<OrderBy>,
    #[serde(default)]
    order_direction: SortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

impl TryFrom<RawQueryRequest> for QueryRequest {
    type Error = Error;

    fn try_from(raw: RawQueryRequest) -> Result<Self> {
        let page = raw.page.ok_or(Error::MissingField("page"))?;
        let page_size = raw.page_size.ok_or(Error::MissingField("pageSize"))?;
        let mut request = QueryRequest::new(page, page_size)?;
        request.order_by = raw.order_by;
        request.order_direction = raw.order_direction;
        request.search = normalize_search(raw.search);
        Ok(request)
    }
}

impl From<QueryRequest> for RawQueryRequest {
    fn from(request: QueryRequest) -> Self {
        Self {
            page: Some(request.page),
            page_size: Some(request.page_size),
            order_by: request.order_by,
            order_direction: request.order_direction,
            search: request.search,
        }
    }
}
