//! Core type definitions for the pet table view.
//!
//! This crate defines the data model shared between the table renderer and
//! the fetch layer:
//! - Abstract table queries (`QueryRequest`) as the renderer issues them
//! - The normalized page outcome (`PageResult`) the renderer consumes
//! - Opaque backend rows (`Record`)
//!
//! Nothing here performs I/O. Translating a query into protocol URLs and
//! talking to the remote service lives in `pettable-client`.

mod page;
mod query;

pub use page::{PageResult, Record, EMPTY_RESULT_MESSAGE};
pub use query::{OrderBy, QueryRequest, SortDirection};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating values at the renderer boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("page size must be positive")]
    InvalidPageSize,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
