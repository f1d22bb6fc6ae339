//! Query translation and page fetching for the pet table view.
//!
//! Talks to a remote tabular service that speaks a filter/order/skip/count
//! query protocol:
//!
//! - `GET {base}?$orderby=<field> <asc|desc>&$filter=contains(<field>,'<term>')&$skip=<n>`
//! - `GET {base}/$count[?$filter=...]` returning a plain integer
//! - `DELETE {base}(<key>)`
//!
//! ## Components
//!
//! - **Translator**: maps a `QueryRequest` to data and count URLs (no I/O)
//! - **Fetcher**: issues the count and data requests and normalizes the outcome
//! - **Lookup**: builds id to label indices for foreign-key columns
//! - **View**: owns the lookups and drops superseded refreshes
//!
//! # Example
//!
//! ```no_run
//! use pettable_client::{PageFetcher, TableConfig, TracingNotifier};
//! use pettable_types::{QueryRequest, SortDirection};
//! use std::sync::Arc;
//!
//! # async fn run() -> pettable_client::FetchResult<()> {
//! let fetcher = PageFetcher::new(TableConfig::default(), Arc::new(TracingNotifier))?;
//! let request = QueryRequest::new(0, 5)
//!     .expect("positive page size")
//!     .with_order_by("PetName", SortDirection::Asc);
//! let page = fetcher.fetch_page(&request).await?;
//! println!("{} of {} rows", page.rows.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod fetcher;
mod http;
mod lookup;
mod notify;
mod translator;
mod view;

pub use config::{LookupSource, TableConfig};
pub use error::{FetchError, FetchResult};
pub use fetcher::{DeleteOutcome, PageFetcher};
pub use lookup::LookupIndex;
pub use notify::{ChannelNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use translator::{QueryTranslator, QueryUrls};
pub use view::{PetTableView, RowAction};
