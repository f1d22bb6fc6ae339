//! Table view lifecycle.
//!
//! `PetTableView` owns what one rendered table needs across fetches: the
//! fetcher, the current lookup indices and a request generation counter.

use crate::error::{FetchError, FetchResult};
use crate::fetcher::{DeleteOutcome, PageFetcher};
use crate::http::scalar_text;
use crate::lookup::LookupIndex;
use pettable_types::{PageResult, QueryRequest, Record};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Navigation actions a renderer wires to its buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Add,
    View,
    Edit,
}

impl RowAction {
    pub fn tooltip(self) -> &'static str {
        match self {
            RowAction::Add => "Add",
            RowAction::View => "View",
            RowAction::Edit => "Edit",
        }
    }

    /// True for actions shown on the toolbar rather than on each row.
    pub fn is_free_action(self) -> bool {
        matches!(self, RowAction::Add)
    }

    /// Route for this action. `key` is ignored by free actions.
    pub fn route(self, route_base: &str, key: &str) -> String {
        let route_base = route_base.trim_end_matches('/');
        match self {
            RowAction::Add => format!("{route_base}/create"),
            RowAction::View => format!("{route_base}/view/{key}"),
            RowAction::Edit => format!("{route_base}/edit/{key}"),
        }
    }
}

/// One table view over the remote service.
pub struct PetTableView {
    fetcher: PageFetcher,
    owners: RwLock<Arc<LookupIndex>>,
    visits: RwLock<Arc<LookupIndex>>,
    generation: AtomicU64,
}

impl PetTableView {
    /// Creates a view with empty lookups. Call [`load_lookups`](Self::load_lookups)
    /// to populate them; pages can be fetched before that.
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            owners: RwLock::new(Arc::new(LookupIndex::empty())),
            visits: RwLock::new(Arc::new(LookupIndex::empty())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    /// Builds both lookup indices concurrently. Each index is swapped in as
    /// soon as its own build finishes.
    pub async fn load_lookups(&self) {
        let config = self.fetcher.config();
        tokio::join!(
            async {
                let owners = self.fetcher.build_index(&config.owners).await;
                *self.owners.write().await = Arc::new(owners);
            },
            async {
                let visits = self.fetcher.build_index(&config.visits).await;
                *self.visits.write().await = Arc::new(visits);
            },
        );
    }

    /// Current owners index.
    pub async fn owners(&self) -> Arc<LookupIndex> {
        self.owners.read().await.clone()
    }

    /// Current visits index.
    pub async fn visits(&self) -> Arc<LookupIndex> {
        self.visits.read().await.clone()
    }

    /// Number of refreshes started so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetches a page, dropping the result if a newer refresh started while
    /// this one was in flight.
    ///
    /// Returns `Ok(None)` for a superseded result. Errors are returned even
    /// when superseded, since the user has already been notified.
    pub async fn refresh(&self, request: &QueryRequest) -> FetchResult<Option<PageResult>> {
        self.fetch_latest(request).await
    }

    async fn fetch_latest(&self, request: &QueryRequest) -> FetchResult<Option<PageResult>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let page = self.fetcher.fetch_page(request).await?;
        let latest = self.generation();
        if latest != generation {
            debug!(
                "Dropping page {} from refresh {} (latest {})",
                request.page(),
                generation,
                latest
            );
            return Ok(None);
        }
        Ok(Some(page))
    }

    /// Replaces lookup column values with their labels where they resolve.
    pub async fn decorate(&self, row: &Record) -> Record {
        let owners = self.owners().await;
        let visits = self.visits().await;
        let config = self.fetcher.config();
        let mut row = row.clone();
        decorate_field(&mut row, &config.owners_column, &owners);
        decorate_field(&mut row, &config.visits_column, &visits);
        row
    }

    /// Decorates every row of a page.
    pub async fn decorate_page(&self, page: &PageResult) -> Vec<Record> {
        let mut rows = Vec::with_capacity(page.rows.len());
        for row in &page.rows {
            rows.push(self.decorate(row).await);
        }
        rows
    }

    /// Returns the key of `row`.
    pub fn row_key(&self, row: &Record) -> FetchResult<String> {
        let key_field = &self.fetcher.config().key_field;
        row.get(key_field)
            .and_then(scalar_text)
            .ok_or_else(|| FetchError::MissingKey(key_field.clone()))
    }

    /// Route for a navigation action. `row` is required for row actions.
    pub fn action_route(&self, action: RowAction, row: Option<&Record>) -> FetchResult<String> {
        let route_base = &self.fetcher.config().route_base;
        let key = match (action.is_free_action(), row) {
            (true, _) => String::new(),
            (false, Some(row)) => self.row_key(row)?,
            (false, None) => {
                return Err(FetchError::MissingKey(
                    self.fetcher.config().key_field.clone(),
                ));
            }
        };
        Ok(action.route(route_base, &key))
    }

    /// Deletes `row` and, on success, re-fetches the page for `request`.
    ///
    /// Returns the fresh page, or `None` when the service rejected the
    /// delete (the current page stays valid) or a newer refresh started
    /// during the re-fetch. The re-fetch supersedes any refresh still in
    /// flight.
    pub async fn delete_and_refresh(
        &self,
        row: &Record,
        request: &QueryRequest,
    ) -> FetchResult<Option<PageResult>> {
        let key = self.row_key(row)?;
        match self.fetcher.delete_record(&key).await? {
            DeleteOutcome::Deleted => self.fetch_latest(request).await,
            DeleteOutcome::Rejected { .. } => Ok(None),
        }
    }
}

fn decorate_field(row: &mut Record, field: &str, index: &LookupIndex) {
    if let Some(value) = row.get_mut(field) {
        if let Some(label) = index.resolve(value) {
            *value = Value::String(label.to_string());
        }
    }
}
