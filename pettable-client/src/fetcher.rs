//! Page fetching against the remote table service.
//!
//! `PageFetcher` owns the HTTP client and drives one page fetch as two
//! sequential reads of the same translated request: the row count, then the
//! page data. All I/O of the view goes through here.

use crate::config::{LookupSource, TableConfig};
use crate::error::{FetchError, FetchResult};
use crate::http::{Listing, get_text};
use crate::lookup::LookupIndex;
use crate::notify::{Notifier, Severity};
use crate::translator::{QueryTranslator, QueryUrls};
use pettable_types::{PageResult, QueryRequest, Record};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a delete that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was deleted; the caller should re-fetch the page.
    Deleted,
    /// The service refused; the row stays in place.
    Rejected { message: String },
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

/// Fetches pages, lookups and deletes records for one table view.
pub struct PageFetcher {
    config: TableConfig,
    client: Client,
    translator: QueryTranslator,
    notifier: Arc<dyn Notifier>,
}

impl PageFetcher {
    /// Creates a fetcher with its own HTTP client.
    pub fn new(config: TableConfig, notifier: Arc<dyn Notifier>) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Config(format!("failed to create HTTP client: {e}")))?;
        Self::with_client(config, client, notifier)
    }

    /// Creates a fetcher over an existing HTTP client.
    pub fn with_client(
        config: TableConfig,
        client: Client,
        notifier: Arc<dyn Notifier>,
    ) -> FetchResult<Self> {
        config.validate()?;
        let translator = QueryTranslator::new(config.search_field.clone());
        Ok(Self {
            config,
            client,
            translator,
            notifier,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn translator(&self) -> &QueryTranslator {
        &self.translator
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Returns the URLs a fetch of `request` will hit.
    pub fn urls_for(&self, request: &QueryRequest) -> QueryUrls {
        self.translator.translate(request, &self.config.entity_url())
    }

    /// Fetches one page.
    ///
    /// A data query with no rows is not a failure: it yields
    /// [`PageResult::empty`]. Any transport failure notifies the user once
    /// and is returned as an error, with no partial page.
    pub async fn fetch_page(&self, request: &QueryRequest) -> FetchResult<PageResult> {
        let urls = self.urls_for(request);
        match self.fetch_urls(request, &urls).await {
            Ok(page) => Ok(page),
            Err(e) => {
                warn!("Page {} fetch failed: {}", request.page(), e);
                self.notifier.notify(
                    &format!("{} API call failed! - {e}", self.config.title),
                    Severity::Error,
                );
                Err(e)
            }
        }
    }

    async fn fetch_urls(
        &self,
        request: &QueryRequest,
        urls: &QueryUrls,
    ) -> FetchResult<PageResult> {
        debug!("Fetching count: {}", urls.count_url);
        let total_count = self.fetch_count(&urls.count_url).await?;

        debug!("Fetching page {}: {}", request.page(), urls.data_url);
        let rows = self.fetch_rows(&urls.data_url).await?;

        if rows.is_empty() {
            info!("Page {} returned no rows", request.page());
            return Ok(PageResult::empty(request.page()));
        }

        info!(
            "Fetched {} rows for page {} ({} total)",
            rows.len(),
            request.page(),
            total_count
        );
        Ok(PageResult::new(rows, request.page(), total_count))
    }

    async fn fetch_count(&self, url: &str) -> FetchResult<u64> {
        let body = get_text(&self.client, url).await?;
        let body = body.trim();
        body.parse::<u64>().map_err(|_| FetchError::InvalidCount(body.to_string()))
    }

    async fn fetch_rows(&self, url: &str) -> FetchResult<Vec<Record>> {
        let body = get_text(&self.client, url).await?;
        let listing: Listing = serde_json::from_str(&body)?;
        Ok(listing.into_rows())
    }

    /// Deletes the record with `key`.
    ///
    /// A refusal by the service is reported to the user and returned as
    /// [`DeleteOutcome::Rejected`]. Only a transport failure is an error.
    pub async fn delete_record(&self, key: &str) -> FetchResult<DeleteOutcome> {
        let url = format!("{}({})", self.config.entity_url(), key);
        debug!("Deleting record: {}", url);

        let response = match self.client.delete(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = FetchError::Http(e);
                warn!("Delete of {} failed: {}", key, err);
                self.notifier.notify(&format!("Failed! - {err}"), Severity::Error);
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            info!("Deleted record: {}", key);
            self.notifier.notify(
                &format!("Successfully deleted {}", self.config.title),
                Severity::Success,
            );
            return Ok(DeleteOutcome::Deleted);
        }

        let body = response.text().await.unwrap_or_default();
        let message = rejection_message(status, &body);
        warn!("Delete of {} rejected ({}): {}", key, status, message);
        self.notifier.notify(&format!("Failed! - {message}"), Severity::Error);
        Ok(DeleteOutcome::Rejected { message })
    }

    /// Builds the lookup index for `source`. Never fails.
    pub async fn build_index(&self, source: &LookupSource) -> LookupIndex {
        let url = self.config.lookup_url(source);
        LookupIndex::fetch(&self.client, &url, source, self.notifier.as_ref()).await
    }
}

/// Picks the user-facing message out of a delete error response.
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let message = json
            .get("message")
            .or_else(|| json.get("error").and_then(|e| e.get("message")))
            .and_then(Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}
