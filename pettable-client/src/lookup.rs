//! Display lookups for foreign-key columns.
//!
//! A [`LookupIndex`] maps entity ids to labels. It is built once from a bulk
//! listing and never mutated; a rebuild produces a new index that replaces
//! the old one wholesale. An empty index is a valid final state.

use crate::config::LookupSource;
use crate::error::FetchResult;
use crate::http::{get_text, listing_items, scalar_text};
use crate::notify::{Notifier, Severity};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Immutable id to label map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupIndex {
    entries: BTreeMap<String, String>,
}

impl LookupIndex {
    /// Creates an empty index.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Projects `id_field -> label_field` over listing elements.
    ///
    /// Later elements with the same id replace earlier ones. Elements missing
    /// either field are skipped.
    pub fn from_items<'a>(
        items: impl IntoIterator<Item = &'a Value>,
        id_field: &str,
        label_field: &str,
    ) -> Self {
        let mut entries = BTreeMap::new();
        for item in items {
            let id = item.get(id_field).and_then(scalar_text);
            let label = item.get(label_field).and_then(scalar_text);
            match (id, label) {
                (Some(id), Some(label)) => {
                    entries.insert(id, label);
                }
                _ => debug!(
                    "Skipping lookup element without {}/{}",
                    id_field, label_field
                ),
            }
        }
        Self { entries }
    }

    /// Fetches `listing_url` and builds the index for `source`.
    ///
    /// Never fails: an empty, malformed or unreachable listing yields an
    /// empty index and one warning naming the entity kind.
    pub async fn fetch(
        client: &Client,
        listing_url: &str,
        source: &LookupSource,
        notifier: &dyn Notifier,
    ) -> Self {
        debug!("Fetching {} lookup: {}", source.kind, listing_url);

        let index = match fetch_items(client, listing_url).await {
            Ok(Some(items)) => Self::from_items(&items, &source.id_field, &source.label_field),
            Ok(None) => {
                warn!("{} listing is not a sequence", source.kind);
                Self::empty()
            }
            Err(e) => {
                warn!("{} listing failed: {}", source.kind, e);
                Self::empty()
            }
        };

        if index.is_empty() {
            notifier.notify(
                &format!(
                    "No data for {kind}. Please Add {kind} First.",
                    kind = source.kind
                ),
                Severity::Warning,
            );
        } else {
            info!("Built {} lookup with {} entries", source.kind, index.len());
        }
        index
    }

    /// Returns the label for an id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Returns the label for a raw foreign-key value from a row.
    pub fn resolve(&self, value: &Value) -> Option<&str> {
        scalar_text(value).and_then(|id| self.get(&id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for LookupIndex {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

async fn fetch_items(client: &Client, url: &str) -> FetchResult<Option<Vec<Value>>> {
    let body = get_text(client, url).await?;
    let body: Value = serde_json::from_str(&body)?;
    Ok(listing_items(body))
}
