//! Table view configuration.

use crate::error::{FetchError, FetchResult};
use serde::{Deserialize, Serialize};

/// A bulk listing endpoint used to resolve foreign keys into labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSource {
    /// Human-readable entity kind, used in user-facing warnings.
    pub kind: String,
    /// Listing path relative to the service base URL.
    pub path: String,
    /// Field holding the entity id.
    pub id_field: String,
    /// Field holding the display label.
    pub label_field: String,
}

impl LookupSource {
    /// Creates a lookup source.
    pub fn new(
        kind: impl Into<String>,
        path: impl Into<String>,
        id_field: impl Into<String>,
        label_field: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
            id_field: id_field.into(),
            label_field: label_field.into(),
        }
    }

    /// Pet owners, labelled by owner name.
    pub fn owners() -> Self {
        Self::new("PetOwners", "/PetOwner", "Pet_ownerId", "PetOwnername")
    }

    /// Vet visits, labelled by vet name.
    pub fn visits() -> Self {
        Self::new("Visits", "/Visit", "Visit_id", "VetName")
    }
}

/// Configuration for one table view over the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Service root (e.g. `http://localhost:5000`).
    pub base_url: String,
    /// Path of the listed entity set.
    pub entity_path: String,
    /// Plural display name of the entity, used in notifications.
    pub title: String,
    /// Field the free-text search is matched against.
    pub search_field: String,
    /// Field holding each row's key, used for delete and navigation.
    pub key_field: String,
    /// Rows per page when the renderer does not choose.
    pub page_size: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub owners: LookupSource,
    pub visits: LookupSource,
    /// Row field decorated through the owners index.
    pub owners_column: String,
    /// Row field decorated through the visits index.
    pub visits_column: String,
    /// Route prefix for row navigation.
    pub route_base: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            entity_path: "/Pet".to_string(),
            title: "Pets".to_string(),
            search_field: "PetName".to_string(),
            key_field: "Pet_id".to_string(),
            page_size: 5,
            timeout_secs: 30,
            owners: LookupSource::owners(),
            visits: LookupSource::visits(),
            owners_column: "PetOwns".to_string(),
            visits_column: "PetVisits".to_string(),
            route_base: "/Pets".to_string(),
        }
    }
}

impl TableConfig {
    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> FetchResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values a fetcher cannot work without.
    pub fn validate(&self) -> FetchResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(FetchError::Config("base_url is empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(FetchError::Config(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.page_size == 0 {
            return Err(FetchError::Config("page_size must be positive".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(FetchError::Config("timeout_secs must be positive".to_string()));
        }
        if self.search_field.is_empty() {
            return Err(FetchError::Config("search_field is empty".to_string()));
        }
        Ok(())
    }

    /// Full URL of the entity set.
    pub fn entity_url(&self) -> String {
        join_url(&self.base_url, &self.entity_path)
    }

    /// Full URL of a lookup listing.
    pub fn lookup_url(&self, source: &LookupSource) -> String {
        join_url(&self.base_url, &source.path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
