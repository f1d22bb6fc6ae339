//! Shared request helpers for the remote table service.

use crate::error::{FetchError, FetchResult};
use pettable_types::Record;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// A listing body: the protocol's `{"value": [...]}` envelope or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing {
    Envelope { value: Vec<Record> },
    Bare(Vec<Record>),
}

impl Listing {
    pub(crate) fn into_rows(self) -> Vec<Record> {
        match self {
            Listing::Envelope { value } => value,
            Listing::Bare(rows) => rows,
        }
    }
}

/// GETs `url` and returns the body of a success response.
pub(crate) async fn get_text(client: &Client, url: &str) -> FetchResult<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        });
    }
    Ok(response.text().await?)
}

/// Returns the elements of a listing body, or `None` if it is not a sequence.
pub(crate) fn listing_items(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove("value") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// String form of a scalar field value, as used for keys and labels.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
