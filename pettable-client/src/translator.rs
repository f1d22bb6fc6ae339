//! Query translation: abstract table queries to protocol URLs.
//!
//! Pure and deterministic. Clauses are always emitted in the order
//! `$orderby`, `$filter`, `$skip`; the first one is introduced with `?` and
//! every later one with `&`. The count URL carries only the filter clause.

use pettable_types::QueryRequest;

/// URLs for one page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryUrls {
    /// Page data, sorted, filtered and skipped.
    pub data_url: String,
    /// Row count under the same filter.
    pub count_url: String,
}

/// Translates [`QueryRequest`]s against one entity set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTranslator {
    search_field: String,
}

impl QueryTranslator {
    /// Creates a translator whose search matches against `search_field`.
    pub fn new(search_field: impl Into<String>) -> Self {
        Self {
            search_field: search_field.into(),
        }
    }

    /// Returns the field searched by free-text queries.
    pub fn search_field(&self) -> &str {
        &self.search_field
    }

    /// Builds the data and count URLs for `request` against `base_url`.
    pub fn translate(&self, request: &QueryRequest, base_url: &str) -> QueryUrls {
        let base_url = base_url.trim_end_matches('/');
        let filter = request.search().map(|term| self.filter_clause(term));

        let mut clauses = Vec::with_capacity(3);
        if let Some(order_by) = request.order_by() {
            clauses.push(format!(
                "$orderby={} {}",
                order_by.field,
                request.order_direction()
            ));
        }
        if let Some(filter) = &filter {
            clauses.push(filter.clone());
        }
        if request.page() > 0 {
            clauses.push(format!("$skip={}", request.skip()));
        }

        let count_base = format!("{base_url}/$count");
        let count_url = match filter {
            Some(filter) => with_query(&count_base, &[filter]),
            None => count_base,
        };

        QueryUrls {
            data_url: with_query(base_url, &clauses),
            count_url,
        }
    }

    fn filter_clause(&self, term: &str) -> String {
        format!(
            "$filter=contains({},'{}')",
            self.search_field,
            encode_literal(term)
        )
    }
}

/// Escapes a term for use inside a quoted protocol string literal and keeps
/// it from terminating the query string.
fn encode_literal(term: &str) -> String {
    let quoted = term.replace('\'', "''");
    urlencoding::encode(&quoted).into_owned()
}

fn with_query(base: &str, clauses: &[String]) -> String {
    if clauses.is_empty() {
        return base.to_string();
    }
    format!("{base}?{}", clauses.join("&"))
}
