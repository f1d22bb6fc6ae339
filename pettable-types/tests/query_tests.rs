use pettable_types::{Error, OrderBy, QueryRequest, SortDirection};
use pretty_assertions::assert_eq;

// ── Construction ──────────────────────────────────────────────────

#[test]
fn new_request_is_unsorted_and_unfiltered() {
    let req = QueryRequest::new(0, 5).unwrap();
    assert_eq!(req.page(), 0);
    assert_eq!(req.page_size(), 5);
    assert!(req.order_by().is_none());
    assert_eq!(req.order_direction(), SortDirection::Asc);
    assert!(req.search().is_none());
}

#[test]
fn zero_page_size_is_rejected() {
    let err = QueryRequest::new(3, 0).unwrap_err();
    assert!(matches!(err, Error::InvalidPageSize));
}

#[test]
fn with_order_by_sets_field_and_direction() {
    let req = QueryRequest::new(0, 5)
        .unwrap()
        .with_order_by("PetName", SortDirection::Desc);
    assert_eq!(req.order_by(), Some(&OrderBy::new("PetName")));
    assert_eq!(req.order_direction(), SortDirection::Desc);
}

#[test]
fn with_search_keeps_term() {
    let req = QueryRequest::new(0, 5).unwrap().with_search("rex");
    assert_eq!(req.search(), Some("rex"));
}

#[test]
fn blank_search_is_treated_as_absent() {
    let req = QueryRequest::new(0, 5).unwrap().with_search("   ");
    assert!(req.search().is_none());

    let req = QueryRequest::new(0, 5).unwrap().with_search("");
    assert!(req.search().is_none());
}

#[test]
fn skip_is_page_times_page_size() {
    assert_eq!(QueryRequest::new(0, 5).unwrap().skip(), 0);
    assert_eq!(QueryRequest::new(2, 5).unwrap().skip(), 10);
    assert_eq!(QueryRequest::new(u64::MAX, 2).unwrap().skip(), u64::MAX);
}

// ── SortDirection ─────────────────────────────────────────────────

#[test]
fn sort_direction_keywords() {
    assert_eq!(SortDirection::Asc.as_str(), "asc");
    assert_eq!(SortDirection::Desc.to_string(), "desc");
    assert_eq!(SortDirection::default(), SortDirection::Asc);
}

// ── Boundary deserialization ─────────────────────────────────────

#[test]
fn deserializes_renderer_payload() {
    let json = r#"{
        "page": 2,
        "pageSize": 10,
        "orderBy": { "field": "Breed" },
        "orderDirection": "desc",
        "search": "lab"
    }"#;
    let req: QueryRequest = serde_json::from_str(json).unwrap();
    let expected = QueryRequest::new(2, 10)
        .unwrap()
        .with_order_by("Breed", SortDirection::Desc)
        .with_search("lab");
    assert_eq!(req, expected);
}

#[test]
fn deserializes_minimal_payload() {
    let req: QueryRequest = serde_json::from_str(r#"{"page":0,"pageSize":5}"#).unwrap();
    assert_eq!(req, QueryRequest::new(0, 5).unwrap());
}

#[test]
fn deserialize_rejects_missing_page_size() {
    let err = serde_json::from_str::<QueryRequest>(r#"{"page":0}"#).unwrap_err();
    assert!(err.to_string().contains("pageSize"));
}

#[test]
fn deserialize_rejects_missing_page() {
    let err = serde_json::from_str::<QueryRequest>(r#"{"pageSize":5}"#).unwrap_err();
    assert!(err.to_string().contains("page"));
}

#[test]
fn deserialize_rejects_zero_page_size() {
    let err = serde_json::from_str::<QueryRequest>(r#"{"page":0,"pageSize":0}"#).unwrap_err();
    assert!(err.to_string().contains("page size must be positive"));
}

#[test]
fn deserialize_drops_empty_search() {
    let req: QueryRequest =
        serde_json::from_str(r#"{"page":1,"pageSize":5,"search":""}"#).unwrap();
    assert!(req.search().is_none());
}

#[test]
fn serializes_with_renderer_keys() {
    let req = QueryRequest::new(1, 5)
        .unwrap()
        .with_order_by("PetName", SortDirection::Asc);
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "page": 1,
            "pageSize": 5,
            "orderBy": { "field": "PetName" },
            "orderDirection": "asc"
        })
    );
}
