//! End-to-end finalization of indicator search requests

use pretty_assertions::assert_eq;
use serde_json::json;
use trustar_search::{
    ApiConfig, Method, ObservableType, Param, QueryString, SearchError, SearchIndicator,
    Vocabulary,
};

const ENDPOINT: &str = "https://api.example/api/2.0";

fn builder() -> SearchIndicator {
    SearchIndicator::new(&ApiConfig::new(ENDPOINT))
}

#[test]
fn test_full_search_scenario() {
    let mut search = builder();
    search
        .set_enclave_ids(vec!["E1"])
        .set_from("2022-01-01")
        .unwrap()
        .set_to("2022-02-01")
        .unwrap()
        .set_sort_column("CREATED")
        .unwrap()
        .set_page_size(50);

    let request = search.query().unwrap();

    assert_eq!(request.method(), Method::Post);
    assert_eq!(request.endpoint(), "https://api.example/api/2.0/indicators");
    assert_eq!(
        request.query_string(),
        Some(&QueryString::pair("pageSize", "50"))
    );
    assert_eq!(
        serde_json::Value::Object(request.params().unwrap().clone()),
        json!({
            "enclaveIds": ["E1"],
            "from": 1_640_995_200_i64,
            "to": 1_643_673_600_i64,
            "sortColumn": "CREATED"
        })
    );
}

#[test]
fn test_default_page_size_and_empty_body() {
    let request = builder().query().unwrap();

    assert_eq!(request.query_pairs(), vec![("pageSize", "25")]);
    assert_eq!(request.params(), Some(&serde_json::Map::new()));
}

#[test]
fn test_body_only_contains_invoked_setters() {
    let mut search = builder();
    search.set_query_term("evil.com");
    search
        .set_observable_types(["URL", "IP4"])
        .unwrap()
        .set_priority_scores([3])
        .unwrap();

    let body = search.query().unwrap().params().unwrap().clone();
    let mut keys: Vec<&str> = body.keys().map(String::as_str).collect();
    keys.sort_unstable();

    assert_eq!(keys, vec!["priorityScores", "queryTerm", "types"]);
    assert_eq!(body["types"], json!(["URL", "IP4"]));
}

#[test]
fn test_reversed_window_fails_at_query() {
    let mut search = builder();
    search
        .set_from("2022-02-01")
        .unwrap()
        .set_to("2022-01-01")
        .unwrap();

    let err = search.query().unwrap_err();
    assert!(matches!(
        err,
        SearchError::InvalidWindow {
            from: 1_643_673_600,
            to: 1_640_995_200
        }
    ));
}

#[test]
fn test_window_property_over_pairs() {
    let points = [-10_i64, 0, 1, 1_640_995_200];
    for &from in &points {
        for &to in &points {
            let mut search = builder();
            search.set_from(from).unwrap().set_to(to).unwrap();
            let outcome = search.query();
            if to >= from {
                assert!(outcome.is_ok(), "from {from} to {to} should pass");
            } else {
                assert!(
                    matches!(outcome, Err(SearchError::InvalidWindow { .. })),
                    "from {from} to {to} should fail"
                );
            }
        }
    }
}

#[test]
fn test_priority_scores_property() {
    for score in -1..=3 {
        assert!(builder().set_priority_scores([score]).is_ok());
    }
    for score in [-100, -2, 4, 42] {
        let err = builder().set_priority_scores([0, score]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRange { score: s } if s == score));
    }
}

#[test]
fn test_every_observable_subset_is_accepted() {
    let all = ObservableType::members();
    for len in 0..=all.len() {
        assert!(builder().set_observable_types(&all[..len]).is_ok());
    }
}

#[test]
fn test_foreign_observable_type_lists_all_thirteen() {
    let err = builder()
        .set_observable_types(["IP4", "DOMAIN"])
        .unwrap_err();

    match &err {
        SearchError::InvalidEnum { field, allowed } => {
            assert_eq!(*field, "observable type");
            assert_eq!(allowed, &ObservableType::members());
            assert_eq!(allowed.len(), 13);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "observable type should be one of the following: IP4, IP6, URL, SHA1, SHA256, \
         EMAIL_ADDRESS, PHONE_NUMBER, MD5, BITCOIN, XID, REGISTRY_KEY, SOFTWARE, CIDR_BLOCK"
    );
}

#[test]
fn test_bogus_sort_column() {
    let err = builder().set_sort_column("BOGUS").unwrap_err();

    match err {
        SearchError::InvalidEnum { allowed, .. } => {
            assert_eq!(allowed, vec!["UPDATED", "CREATED", "PROCESSED_AT"]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_custom_param_overrides_earlier_setter() {
    let mut search = builder();
    search
        .set_query_term("first")
        .set_custom_param(Param::new("queryTerm", "second"))
        .set_custom_param(Param::new("cursor", json!({ "after": 10 })));

    let body = search.query().unwrap().params().unwrap().clone();
    assert_eq!(body["queryTerm"], json!("second"));
    assert_eq!(body["cursor"], json!({ "after": 10 }));
    assert_eq!(search.params().len(), 3);
}

#[test]
fn test_invalid_date_string() {
    let err = builder().set_to("the day after tomorrow-ish").unwrap_err();
    assert!(matches!(err, SearchError::InvalidDateFormat(_)));
}
