//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected outcomes. Parsed results are compared as JSON values so field
//! ordering never causes a false negative.

use std::sync::Arc;

use employee_core::{
    ApiError, ClientConfig, EmployeeClient, HttpMethod, HttpRequest, HttpResponse, LogNotifier,
    LoginRequest, Session,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> EmployeeClient {
    EmployeeClient::new(&ClientConfig::new(BASE_URL), Session::new(), Arc::new(LogNotifier))
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Method, URL, headers and (when the vector names one) the body.
fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
    assert!(req.with_credentials, "{name}: credentials");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    if let Some(form) = expected.get("form") {
        let sent: Vec<Value> = url::form_urlencoded::parse(req.body.as_deref().unwrap().as_bytes())
            .map(|(k, v)| serde_json::json!([k, v]))
            .collect();
        assert_eq!(&Value::Array(sent), form, "{name}: form body");
    } else if let Some(raw) = expected.get("raw_body") {
        assert_eq!(req.body.as_deref(), raw.as_str(), "{name}: raw body");
    } else {
        assert!(req.body.is_none(), "{name}: body should be None");
    }
}

/// Assert `result` matches the vector's `expected_error`, if any.
fn check_error<T: std::fmt::Debug>(name: &str, case: &Value, result: &Result<T, ApiError>) -> bool {
    let Some(kind) = case.get("expected_error").and_then(Value::as_str) else {
        assert!(result.is_ok(), "{name}: unexpected error {result:?}");
        return false;
    };
    let err = result.as_ref().expect_err(name);
    let matched = match kind {
        "unauthorized" => matches!(err, ApiError::Unauthorized),
        "not_found" => matches!(err, ApiError::NotFound),
        "http" => matches!(err, ApiError::Http { .. }),
        other => panic!("unknown error kind: {other}"),
    };
    assert!(matched, "{name}: expected {kind}, got {err:?}");
    true
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[test]
fn login_test_vectors() {
    for case in load(include_str!("../../test-vectors/login.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client();
        let input: LoginRequest = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_login(&input);
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_login(&simulated(&case));
        check_error(name, &case, &result);
        assert_eq!(
            c.session().is_logged_in(),
            case["expected_logged_in"].as_bool().unwrap(),
            "{name}: session"
        );
    }
}

#[test]
fn logout_test_vectors() {
    for case in load(include_str!("../../test-vectors/logout.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client();

        check_request(name, &c.build_logout(), &case["expected_request"]);
        let result = c.parse_logout(&simulated(&case));
        check_error(name, &case, &result);
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client();

        check_request(name, &c.build_employee_list(), &case["expected_request"]);
        let result = c.parse_employee_list(&simulated(&case));
        if !check_error(name, &case, &result) {
            let employees = serde_json::to_value(result.unwrap()).unwrap();
            assert_eq!(employees, case["expected_result"], "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client();
        let id = case["input_id"].as_i64().unwrap();

        check_request(name, &c.build_employee_details(id), &case["expected_request"]);
        let result = c.parse_employee_details(&simulated(&case));
        if !check_error(name, &case, &result) {
            let detail = serde_json::to_value(result.unwrap()).unwrap();
            assert_eq!(detail, case["expected_result"], "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client();

        let req = c.build_update_employee(&case["input"]).unwrap();
        check_request(name, &req, &case["expected_request"]);
        let result = c.parse_update_employee(&simulated(&case));
        check_error(name, &case, &result);
    }
}
