// src/tests/router_tests/api_tests.rs
use crate::router::handle;
use crate::tests::utils::{body_string, content_type, get, init_test_context};
use approx::assert_relative_eq;
use serde_json::Value;

#[test]
fn estimate_returns_json() {
    let ctx = init_test_context();

    let resp = handle(
        get("/api/estimate?pid=535454150&pool=Yes&baths=0.5"),
        &ctx,
    )
    .unwrap();
    assert_eq!(content_type(&resp), "application/json");

    let json: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(json["base_price"], 129_000);
    assert_eq!(json["reno_price"], 148_500);
    assert_eq!(json["delta"], 19_500);
    assert_relative_eq!(json["percent_change"].as_f64().unwrap(), 15.12);
}

#[test]
fn estimate_without_options_has_zero_delta() {
    let ctx = init_test_context();

    let body = body_string(handle(get("/api/estimate?pid=902207130"), &ctx).unwrap());
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["delta"], 0);
    assert_eq!(json["percent_change"].as_f64(), Some(0.0));
}

#[test]
fn project_returns_mercator_meters() {
    let ctx = init_test_context();

    let body = body_string(handle(get("/api/project?lat=0&lon=0"), &ctx).unwrap());
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_relative_eq!(json["x"].as_f64().unwrap(), 0.0);
    assert_relative_eq!(json["y"].as_f64().unwrap(), 0.0, epsilon = 1e-6);
}

#[test]
fn project_rejects_pole_and_missing_params() {
    let ctx = init_test_context();

    let err = handle(get("/api/project?lat=90&lon=10"), &ctx).unwrap_err();
    assert_eq!(err.status(), 400);

    let err = handle(get("/api/project?lat=42.0"), &ctx).unwrap_err();
    assert_eq!(err.status(), 400);
}
