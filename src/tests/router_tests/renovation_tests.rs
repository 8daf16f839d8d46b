// src/tests/router_tests/renovation_tests.rs
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, init_test_context};

const NAMES: &str = "/renovation?sector=North&neighborhood=NAmes";

#[test]
fn starts_from_configured_default_house() {
    let ctx = init_test_context();

    let resp = handle(get(NAMES), &ctx).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("1417 Douglas Ave"));
    assert!(body.contains("1-Story House in NAmes"));
    assert!(body.contains("Area: 1,150 sf (1F + 2F + FinBsmt)"));
    assert!(body.contains("Unfinished Bsmt: 400 sf"));
    // baseline and renovated price are equal without options
    assert!(body.contains("$129,000"));
    assert!(body.contains("actual: <strong>$136,500</strong>"));
}

#[test]
fn building_a_pool_adds_the_pool_coefficient() {
    let ctx = init_test_context();

    let body = body_string(
        handle(get(&format!("{NAMES}&pid=535454150&pool=Yes")), &ctx).unwrap(),
    );

    assert!(body.contains("$129,000"));
    assert!(body.contains("$144,000"));
    assert!(body.contains("$15,000"));
    assert!(body.contains("11.63%"));
}

#[test]
fn owned_amenities_are_not_offered() {
    let ctx = init_test_context();

    // has central air and a paved drive already
    let body = body_string(handle(get(&format!("{NAMES}&pid=535454150")), &ctx).unwrap());
    assert!(body.contains("Build Pool"));
    assert!(!body.contains("Install Central Air"));
    assert!(!body.contains("Pave Driveway"));

    // downtown default has neither
    let body = body_string(handle(get("/renovation"), &ctx).unwrap());
    assert!(body.contains("511 Douglas Ave"));
    assert!(body.contains("Install Central Air"));
    assert!(body.contains("Pave Driveway"));
}

#[test]
fn estimate_partial_only_renders_the_panel() {
    let ctx = init_test_context();

    let body = body_string(
        handle(
            get("/renovation/estimate?pid=535454150&baths=1&central_air=Yes"),
            &ctx,
        )
        .unwrap(),
    );

    assert!(body.starts_with(r#"<section id="estimate-panel""#));
    assert!(!body.contains("<html"));
    // central air already present, one bath is 9,000
    assert!(body.contains("$138,000"));
    assert!(body.contains("$9,000"));
}

#[test]
fn unknown_pid_is_not_found() {
    let ctx = init_test_context();

    let err = handle(get("/renovation?pid=1"), &ctx).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn malformed_pid_is_bad_request() {
    let ctx = init_test_context();

    let err = handle(get("/renovation?pid=abc"), &ctx).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn bath_count_outside_slider_is_bad_request() {
    let ctx = init_test_context();

    for baths in ["3", "0.25", "-0.5", "many"] {
        let err = handle(
            get(&format!("/renovation/estimate?pid=535454150&baths={baths}")),
            &ctx,
        )
        .unwrap_err();
        assert_eq!(err.status(), 400, "baths={baths}");
    }
}

#[test]
fn unrecognized_yes_no_value_is_bad_request() {
    let ctx = init_test_context();

    let err = handle(get("/renovation?pool=maybe"), &ctx).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}
