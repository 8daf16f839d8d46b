// src/tests/router_tests/page_tests.rs
use crate::domain::sectors::LANDMARKS;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, content_type, get, init_test_context};

#[test]
fn map_lists_every_landmark() {
    let ctx = init_test_context();

    let resp = handle(get("/"), &ctx).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    for mark in &LANDMARKS {
        assert!(body.contains(mark.name), "missing landmark {}", mark.name);
    }
    assert!(body.contains("Data: SalePrice"));
}

#[test]
fn map_colors_by_neighborhood_on_request() {
    let ctx = init_test_context();

    let body = body_string(handle(get("/map?choice=Neighborhood"), &ctx).unwrap());

    assert!(body.contains("Data: Neighborhood"));
    assert!(body.contains("<title>NridgHt</title>"));
}

#[test]
fn unknown_map_choice_is_bad_request() {
    let ctx = init_test_context();

    let err = handle(get("/map?choice=Elevation"), &ctx).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn unknown_route_is_not_found() {
    let ctx = init_test_context();

    let err = handle(get("/does-not-exist"), &ctx).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
    assert_eq!(err.status(), 404);
}

#[test]
fn sidebar_defaults_to_first_neighborhood_of_downtown() {
    let ctx = init_test_context();

    let body = body_string(handle(get("/collaborators"), &ctx).unwrap());

    assert!(body.contains(r#"value="Downtown" selected"#));
    assert!(body.contains(r#"value="OldTown" checked"#));
    assert!(body.contains("Tony Pennoyer"));
}

#[test]
fn sidebar_ignores_neighborhood_outside_sector() {
    let ctx = init_test_context();

    let body = body_string(
        handle(get("/feature-engineering?sector=North&neighborhood=OldTown"), &ctx).unwrap(),
    );

    assert!(body.contains(r#"value="NAmes" checked"#));
    assert!(!body.contains(r#"value="OldTown""#));
}

#[test]
fn unknown_sector_is_bad_request() {
    let ctx = init_test_context();

    let err = handle(get("/sectors?sector=Uptown"), &ctx).unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn sectors_page_draws_every_sector() {
    let ctx = init_test_context();

    let body = body_string(handle(get("/sectors?overlay=YearBuilt"), &ctx).unwrap());

    assert!(body.contains("EDA with City Sectors"));
    for code in ["NW", "SO", "WE", "SE", "NO", "DT"] {
        assert!(body.contains(&format!(">{code}</text>")), "missing {code}");
    }
    assert!(body.contains(r#"value="YearBuilt" checked"#));
}

#[test]
fn features_page_titles_by_pick() {
    let ctx = init_test_context();

    let body = body_string(handle(get("/features?pick=CentralAir"), &ctx).unwrap());

    assert!(body.contains("Sale Price vs. GoodLivArea by CentralAir"));
    // N facet before Y facet
    let n = body.find("N (").unwrap();
    let y = body.find("Y (").unwrap();
    assert!(n < y);
}

#[test]
fn stylesheet_is_served_as_css() {
    let ctx = init_test_context();

    let resp = handle(get("/static/main.css"), &ctx).unwrap();
    assert!(content_type(&resp).starts_with("text/css"));
}

#[test]
fn export_returns_spreadsheet() {
    let ctx = init_test_context();

    let resp = handle(get("/export?sector=North&neighborhood=NAmes"), &ctx).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        content_type(&resp),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(disposition.contains("houses_NAmes.xlsx"));
}

#[test]
fn every_page_offers_the_export_form() {
    let ctx = init_test_context();

    for uri in ["/map", "/sectors", "/renovation", "/collaborators"] {
        let body = body_string(handle(get(&format!("{uri}?sector=North&neighborhood=NAmes")), &ctx).unwrap());
        assert!(body.contains(r#"action="/export""#), "no export form on {uri}");
        assert!(body.contains("Download NAmes houses (.xlsx)"), "no export button on {uri}");
    }
}
