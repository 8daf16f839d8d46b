use crate::config::AppConfig;
use crate::context::AppContext;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::path::PathBuf;

/// Context over the fixture tables shipped in `assets/`.
pub fn init_test_context() -> AppContext {
    let cfg = AppConfig {
        assets_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
        ..AppConfig::default()
    };

    AppContext::load(&cfg).unwrap_or_else(|e| panic!("Fixture loading failed: {e}"))
}

pub fn get(uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn body_string(mut resp: Response) -> String {
    let mut body = String::new();
    resp.body_mut()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

pub fn content_type(resp: &Response) -> &str {
    resp.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
