use crate::config::AppConfig;
use crate::context::AppContext;
use crate::responses::error_response;
use crate::router::handle;
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod context;
mod data;
mod domain;
mod errors;
mod model;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ames_renovator=info".into()),
        )
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Tables and model are loaded once and shared read-only by every worker
    let ctx = match AppContext::load(&cfg) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    let addr = match cfg.addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("invalid listen address: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(workers = cfg.workers, "starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(cfg.workers);

    let result = server.serve(move |req, _info| match handle(req, &ctx) {
        Ok(resp) => resp,
        Err(err) => error_response(err),
    });

    match result {
        Ok(()) => tracing::info!("server shut down cleanly"),
        Err(e) => {
            tracing::error!("server ended with error: {e}");
            std::process::exit(1);
        }
    }
}
