//! Web (boundary) layer of the BeerBrawl backend: the HTTP router, the
//! cross-cutting middleware stack, and the single place where domain error
//! kinds are translated into responses.

use std::sync::Arc;

use domain::jwt::Tokenizer;
use log::*;
use service::config::Config;
use tokio::net::TcpListener;

pub(crate) mod controller;
pub(crate) mod error;
pub(crate) mod extractors;
pub(crate) mod middleware;
pub mod router;

pub use error::{Error, Result};

// Process-wide immutable state handed to handlers and middleware.
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    tokenizer: Arc<Tokenizer>,
}

impl AppState {
    pub fn new(config: Config, tokenizer: Tokenizer) -> Self {
        Self {
            config,
            tokenizer: Arc::new(tokenizer),
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        self.tokenizer.as_ref()
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;

    let listener = TcpListener::bind(format!("{host}:{port}")).await?;
    info!("Server starting... listening for requests on http://{host}:{port}");

    axum::serve(listener, router::define_routes(app_state)).await
}
