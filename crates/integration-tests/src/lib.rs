//! Integration tests for Legumechanics.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p legumechanics-integration-tests
//! ```
//!
//! Each test spawns the storefront on an ephemeral port and drives it over
//! real HTTP with a cookie-keeping client, so the session cart carries across
//! requests the way it does in a browser.

use std::net::SocketAddr;

use legumechanics_core::Catalog;
use legumechanics_storefront::{app, config::StorefrontConfig, state::AppState};
use reqwest::Client;

/// A running storefront plus a client holding one shopper's session.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
}

impl TestContext {
    /// Start a storefront with default configuration and the built-in catalog.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind or the client cannot be built.
    pub async fn new() -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).expect("default config is valid");
        let state = AppState::with_catalog(config, Catalog::builtin());

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            axum::serve(listener, app(state))
                .await
                .expect("Test server error");
        });

        Self {
            client: Self::shopper(),
            storefront_url: format!("http://{addr}"),
        }
    }

    /// A fresh client with its own cookie jar, i.e. a second shopper.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn shopper() -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client")
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }
}
