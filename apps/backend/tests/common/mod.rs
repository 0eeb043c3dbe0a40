//! Common test utilities and fixtures for integration tests.
//!
//! The service is stateless, so every test gets its own router built from
//! a default configuration.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;

use question_bank_backend::config::Config;
use question_bank_backend::{router, AppState};

/// Test context holding the configuration and the router under test.
pub struct TestContext {
    pub config: Config,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a context with a custom configuration, e.g. a small upload cap.
    pub fn with_config(config: Config) -> Self {
        let app = router(AppState::new(config.clone()));
        Self { config, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }
}
