//! Common test utilities for coinshop integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use coinshop_service::{auth, create_router, AppState, ServiceConfig};
use coinshop_store::{exec, Ledger, MemLedger};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The backing ledger, for seeding and direct assertions.
    pub ledger: MemLedger,
    /// Secret the server signs tokens with.
    pub auth_secret: String,
}

impl TestHarness {
    /// Create a new test harness with a fresh in-memory ledger and a small
    /// seeded catalog.
    pub async fn new() -> Self {
        let ledger = MemLedger::new();
        ledger.insert_item("t-shirt", 80).await;
        ledger.insert_item("cup", 20).await;
        ledger.insert_item("pen", 10).await;

        let auth_secret = "test-secret".to_string();

        let config = ServiceConfig {
            auth_secret: auth_secret.clone(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::new(ledger.clone()), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            ledger,
            auth_secret,
        }
    }

    /// Register `username` through the API and return its bearer token.
    pub async fn register(&self, username: &str) -> String {
        let response = self
            .server
            .post("/api/auth")
            .json(&serde_json::json!({
                "username": username,
                "password": "correct horse",
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["token"]
            .as_str()
            .expect("auth response carries a token")
            .to_string()
    }

    /// Mint a valid token without going through the API.
    pub fn token_for(&self, username: &str) -> String {
        auth::issue_token(&self.auth_secret, username, 3600).expect("Failed to sign test token")
    }

    /// Bearer header value for `token`.
    pub fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    /// Read a balance directly from the ledger.
    pub async fn balance_of(&self, username: &str) -> i64 {
        let mut scope = self.ledger.begin().await.expect("begin");
        let balance = self
            .ledger
            .balance(&mut scope, username)
            .await
            .expect("balance");
        self.ledger.rollback(scope).await.expect("rollback");
        balance
    }

    /// Force a balance by crediting or debiting the difference.
    pub async fn set_balance(&self, username: &str, target: i64) {
        let current = self.balance_of(username).await;
        let mut scope = self.ledger.begin().await.expect("begin");
        let outcome = if target >= current {
            self.ledger
                .credit(&mut scope, username, target - current)
                .await
        } else {
            self.ledger
                .debit(&mut scope, username, current - target)
                .await
        };
        exec::finish(&self.ledger, scope, outcome)
            .await
            .expect("set_balance");
    }
}
