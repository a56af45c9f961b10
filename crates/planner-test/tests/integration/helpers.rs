#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Setting up isolated SQLite databases (one temporary file per test)
//! - Creating the full Salvo service with a pinned clock
//! - Making HTTP requests and reading JSON responses
//!
//! ## Database Isolation
//! Each test gets its own database file inside a temporary directory that is
//! removed when the `TestDb` is dropped, so tests run in parallel freely.

use std::sync::Arc;

use chrono::NaiveDate;
use salvo::http::{Method, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt};
use serde_json::Value;
use tempfile::TempDir;

use planner_test::app::app::router;
use planner_test::component::clock::FixedClock;
use planner_test::component::config::Settings;
use planner_test::component::db::DbProvider;
use planner_test::component::db::connection::{DbConnection, DbPool, create_pool};
use planner_test::component::db::migrate::run_migrations;

pub use tracing;

/// The date every test service treats as today.
pub const TODAY: &str = "20240126";

/// Password configured by [`TestDb::authenticated_service`].
pub const TEST_PASSWORD: &str = "correct horse";

#[must_use]
pub fn today() -> NaiveDate {
    NaiveDate::parse_from_str(TODAY, "%Y%m%d").expect("valid test date")
}

/// A migrated database in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    url: String,
    pool: DbPool,
}

impl TestDb {
    /// Creates and migrates a fresh database.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be created or migrations fail.
    pub async fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let url = dir.path().join("scheduler.db").to_string_lossy().into_owned();

        run_migrations(&url).await?;
        let pool = create_pool(&url, 2).await?;

        Ok(Self {
            _dir: dir,
            url,
            pool,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Direct connection for seeding and assertions.
    pub async fn conn(&self) -> DbConnection<'_> {
        self.pool
            .get_connection()
            .await
            .expect("Failed to get test connection")
    }

    fn settings(&self, password: Option<&str>) -> Settings {
        let mut toml = format!("[database]\nurl = {:?}\n", self.url);
        if let Some(password) = password {
            toml.push_str(&format!("[auth]\npassword = {password:?}\n"));
        }
        Settings::from_toml_str(&toml).expect("Valid test settings")
    }

    /// Full service with authentication disabled.
    #[must_use]
    pub fn service(&self) -> Service {
        self.build_service(None)
    }

    /// Full service protected by [`TEST_PASSWORD`].
    #[must_use]
    pub fn authenticated_service(&self) -> Service {
        self.build_service(Some(TEST_PASSWORD))
    }

    /// Full service protected by `password`, or open when `None`.
    #[must_use]
    pub fn build_service(&self, password: Option<&str>) -> Service {
        let router = router(
            &self.settings(password),
            self.pool.clone(),
            Arc::new(FixedClock(today())),
        )
        .expect("Router should build");
        Service::new(router)
    }
}

/// A response with its body already read.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected} but got {}: {}",
            self.status, self.body
        );
        self
    }

    /// Parses the body as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Expected JSON body ({e}) but got:\n{}", self.body))
    }

    /// Returns the `error` field of a JSON error body.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.json()["error"]
            .as_str()
            .expect("Error body should carry an error string")
            .to_string()
    }
}

fn url(path: &str) -> String {
    format!("http://127.0.0.1:5800{path}")
}

async fn finish(builder: RequestBuilder, service: &Service) -> TestResponse {
    let mut response = builder.send(service).await;
    let status = response
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.take_string().await.unwrap_or_default();
    TestResponse { status, body }
}

/// Sends a request without a body.
pub async fn send(service: &Service, method: Method, path: &str, token: Option<&str>) -> TestResponse {
    let mut builder = RequestBuilder::new(url(path), method);
    if let Some(token) = token {
        builder = builder.add_header("cookie", format!("token={token}"), true);
    }
    finish(builder, service).await
}

/// Sends a request with a JSON body.
pub async fn send_json(
    service: &Service,
    method: Method,
    path: &str,
    body: &Value,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = RequestBuilder::new(url(path), method).json(body);
    if let Some(token) = token {
        builder = builder.add_header("cookie", format!("token={token}"), true);
    }
    finish(builder, service).await
}

/// Signs in with [`TEST_PASSWORD`] and returns the token.
pub async fn sign_in(service: &Service) -> String {
    let res = send_json(
        service,
        Method::POST,
        "/api/signin",
        &serde_json::json!({ "password": TEST_PASSWORD }),
        None,
    )
    .await
    .assert_status(StatusCode::OK);

    res.json()["token"]
        .as_str()
        .expect("Sign-in should return a token")
        .to_string()
}

/// Creates a task through the API and returns its id.
pub async fn create_task(service: &Service, body: &Value) -> String {
    let res = send_json(service, Method::POST, "/api/task", body, None)
        .await
        .assert_status(StatusCode::OK);

    res.json()["id"]
        .as_str()
        .expect("Create should return a string id")
        .to_string()
}

/// Fetches a task through the API.
pub async fn get_task(service: &Service, id: &str) -> TestResponse {
    send(service, Method::GET, &format!("/api/task?id={id}"), None).await
}
