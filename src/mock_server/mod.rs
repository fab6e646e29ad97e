//! Mock Outseta API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Outseta
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps state across requests, so a
//! test can create an account, cancel it and read it back.
//!
//! # Example
//!
//! ```ignore
//! use outseta::mock_server::MockServer;
//! use outseta::{Get, OutsetaClient, Person};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = OutsetaClient::new(server.url(), "Outseta key:secret").unwrap();
//!
//!     // Server comes with default fixtures
//!     let person = Person::get(&client, "person-ada".to_string()).await.unwrap();
//!     assert_eq!(person.email.as_deref(), Some("ada@example.com"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, DEFAULT_LOGIN};
pub use server::MockServer;
pub use state::MockState;
