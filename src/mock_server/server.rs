//! Mock Outseta API server.
//!
//! Provides an axum-based HTTP server that simulates the Outseta API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Outseta API server for testing.
///
/// The server runs in the background and can be used to test the Outseta
/// client against a stateful API implementation.
pub struct MockServer {
    /// `http://127.0.0.1:<port>`, usable as the client base URL.
    url: String,
    /// Background serve task.
    handle: JoinHandle<()>,
    /// Tenant data, readable and writable while the server runs.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Serve [`Fixtures::default_scenario`] on an ephemeral local port.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Serve a tenant with no people, accounts or deals.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Serve the given tenant state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock server: no local port available");
        let addr = listener
            .local_addr()
            .expect("mock server: listener has no address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("mock server stopped: {e}");
            }
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Base URL to hand to [`crate::OutsetaClient::new`].
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shared handle to the tenant state, for assertions or seeding mid-test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for person in scenario.people {
            state.insert_person(person);
        }

        for account in scenario.accounts {
            state.insert_account(account);
        }

        for deal in scenario.deals {
            state.insert_deal(deal);
        }

        for (email, password) in scenario.logins {
            state.passwords.insert(email, password);
        }

        state
    }

    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // People
            .route(
                "/crm/people",
                get(handlers::list_people).post(handlers::create_person),
            )
            .route(
                "/crm/people/:uid",
                get(handlers::get_person)
                    .put(handlers::update_person)
                    .delete(handlers::delete_person),
            )
            // Accounts
            .route(
                "/crm/accounts",
                get(handlers::list_accounts).post(handlers::create_account),
            )
            .route(
                "/crm/accounts/:uid",
                get(handlers::get_account)
                    .put(handlers::update_account)
                    .delete(handlers::delete_account),
            )
            .route(
                "/crm/accounts/cancellation/:uid",
                put(handlers::cancel_account),
            )
            .route(
                "/crm/accounts/removecancellation/:uid",
                put(handlers::remove_account_cancellation),
            )
            // Deals
            .route("/crm/deals", get(handlers::list_deals))
            .route("/crm/deals/:uid", get(handlers::get_deal))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                handlers::require_auth,
            ))
            // Login and profile check their own credentials
            .route("/tokens", post(handlers::create_token))
            .route("/profile", get(handlers::get_profile))
            // Health check stays reachable without credentials
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
