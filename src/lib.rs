//! Outseta API client library.
//!
//! A Rust library for the [Outseta](https://www.outseta.com) REST API using
//! a trait-based architecture where each uniform operation (Get, List,
//! Create, Update, Delete) is a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use outseta::{Account, AccountListQuery, AccountStage, Get, List, OutsetaClient, Person};
//!
//! #[tokio::main]
//! async fn main() -> outseta::Result<()> {
//!     // Create client from environment variables
//!     let client = OutsetaClient::from_env()?;
//!
//!     // Get a person by Uid
//!     let person = Person::get(&client, "wZmNw7Q2".to_string()).await?;
//!     println!("Person: {}", person.display_name());
//!
//!     // List every account that is past due
//!     let query = AccountListQuery {
//!         account_stage: Some(AccountStage::PastDue),
//!         ..Default::default()
//!     };
//!     let accounts = Account::list_all(&client, &query).await?;
//!     println!("Found {} past-due accounts", accounts.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around five core traits:
//!
//! - [`Get`] - Fetch a single entity by `Uid`
//! - [`List`] - Fetch paginated collections of entities
//! - [`Create`] - Add a new entity
//! - [`Update`] - Modify an existing entity
//! - [`Delete`] - Remove an entity
//!
//! Operations with their own shape (cancelling an account, changing a
//! subscription, replying to a case, ...) are inherent async functions on
//! the model type, e.g. [`Account::cancel`] or [`Subscription::change`].
//!
//! # Configuration
//!
//! [`OutsetaClient::from_env`] reads:
//!
//! - `OUTSETA_URL` (required) - API base URL, e.g. `https://acme.outseta.com/api/v1`
//! - `OUTSETA_KEY` - Server-side key, sent verbatim (`Outseta <key>:<secret>`)
//! - `OUTSETA_ACCESS_TOKEN` - Bearer token used when `OUTSETA_KEY` is unset or blank
//!
//! Use [`OutsetaClient::builder`] for anything else.

pub mod cli;
mod client;
mod constants;
pub mod datetime;
mod error;
mod models;
pub mod output;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ClientBuilder, OutsetaClient};
pub use error::{OutsetaError, Result};
pub use output::PrettyPrint;
pub use pagination::{ItemPage, ListOptions, Metadata, OrderBy, Page, PageRequest, MAX_PAGE_SIZE};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update, DEFAULT_PAGE_SIZE};

// Re-export enumerated codes
pub use constants::{
    AccountStage, ActivityType, BillingRenewalTerm, BillingTransactionType, CaseSource, CaseStatus,
    DiscountDuration, EntityType, Sort,
};

// Re-export models
pub use models::{
    get_auth_token, update_payment_info, Account, AccountListQuery, Activity, ActivityListQuery,
    AddInvoicePaymentRequest, AddOn, AddOnUsageRequest, AuthToken, CancelAccountRequest, Case,
    CaseHistory, CaseReply, CreateOrChangeSubscriptionRequest, Deal, DealPerson, DealPipelineStage,
    Discount, EmailList, Invoice, InvoiceDisplayItem, InvoiceLineItem, MailingAddress,
    MarketingSubscription, Person, PersonAccount, Plan, PlanAddOn, PlanFamily, Profile,
    SubscriberListQuery, Subscription, SubscriptionAddOn, TemporaryPasswordRequest, Transaction,
    TransactionListQuery, UpdatePasswordRequest, UpdatePaymentInfoRequest,
};
