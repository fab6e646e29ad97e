//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{Account, AccountStage, Deal, DealPipelineStage, Person, PersonAccount};

/// Email and password of the person the default scenario can log in as.
pub const DEFAULT_LOGIN: (&str, &str) = ("ada@example.com", "correct-horse");

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // CRM Fixtures
    // =========================================================================

    /// Create a person with a Uid, email and name.
    pub fn person(uid: &str, email: &str, first: &str, last: &str) -> Person {
        Person {
            uid: Some(uid.to_string()),
            email: Some(email.to_string()),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            ..Default::default()
        }
    }

    /// Create an account whose primary contact is `primary`.
    pub fn account(uid: &str, name: &str, stage: AccountStage, primary: &Person) -> Account {
        Account {
            uid: Some(uid.to_string()),
            name: Some(name.to_string()),
            account_stage: Some(stage.value()),
            person_account: Some(vec![PersonAccount::for_person(
                Person {
                    uid: primary.uid.clone(),
                    email: primary.email.clone(),
                    ..Default::default()
                },
                true,
            )]),
            ..Default::default()
        }
    }

    /// Create a deal in the given pipeline stage.
    pub fn deal(uid: &str, name: &str, amount: f64, stage_uid: &str) -> Deal {
        Deal {
            uid: Some(uid.to_string()),
            name: Some(name.to_string()),
            amount: Some(amount),
            deal_pipeline_stage: Some(DealPipelineStage::with_uid(stage_uid)),
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create a default scenario with interconnected test data.
    ///
    /// - three people, one of whom ([`DEFAULT_LOGIN`]) can obtain a token
    /// - three accounts in different stages
    /// - two deals
    pub fn default_scenario() -> DefaultScenario {
        let ada = Self::person("person-ada", DEFAULT_LOGIN.0, "Ada", "Lovelace");
        let grace = Self::person("person-grace", "grace@example.com", "Grace", "Hopper");
        let alan = Self::person("person-alan", "alan@example.com", "Alan", "Turing");

        let accounts = vec![
            Self::account("account-acme", "Acme", AccountStage::Subscribing, &ada),
            Self::account("account-globex", "Globex", AccountStage::Trialing, &grace),
            Self::account("account-initech", "Initech", AccountStage::PastDue, &alan),
        ];

        let deals = vec![
            Self::deal("deal-renewal", "Acme renewal", 1200.0, "stage-won"),
            Self::deal("deal-upsell", "Globex upsell", 450.5, "stage-open"),
        ];

        DefaultScenario {
            people: vec![ada, grace, alan],
            accounts,
            deals,
            logins: vec![(DEFAULT_LOGIN.0.to_string(), DEFAULT_LOGIN.1.to_string())],
        }
    }
}

/// A complete test scenario with related data.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub people: Vec<Person>,
    pub accounts: Vec<Account>,
    pub deals: Vec<Deal>,
    /// `(email, password)` pairs accepted by `POST tokens`.
    pub logins: Vec<(String, String)>,
}
