//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Outseta API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{Account, AccountStage, Deal, Person, PersonAccount};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// People indexed by Uid.
    pub people: BTreeMap<String, Person>,

    /// Accounts indexed by Uid.
    pub accounts: BTreeMap<String, Account>,

    /// Deals indexed by Uid.
    pub deals: BTreeMap<String, Deal>,

    /// Login passwords indexed by email, used by `POST tokens`.
    pub passwords: HashMap<String, String>,

    /// Issued access tokens mapped to the Uid of their person.
    pub tokens: HashMap<String, String>,

    /// If set, every CRM request must carry exactly this `Authorization` value.
    pub required_auth: Option<String>,

    next_uid: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a person to the state, assigning a Uid when missing.
    pub fn with_person(mut self, person: Person) -> Self {
        self.insert_person(person);
        self
    }

    /// Add an account to the state, assigning a Uid when missing.
    pub fn with_account(mut self, account: Account) -> Self {
        self.insert_account(account);
        self
    }

    /// Add a deal to the state, assigning a Uid when missing.
    pub fn with_deal(mut self, deal: Deal) -> Self {
        self.insert_deal(deal);
        self
    }

    /// Register a login for `POST tokens`.
    pub fn with_login(mut self, email: &str, password: &str) -> Self {
        self.passwords
            .insert(email.to_string(), password.to_string());
        self
    }

    /// Require this exact `Authorization` header on the CRM routes.
    pub fn with_required_auth(mut self, authorization: &str) -> Self {
        self.required_auth = Some(authorization.to_string());
        self
    }

    fn assign_uid(&mut self, prefix: &str, uid: Option<String>) -> String {
        match uid {
            Some(uid) if !uid.trim().is_empty() => uid,
            _ => {
                self.next_uid += 1;
                format!("{prefix}-{}", self.next_uid)
            }
        }
    }

    /// Store a person and return its Uid.
    pub fn insert_person(&mut self, mut person: Person) -> String {
        let uid = self.assign_uid("person", person.uid.take());
        person.uid = Some(uid.clone());
        self.people.insert(uid.clone(), person);
        uid
    }

    /// Store an account and return its Uid.
    ///
    /// People embedded in `PersonAccount` without a Uid are stored as new
    /// people; the account keeps a reference to them.
    pub fn insert_account(&mut self, mut account: Account) -> String {
        let uid = self.assign_uid("account", account.uid.take());
        account.uid = Some(uid.clone());
        if account.account_stage.is_none() {
            account.account_stage = Some(AccountStage::Subscribing.value());
        }

        if let Some(memberships) = account.person_account.as_mut() {
            for membership in memberships.iter_mut() {
                if let Some(person) = membership.person.as_deref_mut() {
                    if person.uid.is_none() {
                        let person_uid = self.insert_person(person.clone());
                        person.uid = Some(person_uid);
                    }
                }
            }
        }

        self.accounts.insert(uid.clone(), account);
        uid
    }

    /// Store a deal and return its Uid.
    pub fn insert_deal(&mut self, mut deal: Deal) -> String {
        let uid = self.assign_uid("deal", deal.uid.take());
        deal.uid = Some(uid.clone());
        self.deals.insert(uid.clone(), deal);
        uid
    }

    /// Accounts, optionally restricted to one stage code.
    pub fn list_accounts(&self, stage: Option<i32>) -> Vec<&Account> {
        self.accounts
            .values()
            .filter(|a| stage.map(|s| a.account_stage == Some(s)).unwrap_or(true))
            .collect()
    }

    /// Merge the set fields of `update` into a stored person.
    pub fn update_person(&mut self, uid: &str, update: Person) -> Option<&Person> {
        let person = self.people.get_mut(uid)?;
        merge(person, update, |p| p.uid = Some(uid.to_string()));
        self.people.get(uid)
    }

    /// Merge the set fields of `update` into a stored account.
    pub fn update_account(&mut self, uid: &str, update: Account) -> Option<&Account> {
        let account = self.accounts.get_mut(uid)?;
        merge(account, update, |a| a.uid = Some(uid.to_string()));
        self.accounts.get(uid)
    }

    /// Set an account's stage code.
    pub fn set_account_stage(&mut self, uid: &str, stage: AccountStage) -> Option<&Account> {
        let account = self.accounts.get_mut(uid)?;
        account.account_stage = Some(stage.value());
        Some(account)
    }

    /// Mint an access token if the credentials match a registered login.
    pub fn issue_token(&mut self, username: &str, password: &str) -> Option<String> {
        if self.passwords.get(username).map(String::as_str) != Some(password) {
            return None;
        }
        let uid = self
            .people
            .values()
            .find(|p| p.email.as_deref() == Some(username))?
            .uid
            .clone()?;

        self.next_uid += 1;
        let token = format!("mock-token-{}", self.next_uid);
        self.tokens.insert(token.clone(), uid);
        Some(token)
    }

    /// The person an access token was issued for.
    pub fn person_for_token(&self, token: &str) -> Option<&Person> {
        self.tokens.get(token).and_then(|uid| self.people.get(uid))
    }

    /// A person together with the accounts that list them as a member.
    pub fn person_with_accounts(&self, uid: &str) -> Option<Person> {
        let mut person = self.people.get(uid)?.clone();
        let memberships: Vec<PersonAccount> = self
            .accounts
            .values()
            .filter(|a| is_member(a, uid))
            .map(|a| PersonAccount {
                account: Some(Box::new(Account {
                    uid: a.uid.clone(),
                    name: a.name.clone(),
                    account_stage: a.account_stage,
                    ..Default::default()
                })),
                ..Default::default()
            })
            .collect();
        if !memberships.is_empty() {
            person.person_account = Some(memberships);
        }
        Some(person)
    }
}

fn is_member(account: &Account, uid: &str) -> bool {
    account
        .person_account
        .iter()
        .flatten()
        .filter_map(|pa| pa.person.as_ref())
        .any(|p| p.uid.as_deref() == Some(uid))
}

/// Overwrite `target` with every field `update` sets, going through JSON so
/// unset (`None`) fields of the update are skipped.
fn merge<T>(target: &mut T, update: T, fix: impl FnOnce(&mut T))
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    let current = serde_json::to_value(&*target);
    let patch = serde_json::to_value(&update);
    if let (Ok(Value::Object(mut fields)), Ok(Value::Object(patch))) = (current, patch) {
        fields.extend(patch);
        if let Ok(merged) = serde_json::from_value(Value::Object(fields)) {
            *target = merged;
        }
    }
    fix(target);
}
