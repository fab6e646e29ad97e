//! Account model and trait implementations.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{entity_path, MailingAddress, PersonAccount, Subscription};
use crate::client::OutsetaClient;
use crate::constants::AccountStage;
use crate::datetime::DATE_FORMAT;
use crate::error::Result;
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::{Create, Delete, Get, List, Update};

const ACCOUNTS: &str = "crm/accounts";

/// An Outseta account: the billable entity people belong to.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub client_identifier: Option<String>,
    pub billing_address: Option<MailingAddress>,
    pub mailing_address: Option<MailingAddress>,

    /// Raw stage code; see [`Account::stage`].
    pub account_stage: Option<i32>,
    pub payment_information: Option<serde_json::Value>,

    pub person_account: Option<Vec<PersonAccount>>,
    pub subscriptions: Option<Vec<Subscription>>,

    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Query parameters for listing accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountListQuery {
    /// Only accounts in this stage.
    #[serde(rename = "AccountStage", skip_serializing_if = "Option::is_none")]
    pub account_stage: Option<AccountStage>,

    #[serde(flatten)]
    pub options: ListOptions,
}

/// Body of `PUT crm/accounts/cancellation/{id}`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelAccountRequest {
    pub cancelation_reason: Option<String>,
    pub comment: Option<String>,
    pub account: Option<Account>,
}

#[derive(Serialize)]
struct SendConfirmationEmail {
    #[serde(rename = "sendConfirmationEmail")]
    send_confirmation_email: bool,
}

#[derive(Serialize)]
struct SendWelcomeEmail {
    #[serde(rename = "sendWelcomeEmail")]
    send_welcome_email: bool,
}

impl Account {
    /// Typed account stage, if the code is known.
    pub fn stage(&self) -> Option<AccountStage> {
        self.account_stage
            .and_then(|code| AccountStage::try_from(code).ok())
    }

    /// Primary member of the account, if any.
    pub fn primary_contact(&self) -> Option<&PersonAccount> {
        self.person_account
            .as_deref()?
            .iter()
            .find(|pa| pa.is_primary == Some(true))
    }

    /// Create an account together with a brand-new person.
    ///
    /// The account must carry a `PersonAccount` whose person has at least an
    /// email. Outseta optionally sends that person a confirmation email.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the account or the request fails.
    #[tracing::instrument(skip(client, account))]
    pub async fn create_with_new_person(
        client: &OutsetaClient,
        send_confirmation_email: bool,
        account: &Account,
    ) -> Result<Account> {
        let query = SendConfirmationEmail {
            send_confirmation_email,
        };
        let response = client.post_with_query(ACCOUNTS, &query, account).await?;
        OutsetaClient::read_json(response).await
    }

    /// Cancel the account's subscription at the end of the billing period.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client, request))]
    pub async fn cancel(
        client: &OutsetaClient,
        id: &str,
        request: &CancelAccountRequest,
    ) -> Result<()> {
        let path = entity_path(&format!("{ACCOUNTS}/cancellation"), id, "Account")?;
        client.put(&path, request).await?;
        Ok(())
    }

    /// Undo a pending cancellation.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn remove_cancellation(client: &OutsetaClient, id: &str) -> Result<()> {
        let path = entity_path(&format!("{ACCOUNTS}/removecancellation"), id, "Account")?;
        client.put_empty(&path).await?;
        Ok(())
    }

    /// Create a new person and add them to the account.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client, membership))]
    pub async fn add_new_person(
        client: &OutsetaClient,
        id: &str,
        send_welcome_email: bool,
        membership: &PersonAccount,
    ) -> Result<PersonAccount> {
        let path = format!("{}/memberships", entity_path(ACCOUNTS, id, "Account")?);
        let query = SendWelcomeEmail { send_welcome_email };
        let response = client.post_with_query(&path, &query, membership).await?;
        OutsetaClient::read_json(response).await
    }

    /// Add a person who already exists in the CRM to the account.
    ///
    /// The membership's person only needs its `Uid` set.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client, membership))]
    pub async fn add_existing_person(
        client: &OutsetaClient,
        id: &str,
        membership: &PersonAccount,
    ) -> Result<PersonAccount> {
        let path = format!("{}/memberships", entity_path(ACCOUNTS, id, "Account")?);
        let response = client.post(&path, membership).await?;
        OutsetaClient::read_json(response).await
    }

    /// Change a membership, for example to make someone the primary contact.
    ///
    /// Outseta may answer with an empty body, so nothing is read back.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank account or membership ID, or if the
    /// request fails.
    #[tracing::instrument(skip(client, membership))]
    pub async fn update_membership(
        client: &OutsetaClient,
        id: &str,
        membership_id: &str,
        membership: &PersonAccount,
    ) -> Result<()> {
        let path = membership_path(id, membership_id)?;
        client.put(&path, membership).await?;
        Ok(())
    }

    /// Remove a person from the account.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank account or membership ID, or if the
    /// request fails.
    #[tracing::instrument(skip(client))]
    pub async fn remove_person(
        client: &OutsetaClient,
        id: &str,
        membership_id: &str,
    ) -> Result<()> {
        let path = membership_path(id, membership_id)?;
        client.delete(&path).await?;
        Ok(())
    }

    /// Move the end of the account's trial to `until`.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn extend_trial(client: &OutsetaClient, id: &str, until: NaiveDate) -> Result<()> {
        let path = format!(
            "{}/{}",
            entity_path(&format!("{ACCOUNTS}/extendtrial"), id, "Account")?,
            until.format(DATE_FORMAT)
        );
        client.put_empty(&path).await?;
        Ok(())
    }
}

fn membership_path(id: &str, membership_id: &str) -> Result<String> {
    let account = entity_path(ACCOUNTS, id, "Account")?;
    entity_path(
        &format!("{account}/memberships"),
        membership_id,
        "Membership",
    )
}

#[async_trait]
impl Get for Account {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(ACCOUNTS, &id, "Account")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for Account {
    type Query = AccountListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, ACCOUNTS, query, page, count).await
    }
}

/// Registers an account; the body may reference an existing person
/// through its `PersonAccount`.
#[async_trait]
impl Create for Account {
    type Params = Account;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &OutsetaClient, params: Account) -> Result<Self> {
        let response = client.post(ACCOUNTS, &params).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl Update for Account {
    type Id = String;
    type Params = Account;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &OutsetaClient, id: String, params: Account) -> Result<Self> {
        let path = entity_path(ACCOUNTS, &id, "Account")?;
        let response = client.put(&path, &params).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl Delete for Account {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &OutsetaClient, id: String) -> Result<()> {
        let path = entity_path(ACCOUNTS, &id, "Account")?;
        client.delete(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;
    use crate::pagination::OrderBy;

    #[test]
    fn test_deserialize_account() {
        let json = r#"{
            "Uid": "L9nqa1mZ",
            "Name": "Analytical Engines Ltd",
            "AccountStage": 3,
            "BillingAddress": {"AddressLine1": "12 St James's Square", "Country": "UK"},
            "PersonAccount": [
                {"IsPrimary": false, "Person": {"Email": "charles@example.com"}},
                {"IsPrimary": true, "Person": {"Email": "ada@example.com"}}
            ],
            "Subscriptions": [{"Uid": "sub-1", "BillingRenewalTerm": 1}],
            "Created": "2024-01-02T03:04:05",
            "Updated": ""
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.uid.as_deref(), Some("L9nqa1mZ"));
        assert_eq!(account.stage(), Some(AccountStage::Subscribing));
        assert!(account.created.is_some());
        assert!(account.updated.is_none());
        assert_eq!(
            account
                .billing_address
                .as_ref()
                .and_then(|a| a.address_line1.as_deref()),
            Some("12 St James's Square")
        );

        let primary = account.primary_contact().unwrap();
        assert_eq!(
            primary.person.as_ref().and_then(|p| p.email.as_deref()),
            Some("ada@example.com")
        );
        assert_eq!(account.subscriptions.map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_unknown_stage_is_kept_raw() {
        let account: Account = serde_json::from_str(r#"{"AccountStage": 99}"#).unwrap();
        assert_eq!(account.account_stage, Some(99));
        assert_eq!(account.stage(), None);
    }

    #[test]
    fn test_list_query_serialization() {
        let query = AccountListQuery {
            account_stage: Some(AccountStage::PastDue),
            options: ListOptions::default().order_by(OrderBy::asc("Name")),
        };
        let serialized = serde_qs::to_string(&query).unwrap();
        assert!(serialized.contains("AccountStage=7"));
        assert!(serialized.contains("orderBy=Name+ASC"));
    }

    #[test]
    fn test_cancel_request_body() {
        let request = CancelAccountRequest {
            cancelation_reason: Some("Too expensive".to_string()),
            comment: None,
            account: Some(Account {
                uid: Some("acc-1".to_string()),
                ..Default::default()
            }),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "CancelationReason": "Too expensive",
                "Account": {"Uid": "acc-1"}
            })
        );
    }

    #[test]
    fn test_membership_path_validates_both_ids() {
        assert_eq!(
            membership_path("acc", "mem").unwrap(),
            "crm/accounts/acc/memberships/mem"
        );
        let err = membership_path("acc", "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: Membership id cannot be null or blank."
        );
        let err = membership_path(" ", "mem").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: Account id cannot be null or blank."
        );
    }

    #[test]
    fn test_account_with_new_person_body() {
        let account = Account {
            name: Some("Acme".to_string()),
            person_account: Some(vec![PersonAccount::for_person(
                Person::with_email("boss@acme.test"),
                true,
            )]),
            ..Default::default()
        };
        let body = serde_json::to_value(&account).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "Name": "Acme",
                "PersonAccount": [{"Person": {"Email": "boss@acme.test"}, "IsPrimary": true}]
            })
        );
    }
}
