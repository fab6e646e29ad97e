//! Person model and trait implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{entity_path, Account};
use crate::client::OutsetaClient;
use crate::error::Result;
use crate::pagination::{fetch_page, Page};
use crate::traits::{Create, Delete, Get, List, Update};

const PEOPLE: &str = "crm/people";

/// A person in the Outseta CRM.
///
/// The same type is used for requests: fields left as `None` are omitted
/// from the body, so an update only touches what is set.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub uid: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub mailing_address: Option<MailingAddress>,

    #[serde(default, with = "crate::datetime")]
    pub password_last_updated: Option<NaiveDateTime>,
    pub password_must_change: Option<bool>,

    pub phone_mobile: Option<String>,
    pub phone_work: Option<String>,
    #[serde(rename = "ProfileImageS3Url")]
    pub profile_image_s3_url: Option<String>,
    pub title: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "IPAddress")]
    pub ip_address: Option<String>,
    pub referer: Option<String>,
    pub user_agent: Option<String>,

    #[serde(default, with = "crate::datetime")]
    pub last_login_date_time: Option<NaiveDateTime>,
    #[serde(rename = "OAuthGoogleProfileId")]
    pub oauth_google_profile_id: Option<String>,

    /// Memberships of this person in accounts.
    pub person_account: Option<Vec<PersonAccount>>,

    #[serde(default, with = "crate::datetime")]
    pub email_bounce_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub email_spam_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub email_unsubscribe_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub email_last_delivered_date_time: Option<NaiveDateTime>,

    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

impl Person {
    /// A person reference carrying only an email, as used when adding
    /// someone to an account or list.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// A person reference carrying only a `Uid`.
    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Default::default()
        }
    }

    /// Full name if Outseta computed one, otherwise first and last name.
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return full.to_string();
        }
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Set a temporary password that must be changed on next login.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client, request))]
    pub async fn set_temporary_password(
        client: &OutsetaClient,
        id: &str,
        request: &TemporaryPasswordRequest,
    ) -> Result<()> {
        let person = entity_path(PEOPLE, id, "Person")?;
        let path = format!("{person}/setTemporaryPassword");
        client.put(&path, request).await?;
        Ok(())
    }
}

/// Membership linking a [`Person`] to an [`Account`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonAccount {
    pub uid: Option<String>,
    pub person: Option<Box<Person>>,
    pub account: Option<Box<Account>>,
    pub is_primary: Option<bool>,
    pub receive_invoices: Option<bool>,
    pub activity_event_data: Option<serde_json::Value>,

    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

impl PersonAccount {
    /// Membership for `person`, primary or not.
    pub fn for_person(person: Person, is_primary: bool) -> Self {
        Self {
            person: Some(Box::new(person)),
            is_primary: Some(is_primary),
            ..Default::default()
        }
    }
}

/// Postal address of a person or account.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MailingAddress {
    pub uid: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub geo_location: Option<serde_json::Value>,
    pub activity_event_data: Option<serde_json::Value>,

    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Body of `PUT crm/people/{id}/setTemporaryPassword`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporaryPasswordRequest {
    #[serde(rename = "temporaryPassword")]
    pub temporary_password: String,
}

impl TemporaryPasswordRequest {
    /// Body setting `temporary_password`.
    pub fn new(temporary_password: impl Into<String>) -> Self {
        Self {
            temporary_password: temporary_password.into(),
        }
    }
}

#[async_trait]
impl Get for Person {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(PEOPLE, &id, "Person")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

/// People are listed by page only; Outseta ignores ordering here.
#[async_trait]
impl List for Person {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, PEOPLE, query, page, count).await
    }
}

#[async_trait]
impl Create for Person {
    type Params = Person;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &OutsetaClient, params: Person) -> Result<Self> {
        let response = client.post(PEOPLE, &params).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl Update for Person {
    type Id = String;
    type Params = Person;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &OutsetaClient, id: String, params: Person) -> Result<Self> {
        let path = entity_path(PEOPLE, &id, "Person")?;
        let response = client.put(&path, &params).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl Delete for Person {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &OutsetaClient, id: String) -> Result<()> {
        let path = entity_path(PEOPLE, &id, "Person")?;
        client.delete(&path).await?;
        Ok(())
    }
}
