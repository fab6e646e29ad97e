//! Email lists and their subscribers.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{entity_path, Person};
use crate::client::OutsetaClient;
use crate::error::Result;
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::{Get, List};

const EMAIL_LISTS: &str = "email/lists";

/// A marketing email list.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailList {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub welcome_subject: Option<String>,
    pub welcome_body: Option<String>,
    pub welcome_from_name: Option<String>,
    pub welcome_from_email: Option<String>,
    pub email_list_person: Option<Vec<Person>>,
    pub count_subscriptions_active: Option<i32>,
    pub count_subscriptions_bounce: Option<i32>,
    pub count_subscriptions_spam: Option<i32>,
    pub count_subscriptions_unsubscribed: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// A person's subscription to an [`EmailList`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketingSubscription {
    pub uid: Option<String>,
    pub person: Option<Person>,
    pub email_list: Option<Box<EmailList>>,
    pub email_list_subscriber_status: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub subscribed_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub confirmed_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub unsubscribed_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub cleaned_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub welcome_email_deliver_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub welcome_email_open_date_time: Option<NaiveDateTime>,
    pub unsubscribe_reason: Option<String>,
    pub unsubscribe_reason_other: Option<String>,
    pub send_welcome_email: Option<bool>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Query for listing the subscribers of one email list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscriberListQuery {
    #[serde(skip)]
    pub email_list_id: String,

    #[serde(flatten)]
    pub options: ListOptions,
}

impl SubscriberListQuery {
    /// Subscribers of `email_list_id`, with default ordering.
    pub fn for_list(email_list_id: impl Into<String>) -> Self {
        Self {
            email_list_id: email_list_id.into(),
            options: ListOptions::default(),
        }
    }
}

fn subscriptions_path(list_id: &str) -> Result<String> {
    Ok(format!(
        "{}/subscriptions",
        entity_path(EMAIL_LISTS, list_id, "Email list")?
    ))
}

impl MarketingSubscription {
    /// Subscription of `person` with an optional welcome email.
    pub fn new(person: Person, send_welcome_email: bool) -> Self {
        Self {
            person: Some(person),
            send_welcome_email: Some(send_welcome_email),
            ..Default::default()
        }
    }

    /// Subscribe a person to the list `list_id`.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank list ID or if the request fails.
    #[tracing::instrument(skip(client, subscription))]
    pub async fn subscribe(
        client: &OutsetaClient,
        list_id: &str,
        subscription: &MarketingSubscription,
    ) -> Result<MarketingSubscription> {
        let path = subscriptions_path(list_id)?;
        let response = client.post(&path, subscription).await?;
        OutsetaClient::read_json(response).await
    }

    /// Remove subscriber `subscriber_id` from the list `list_id`.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank list or subscriber ID, or if the request
    /// fails.
    #[tracing::instrument(skip(client))]
    pub async fn unsubscribe(
        client: &OutsetaClient,
        list_id: &str,
        subscriber_id: &str,
    ) -> Result<()> {
        let path = entity_path(&subscriptions_path(list_id)?, subscriber_id, "Subscriber")?;
        client.delete(&path).await?;
        Ok(())
    }
}

#[async_trait]
impl Get for EmailList {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(EMAIL_LISTS, &id, "Email list")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for EmailList {
    type Query = ListOptions;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, EMAIL_LISTS, query, page, count).await
    }
}

#[async_trait]
impl List for MarketingSubscription {
    type Query = SubscriberListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let path = subscriptions_path(&query.email_list_id)?;
        fetch_page(client, &path, query, page, count).await
    }
}
