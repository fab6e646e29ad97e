//! Subscriptions and subscription add-ons.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{entity_path, Account, AddOn, Invoice, Plan};
use crate::client::OutsetaClient;
use crate::constants::BillingRenewalTerm;
use crate::datetime::DATE_FORMAT;
use crate::error::Result;
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::{Get, List};

const SUBSCRIPTIONS: &str = "billing/subscriptions";

/// An account's subscription to a plan.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subscription {
    pub uid: Option<String>,
    /// Raw renewal term code; see [`Subscription::renewal_term`].
    pub billing_renewal_term: Option<i32>,
    pub account: Option<Box<Account>>,
    pub plan: Option<Box<Plan>>,
    pub quantity: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub renewal_date: Option<NaiveDateTime>,
    pub new_required_quantity: Option<i32>,
    pub is_plan_upgrade_required: Option<bool>,
    pub plan_upgrade_required_message: Option<String>,
    pub subscription_add_ons: Option<Vec<SubscriptionAddOn>>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// An add-on attached to a subscription.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubscriptionAddOn {
    pub uid: Option<String>,
    pub billing_renewal_term: Option<i32>,
    pub subscription: Option<Box<Subscription>>,
    pub add_on: Option<Box<AddOn>>,
    pub quantity: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub renewal_date: Option<NaiveDateTime>,
    pub new_required_quantity: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Body for creating a subscription, previewing a change, or changing one.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateOrChangeSubscriptionRequest {
    pub plan: Option<Plan>,
    pub billing_renewal_term: Option<BillingRenewalTerm>,
    pub subscription_add_ons: Option<Vec<SubscriptionAddOn>>,
    pub account: Option<Account>,
}

impl CreateOrChangeSubscriptionRequest {
    /// Subscribe `account_uid` to `plan_uid` with the given term.
    pub fn new(
        account_uid: impl Into<String>,
        plan_uid: impl Into<String>,
        term: BillingRenewalTerm,
    ) -> Self {
        Self {
            plan: Some(Plan::with_uid(plan_uid)),
            billing_renewal_term: Some(term),
            subscription_add_ons: None,
            account: Some(Account {
                uid: Some(account_uid.into()),
                ..Default::default()
            }),
        }
    }
}

#[derive(Serialize)]
struct AsOf {
    #[serde(rename = "asOf", skip_serializing_if = "Option::is_none")]
    as_of: Option<String>,
}

impl Subscription {
    /// Typed renewal term, or `None` for a missing or unknown code.
    pub fn renewal_term(&self) -> Option<BillingRenewalTerm> {
        self.billing_renewal_term
            .and_then(|code| BillingRenewalTerm::try_from(code).ok())
    }

    /// Price a new or changed subscription without applying it.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the request or it fails.
    #[tracing::instrument(skip(client, request))]
    pub async fn compute_charge_summary(
        client: &OutsetaClient,
        as_of: Option<NaiveDate>,
        request: &CreateOrChangeSubscriptionRequest,
    ) -> Result<Invoice> {
        let query = AsOf {
            as_of: as_of.map(|d| d.format(DATE_FORMAT).to_string()),
        };
        let path = format!("{SUBSCRIPTIONS}/compute-charge-summary");
        let response = client.post_with_query(&path, &query, request).await?;
        OutsetaClient::read_json(response).await
    }

    /// Add the first subscription to an account that has none.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the request or it fails.
    #[tracing::instrument(skip(client, request))]
    pub async fn add_first_time(
        client: &OutsetaClient,
        request: &CreateOrChangeSubscriptionRequest,
    ) -> Result<Subscription> {
        let path = format!("{SUBSCRIPTIONS}/firsttimesubscription");
        let response = client.put(&path, request).await?;
        OutsetaClient::read_json(response).await
    }

    /// Invoice that a plan change would produce.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client, request))]
    pub async fn change_preview(
        client: &OutsetaClient,
        id: &str,
        request: &CreateOrChangeSubscriptionRequest,
    ) -> Result<Invoice> {
        let path = format!(
            "{}/changesubscriptionpreview",
            entity_path(SUBSCRIPTIONS, id, "Subscription")?
        );
        let response = client.put(&path, request).await?;
        OutsetaClient::read_json(response).await
    }

    /// Move a subscription to another plan or term.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client, request))]
    pub async fn change(
        client: &OutsetaClient,
        id: &str,
        request: &CreateOrChangeSubscriptionRequest,
    ) -> Result<Subscription> {
        let path = format!(
            "{}/changesubscription",
            entity_path(SUBSCRIPTIONS, id, "Subscription")?
        );
        let response = client.put(&path, request).await?;
        OutsetaClient::read_json(response).await
    }

    /// Flag that the subscription must be upgraded, with the message shown
    /// to the customer in `PlanUpgradeRequiredMessage`.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank ID or if the request fails.
    #[tracing::instrument(skip(client, subscription))]
    pub async fn set_upgrade_required(
        client: &OutsetaClient,
        id: &str,
        subscription: &Subscription,
    ) -> Result<Subscription> {
        let path = format!(
            "{}/setsubscriptionupgraderequired",
            entity_path(SUBSCRIPTIONS, id, "Subscription")?
        );
        let response = client.put(&path, subscription).await?;
        OutsetaClient::read_json(response).await
    }

    /// Attach an add-on to the subscription referenced inside `add_on`.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the add-on or the request fails.
    #[tracing::instrument(skip(client, add_on))]
    pub async fn add_add_on(
        client: &OutsetaClient,
        add_on: &SubscriptionAddOn,
    ) -> Result<Subscription> {
        let response = client.post("billing/subscriptionaddons", add_on).await?;
        OutsetaClient::read_json(response).await
    }

    /// Apply a discount coupon to the subscription.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank subscription or discount ID, or if the
    /// request fails.
    #[tracing::instrument(skip(client))]
    pub async fn add_discount(client: &OutsetaClient, id: &str, discount_id: &str) -> Result<()> {
        let subscription = entity_path(SUBSCRIPTIONS, id, "Subscription")?;
        let discounts = format!("{subscription}/discounts");
        let path = entity_path(&discounts, discount_id, "Discount")?;
        client.post_empty(&path).await?;
        Ok(())
    }
}

#[async_trait]
impl Get for Subscription {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(SUBSCRIPTIONS, &id, "Subscription")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for Subscription {
    type Query = ListOptions;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, SUBSCRIPTIONS, query, page, count).await
    }
}
