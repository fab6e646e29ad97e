//! Add-ons and usage reporting.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{entity_path, PlanAddOn, SubscriptionAddOn};
use crate::client::OutsetaClient;
use crate::error::Result;
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::{Get, List};

const ADD_ONS: &str = "billing/addons";

/// Something sold on top of a plan, flat-rate or usage-based.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddOn {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub billing_add_on_type: Option<i32>,
    pub is_quantity_editable: Option<bool>,
    pub minimum_quantity: Option<i32>,
    pub monthly_rate: Option<f64>,
    pub annual_rate: Option<f64>,
    pub setup_fee: Option<f64>,
    pub unit_of_measure: Option<String>,
    pub is_taxable: Option<bool>,
    pub is_billed_during_trial: Option<bool>,
    pub stripe_tax_code_id: Option<String>,
    pub plan_add_ons: Option<Vec<PlanAddOn>>,
    pub content_groups: Option<Vec<serde_json::Value>>,
    pub subscription_count: Option<i32>,
    pub quantity: Option<i32>,
    pub activity_event_data: Option<serde_json::Value>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Body of `POST billing/usage`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddOnUsageRequest {
    #[serde(with = "crate::datetime")]
    pub usage_date: Option<NaiveDateTime>,
    pub amount: Option<i64>,
    pub subscription_add_on: Option<SubscriptionAddOn>,
}

impl AddOnUsageRequest {
    /// Usage of `amount` units against the subscription add-on `uid`.
    pub fn new(subscription_add_on_uid: impl Into<String>, amount: i64, at: NaiveDateTime) -> Self {
        Self {
            usage_date: Some(at),
            amount: Some(amount),
            subscription_add_on: Some(SubscriptionAddOn {
                uid: Some(subscription_add_on_uid.into()),
                ..Default::default()
            }),
        }
    }
}

impl AddOn {
    /// Report usage for a usage-based add-on.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the usage or the request fails.
    #[tracing::instrument(skip(client, usage))]
    pub async fn record_usage(client: &OutsetaClient, usage: &AddOnUsageRequest) -> Result<()> {
        client.post("billing/usage", usage).await?;
        Ok(())
    }
}

#[async_trait]
impl Get for AddOn {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(ADD_ONS, &id, "AddOn")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for AddOn {
    type Query = ListOptions;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, ADD_ONS, query, page, count).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_usage_request_body() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let body = serde_json::to_value(AddOnUsageRequest::new("sao-1", 42, at)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "UsageDate": "2024-05-01T12:30:00",
                "Amount": 42,
                "SubscriptionAddOn": {"Uid": "sao-1"}
            })
        );
    }

    #[test]
    fn test_deserialize_add_on() {
        let json = r#"{"Uid": "ao-1", "Name": "API calls", "BillingAddOnType": 2, "UnitOfMeasure": "call"}"#;
        let add_on: AddOn = serde_json::from_str(json).unwrap();
        assert_eq!(add_on.billing_add_on_type, Some(2));
        assert_eq!(add_on.unit_of_measure.as_deref(), Some("call"));
    }
}
