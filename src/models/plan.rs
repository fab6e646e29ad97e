//! Plans and plan families.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{entity_path, AddOn};
use crate::client::OutsetaClient;
use crate::error::Result;
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::{Get, List};

const PLANS: &str = "billing/plans";
const PLAN_FAMILIES: &str = "billing/planfamilies";

/// A subscription plan.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Plan {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub plan_family: Option<Box<PlanFamily>>,
    pub account_registration_mode: Option<i32>,
    pub is_quantity_editable: Option<bool>,
    pub minimum_quantity: Option<i32>,
    pub maximum_people: Option<i32>,
    pub monthly_rate: Option<f64>,
    pub annual_rate: Option<f64>,
    pub quarterly_rate: Option<f64>,
    pub one_time_rate: Option<f64>,
    pub setup_fee: Option<f64>,
    pub is_taxable: Option<bool>,
    pub is_active: Option<bool>,
    pub is_per_user: Option<bool>,
    pub require_payment_information: Option<bool>,
    pub trial_period_days: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub trial_until_date: Option<NaiveDateTime>,
    pub expires_after_months: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub expiration_date: Option<NaiveDateTime>,
    pub post_login_path: Option<String>,
    pub stripe_tax_code_id: Option<String>,
    pub unit_of_measure: Option<String>,
    pub plan_add_ons: Option<Vec<PlanAddOn>>,
    pub content_groups: Option<Vec<serde_json::Value>>,
    pub number_of_subscriptions: Option<i32>,
    pub activity_event_data: Option<serde_json::Value>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

impl Plan {
    /// A plan reference carrying only a `Uid`.
    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Default::default()
        }
    }
}

/// A group of related plans shown together on a pricing page.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlanFamily {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
    pub plans: Option<Vec<Plan>>,
    pub activity_event_data: Option<serde_json::Value>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Link between a plan and an add-on offered with it.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlanAddOn {
    pub uid: Option<String>,
    pub plan: Option<Box<Plan>>,
    pub add_on: Option<Box<AddOn>>,
    pub is_user_selectable: Option<bool>,
    pub activity_event_data: Option<serde_json::Value>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

#[async_trait]
impl Get for Plan {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(PLANS, &id, "Plan")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for Plan {
    type Query = ListOptions;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, PLANS, query, page, count).await
    }
}

#[async_trait]
impl Get for PlanFamily {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(PLAN_FAMILIES, &id, "Plan Family")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for PlanFamily {
    type Query = ListOptions;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, PLAN_FAMILIES, query, page, count).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_plan_family_with_plans() {
        let json = r#"{
            "Uid": "fam-1",
            "Name": "Default",
            "IsDefault": true,
            "Plans": [
                {"Uid": "plan-1", "Name": "Basic", "MonthlyRate": 9.0, "TrialPeriodDays": 14},
                {"Uid": "plan-2", "Name": "Pro", "AnnualRate": 290.0, "ContentGroups": []}
            ]
        }"#;
        let family: PlanFamily = serde_json::from_str(json).unwrap();
        let plans = family.plans.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].monthly_rate, Some(9.0));
        assert_eq!(plans[0].trial_period_days, Some(14));
        assert_eq!(plans[1].annual_rate, Some(290.0));
    }

    #[test]
    fn test_plan_reference_body() {
        let body = serde_json::to_value(Plan::with_uid("plan-1")).unwrap();
        assert_eq!(body, serde_json::json!({"Uid": "plan-1"}));
    }
}
