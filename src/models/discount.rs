//! Discount coupons.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Plan;
use crate::client::OutsetaClient;
use crate::constants::DiscountDuration;
use crate::error::Result;
use crate::traits::Create;

/// A discount coupon.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Discount {
    pub uid: Option<String>,
    /// Coupon code customers type in.
    pub unique_identifier: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub amount_off: Option<f64>,
    pub percent_off: Option<i32>,
    /// Raw duration code; see [`Discount::duration_kind`].
    pub duration: Option<i32>,
    pub duration_in_months: Option<i32>,
    pub max_redemptions: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub redeem_by: Option<NaiveDateTime>,
    /// Plans the coupon is restricted to.
    pub discount_coupon_plans: Option<Vec<Plan>>,
}

impl Discount {
    /// Decoded [`Discount::duration`], `None` for unknown codes.
    pub fn duration_kind(&self) -> Option<DiscountDuration> {
        self.duration
            .and_then(|code| DiscountDuration::try_from(code).ok())
    }
}

#[async_trait]
impl Create for Discount {
    type Params = Discount;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &OutsetaClient, params: Discount) -> Result<Self> {
        let response = client.post("billing/discountcoupons", &params).await?;
        OutsetaClient::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_discount_body() {
        let discount = Discount {
            unique_identifier: Some("SPRING24".to_string()),
            name: Some("Spring sale".to_string()),
            percent_off: Some(20),
            duration: Some(DiscountDuration::Repeating.value()),
            duration_in_months: Some(3),
            ..Default::default()
        };
        let body = serde_json::to_value(&discount).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "UniqueIdentifier": "SPRING24",
                "Name": "Spring sale",
                "PercentOff": 20,
                "Duration": 3,
                "DurationInMonths": 3
            })
        );
        assert_eq!(discount.duration_kind(), Some(DiscountDuration::Repeating));
    }
}
