//! Payment information updates.

use serde::Serialize;

use super::Account;
use crate::client::OutsetaClient;
use crate::error::Result;

/// Body of `POST billing/paymentinformation`.
///
/// Tokens come from the payment processor's client-side SDK.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdatePaymentInfoRequest {
    pub account: Option<Account>,
    pub customer_token: Option<String>,
    pub name_on_card: Option<String>,
    pub payment_token: Option<String>,
}

/// Replace the payment method on file for an account.
///
/// # Errors
///
/// Returns an error if Outseta rejects the tokens or the request fails.
#[tracing::instrument(skip(client, request))]
pub async fn update_payment_info(
    client: &OutsetaClient,
    request: &UpdatePaymentInfoRequest,
) -> Result<()> {
    client.post("billing/paymentinformation", request).await?;
    Ok(())
}
