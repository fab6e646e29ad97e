//! Invoices.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Subscription;
use crate::client::OutsetaClient;
use crate::error::Result;
use crate::traits::Create;

/// An invoice, either issued or computed as a charge preview.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    pub uid: Option<String>,
    #[serde(default, with = "crate::datetime")]
    pub invoice_date: Option<NaiveDateTime>,
    pub number: Option<i32>,
    pub billing_invoice_status: Option<i32>,
    pub subscription: Option<Box<Subscription>>,
    pub amount: Option<f64>,
    pub amount_outstanding: Option<f64>,
    pub invoice_line_items: Option<Vec<InvoiceLineItem>>,
    pub is_user_generated: Option<bool>,
    pub subtotal: Option<f64>,
    pub tax: Option<f64>,
    pub tax_behaviour: Option<String>,
    pub paid: Option<f64>,
    pub invoice_display_items: Option<Vec<InvoiceDisplayItem>>,
    pub total: Option<f64>,
    pub balance: Option<f64>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// One charge on an invoice.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceLineItem {
    pub uid: Option<String>,
    #[serde(default, with = "crate::datetime")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub end_date: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub unit_of_measure: Option<String>,
    pub quantity: Option<i32>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
    pub tax: Option<f64>,
    pub invoice: Option<Box<Invoice>>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Read-only line as rendered on the invoice.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceDisplayItem {
    #[serde(default, with = "crate::datetime")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(rename = "Type")]
    pub item_type: Option<String>,
    pub description: Option<String>,
    pub original_description: Option<String>,
    pub amount: Option<f64>,
    pub tax: Option<f64>,
    pub total: Option<f64>,
    pub quantity: Option<i32>,
    pub units: Option<String>,
    pub quantity_and_units: Option<String>,
    pub line_item_type: Option<i32>,
    pub line_item_entity_uid: Option<String>,
}

#[async_trait]
impl Create for Invoice {
    type Params = Invoice;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &OutsetaClient, params: Invoice) -> Result<Self> {
        let response = client.post("billing/invoices", &params).await?;
        OutsetaClient::read_json(response).await
    }
}
