//! Billing transactions.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{entity_path, Account, Invoice};
use crate::client::OutsetaClient;
use crate::constants::BillingTransactionType;
use crate::error::Result;
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::List;

const TRANSACTIONS: &str = "billing/transactions";

/// A ledger entry on an account: invoice, payment, credit, refund or chargeback.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    pub uid: Option<String>,
    #[serde(default, with = "crate::datetime")]
    pub transaction_date: Option<NaiveDateTime>,
    pub billing_transaction_type: Option<i32>,
    pub account: Option<Box<Account>>,
    pub invoice: Option<Box<Invoice>>,
    pub amount: Option<f64>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Query for listing an account's transactions.
///
/// The account is part of the path, so it is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionListQuery {
    #[serde(skip)]
    pub account_id: String,

    #[serde(
        rename = "BillingTransactionType",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<BillingTransactionType>,

    #[serde(flatten)]
    pub options: ListOptions,
}

impl TransactionListQuery {
    /// Every transaction of `account_id`, unfiltered.
    pub fn for_account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Default::default()
        }
    }
}

/// Body of `POST billing/transactions/payment`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddInvoicePaymentRequest {
    pub account: Option<Account>,
    pub invoice: Option<Invoice>,
    pub amount: Option<f64>,
}

impl Transaction {
    /// Typed transaction kind, or `None` for a missing or unknown code.
    pub fn kind(&self) -> Option<BillingTransactionType> {
        self.billing_transaction_type
            .and_then(|code| BillingTransactionType::try_from(code).ok())
    }

    /// Record an offline payment against an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the payment or the request fails.
    #[tracing::instrument(skip(client, request))]
    pub async fn add_invoice_payment(
        client: &OutsetaClient,
        request: &AddInvoicePaymentRequest,
    ) -> Result<Transaction> {
        let response = client
            .post(&format!("{TRANSACTIONS}/payment"), request)
            .await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for Transaction {
    type Query = TransactionListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let path = entity_path(TRANSACTIONS, &query.account_id, "Account")?;
        fetch_page(client, &path, query, page, count).await
    }
}
