//! Support cases.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{entity_path, Person};
use crate::client::OutsetaClient;
use crate::constants::{CaseSource, CaseStatus};
use crate::error::{require_id, Result};
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::{Get, List};

const CASES: &str = "support/cases";

/// A support ticket.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Case {
    pub uid: Option<String>,
    #[serde(default, with = "crate::datetime")]
    pub submitted_date_time: Option<NaiveDateTime>,
    pub from_person: Option<Person>,
    pub assigned_to_person_client_identifier: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub user_agent: Option<String>,
    pub status: Option<i32>,
    pub source: Option<i32>,
    pub case_histories: Option<Vec<CaseHistory>>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// One entry in a case's conversation.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CaseHistory {
    pub uid: Option<String>,
    #[serde(default, with = "crate::datetime")]
    pub history_date_time: Option<NaiveDateTime>,
    #[serde(rename = "Case")]
    pub case: Option<Box<Case>>,
    pub agent_name: Option<String>,
    pub comment: Option<String>,
    #[serde(rename = "Type")]
    pub history_type: Option<i32>,
    #[serde(default, with = "crate::datetime")]
    pub seen_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub click_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Body of an agent reply on a case.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CaseReply {
    pub agent_name: Option<String>,
    #[serde(rename = "Case")]
    pub case: Option<Case>,
    pub comment: Option<String>,
}

#[derive(Serialize)]
struct SendAutoResponder {
    #[serde(rename = "sendAutoResponder")]
    send_auto_responder: bool,
}

impl Case {
    /// Typed case status, or `None` for a missing or unknown code.
    pub fn case_status(&self) -> Option<CaseStatus> {
        self.status.and_then(|code| CaseStatus::try_from(code).ok())
    }

    /// Typed origin of the case.
    pub fn case_source(&self) -> Option<CaseSource> {
        self.source.and_then(|code| CaseSource::try_from(code).ok())
    }

    /// Open a new case, optionally sending the configured auto-responder.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the case or the request fails.
    #[tracing::instrument(skip(client, case))]
    pub async fn create(
        client: &OutsetaClient,
        send_auto_responder: bool,
        case: &Case,
    ) -> Result<Case> {
        let query = SendAutoResponder {
            send_auto_responder,
        };
        let response = client.post_with_query(CASES, &query, case).await?;
        OutsetaClient::read_json(response).await
    }

    /// Record a response from the customer. The comment travels in the URL.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank case ID or comment, or if the request
    /// fails.
    #[tracing::instrument(skip(client, comment))]
    pub async fn add_client_response(
        client: &OutsetaClient,
        uid: &str,
        comment: &str,
    ) -> Result<()> {
        let case = entity_path(CASES, uid, "Case")?;
        require_id(comment, "Comment")?;
        let path = format!("{case}/clientresponse/{}", urlencoding::encode(comment));
        client.post_empty(&path).await?;
        Ok(())
    }

    /// Reply to a case as an agent.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank case ID or if the request fails.
    #[tracing::instrument(skip(client, reply))]
    pub async fn add_reply(client: &OutsetaClient, uid: &str, reply: &CaseReply) -> Result<Case> {
        let path = format!("{}/replies", entity_path(CASES, uid, "Case")?);
        let response = client.post(&path, reply).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl Get for Case {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(CASES, &id, "Case")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for Case {
    type Query = ListOptions;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, CASES, query, page, count).await
    }
}
