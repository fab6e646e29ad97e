//! Deal model and trait implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{entity_path, Person, PersonAccount};
use crate::client::OutsetaClient;
use crate::error::Result;
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::{Create, Delete, Get, List, Update};

const DEALS: &str = "crm/deals";

/// A sales opportunity tracked in a deal pipeline.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deal {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub deal_pipeline_stage: Option<DealPipelineStage>,
    pub amount: Option<f64>,
    pub assigned_to_person_client_identifier: Option<String>,
    pub account: Option<PersonAccount>,
    pub deal_people: Option<Vec<DealPerson>>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

/// Reference to a pipeline stage by `Uid`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DealPipelineStage {
    pub uid: Option<String>,
    pub name: Option<String>,
}

impl DealPipelineStage {
    /// Reference an existing pipeline stage by Uid.
    pub fn with_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            name: None,
        }
    }
}

/// A person attached to a deal.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DealPerson {
    pub person: Option<Person>,
}

#[async_trait]
impl Get for Deal {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &OutsetaClient, id: String) -> Result<Self> {
        let path = entity_path(DEALS, &id, "Deal")?;
        let response = client.get(&path).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl List for Deal {
    type Query = ListOptions;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, DEALS, query, page, count).await
    }
}

#[async_trait]
impl Create for Deal {
    type Params = Deal;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &OutsetaClient, params: Deal) -> Result<Self> {
        let response = client.post(DEALS, &params).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl Update for Deal {
    type Id = String;
    type Params = Deal;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &OutsetaClient, id: String, params: Deal) -> Result<Self> {
        let path = entity_path(DEALS, &id, "Deal")?;
        let response = client.put(&path, &params).await?;
        OutsetaClient::read_json(response).await
    }
}

#[async_trait]
impl Delete for Deal {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &OutsetaClient, id: String) -> Result<()> {
        let path = entity_path(DEALS, &id, "Deal")?;
        client.delete(&path).await?;
        Ok(())
    }
}
