//! Activity feed entries.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::OutsetaClient;
use crate::constants::{ActivityType, EntityType};
use crate::error::Result;
use crate::pagination::{fetch_page, ListOptions, Page};
use crate::traits::List;

const ACTIVITIES: &str = "activities";

/// An entry in the activity feed of an account, person or deal.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Activity {
    pub uid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub activity_data: Option<String>,
    #[serde(default, with = "crate::datetime")]
    pub activity_date_time: Option<NaiveDateTime>,
    pub activity_type: Option<i32>,
    pub entity_type: Option<i32>,
    pub entity_uid: Option<String>,
    #[serde(default, with = "crate::datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime")]
    pub updated: Option<NaiveDateTime>,
}

impl Activity {
    /// A custom activity to record against `entity_uid`.
    pub fn custom(
        entity_type: EntityType,
        entity_uid: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            entity_type: Some(entity_type.value()),
            entity_uid: Some(entity_uid.into()),
            ..Default::default()
        }
    }

    /// Typed activity kind, or `None` for a missing or unknown code.
    pub fn kind(&self) -> Option<ActivityType> {
        self.activity_type
            .and_then(|code| ActivityType::try_from(code).ok())
    }

    /// Kind of entity the activity is attached to.
    pub fn entity(&self) -> Option<EntityType> {
        self.entity_type
            .and_then(|code| EntityType::try_from(code).ok())
    }

    /// Record a custom activity.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the activity or the request fails.
    #[tracing::instrument(skip(client, activity))]
    pub async fn create_custom(client: &OutsetaClient, activity: &Activity) -> Result<Activity> {
        let response = client
            .post(&format!("{ACTIVITIES}/customactivity"), activity)
            .await?;
        OutsetaClient::read_json(response).await
    }
}

/// Query parameters for listing activities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityListQuery {
    #[serde(rename = "EntityType", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,

    #[serde(rename = "ActivityType", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,

    #[serde(flatten)]
    pub options: ListOptions,
}

#[async_trait]
impl List for Activity {
    type Query = ActivityListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        fetch_page(client, ACTIVITIES, query, page, count).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_activity() {
        let json = r#"{
            "Title": "Logged in",
            "ActivityType": 203,
            "EntityType": 2,
            "EntityUid": "per-1",
            "ActivityDateTime": "2024-04-01T12:00:00Z",
            "Uid": "act-1"
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.kind(), Some(ActivityType::PersonLogin));
        assert_eq!(activity.entity(), Some(EntityType::Person));
        assert!(activity.activity_date_time.is_some());
    }

    #[test]
    fn test_custom_activity_body() {
        let activity = Activity::custom(EntityType::Account, "acc-1", "Onboarded", "Call done");
        let body = serde_json::to_value(&activity).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "Title": "Onboarded",
                "Description": "Call done",
                "EntityType": 1,
                "EntityUid": "acc-1"
            })
        );
    }

    #[test]
    fn test_list_query_uses_codes() {
        let query = ActivityListQuery {
            entity_type: Some(EntityType::Deal),
            activity_type: Some(ActivityType::DealCreated),
            ..Default::default()
        };
        let serialized = serde_qs::to_string(&query).unwrap();
        assert_eq!(serialized, "EntityType=3&ActivityType=300");
    }
}
