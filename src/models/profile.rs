//! The person behind the current access token.
//!
//! These endpoints act on whoever the client's `Authorization` header
//! identifies, so the client should be built with
//! [`ClientBuilder::access_key`](crate::ClientBuilder::access_key) using a
//! token from [`get_auth_token`](crate::get_auth_token).

use serde::Serialize;

use super::Person;
use crate::client::OutsetaClient;
use crate::error::Result;

const PROFILE: &str = "profile";

/// Profile operations for the authenticated person.
#[derive(Debug, Clone, Copy, Default)]
pub struct Profile;

/// Body of `PUT profile/password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdatePasswordRequest {
    pub existing_password: String,
    pub new_password: String,
}

impl Profile {
    /// Fetch the authenticated person.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn get(client: &OutsetaClient) -> Result<Person> {
        let response = client.get(PROFILE).await?;
        OutsetaClient::read_json(response).await
    }

    /// Update the authenticated person; unset fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if Outseta rejects the update or the request fails.
    #[tracing::instrument(skip(client, person))]
    pub async fn update(client: &OutsetaClient, person: &Person) -> Result<Person> {
        let response = client.put(PROFILE, person).await?;
        OutsetaClient::read_json(response).await
    }

    /// Change the authenticated person's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing password is wrong or the request
    /// fails.
    #[tracing::instrument(skip(client, request))]
    pub async fn update_password(
        client: &OutsetaClient,
        request: &UpdatePasswordRequest,
    ) -> Result<()> {
        client.put(&format!("{PROFILE}/password"), request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_request_body() {
        let request = UpdatePasswordRequest {
            existing_password: "old".to_string(),
            new_password: "new".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"ExistingPassword": "old", "NewPassword": "new"})
        );
    }
}
