//! Access tokens for acting as a person.

use serde::{Deserialize, Serialize};

use crate::client::OutsetaClient;
use crate::error::{require_id, Result};

/// Token issued by `POST tokens`.
///
/// Pass `access_token` to [`ClientBuilder::access_key`](crate::ClientBuilder::access_key)
/// to call endpoints on behalf of the person, such as [`Profile`](crate::Profile).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Exchange a person's username and password for an access token.
///
/// # Errors
///
/// Returns [`OutsetaError::InvalidArgument`](crate::OutsetaError::InvalidArgument)
/// for a blank username or password, or an API error if the credentials
/// are rejected.
#[tracing::instrument(skip(client, password))]
pub async fn get_auth_token(
    client: &OutsetaClient,
    username: &str,
    password: &str,
) -> Result<AuthToken> {
    require_id(username, "Username")?;
    require_id(password, "Password")?;

    let response = client
        .post("tokens", &TokenRequest { username, password })
        .await?;
    OutsetaClient::read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_token() {
        let json = r#"{
            "access_token": "eyJhbGciOi",
            "token_type": "bearer",
            "expires_in": 86400,
            "scope": "ignored"
        }"#;

        let token: AuthToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "eyJhbGciOi");
        assert_eq!(token.token_type.as_deref(), Some("bearer"));
        assert_eq!(token.expires_in, Some(86400));
    }

    #[test]
    fn test_token_request_uses_lowercase_keys() {
        let body = serde_json::to_value(TokenRequest {
            username: "ada@example.com",
            password: "hunter2",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"username": "ada@example.com", "password": "hunter2"})
        );
    }
}
