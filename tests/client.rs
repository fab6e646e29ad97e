//! Transport-level behaviour: configuration, headers, error mapping,
//! pagination and token-based access.

use std::time::Duration;

use outseta::{
    get_auth_token, Get, List, OutsetaClient, OutsetaError, Person, Profile, UpdatePasswordRequest,
};
use reqwest::header::{HeaderMap, HeaderValue};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "Outseta test-key:test-secret";

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_builder_requires_credentials() {
    let err = OutsetaClient::builder("https://acme.outseta.com/api/v1")
        .build()
        .unwrap_err();
    assert!(matches!(err, OutsetaError::ClientBuild(_)));
}

#[test]
fn test_builder_rejects_blank_values() {
    let err = OutsetaClient::builder("https://acme.outseta.com/api/v1")
        .api_key("  ")
        .build()
        .unwrap_err();
    assert!(matches!(err, OutsetaError::ClientBuild(ref m) if m.contains("api key")));

    let err = OutsetaClient::builder("https://acme.outseta.com/api/v1")
        .access_key("")
        .build()
        .unwrap_err();
    assert!(matches!(err, OutsetaError::ClientBuild(ref m) if m.contains("access key")));

    let err = OutsetaClient::builder("").api_key(KEY).build().unwrap_err();
    assert!(matches!(err, OutsetaError::ClientBuild(ref m) if m.contains("base url")));
}

#[test]
fn test_builder_accepts_explicit_authorization_header() {
    let client = OutsetaClient::builder("https://acme.outseta.com/api/v1")
        .header("Authorization", KEY)
        .timeout(Duration::from_secs(5))
        .build();
    assert_ok!(client);
}

#[test]
fn test_invalid_header_is_reported() {
    let err = OutsetaClient::builder("https://acme.outseta.com/api/v1")
        .api_key(KEY)
        .header("X-Bad", "line\nbreak")
        .build()
        .unwrap_err();
    assert!(matches!(err, OutsetaError::InvalidHeader(ref name) if name == "X-Bad"));
}

#[test]
fn test_debug_hides_credentials() {
    let builder = OutsetaClient::builder("https://acme.outseta.com/api/v1").api_key(KEY);
    assert!(!format!("{builder:?}").contains("test-secret"));

    let client = builder.build().unwrap();
    assert!(!format!("{client:?}").contains("test-secret"));
}

#[tokio::test]
async fn test_requests_are_relative_to_base_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/crm/people/p1"))
        .and(header("Authorization", "Bearer user-token"))
        .and(header("X-Tenant", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Uid": "p1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OutsetaClient::builder(format!("{}/api/v1", mock_server.uri()))
        .access_key("user-token")
        .headers([("X-Tenant", "acme")])
        .build()
        .unwrap();

    assert_ok!(Person::get(&client, "p1".to_string()).await);
}

#[tokio::test]
async fn test_base_url_override_replaces_initial_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crm/people/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Uid": "p1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OutsetaClient::builder("https://unused.outseta.com/api/v1")
        .api_key(KEY)
        .base_url(mock_server.uri())
        .build()
        .unwrap();

    let expected = format!("{}/", mock_server.uri());
    assert_eq!(client.base_url().as_str(), expected);
    assert_ok!(Person::get(&client, "p1".to_string()).await);
}

#[tokio::test]
async fn test_injected_http_client_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crm/people/p1"))
        .and(header("X-Injected", "yes"))
        .and(header("Authorization", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Uid": "p1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut defaults = HeaderMap::new();
    defaults.insert("X-Injected", HeaderValue::from_static("yes"));
    let http = reqwest::Client::builder()
        .default_headers(defaults)
        .build()
        .unwrap();

    let client = OutsetaClient::builder(mock_server.uri())
        .api_key(KEY)
        .http_client(http)
        .build()
        .unwrap();

    assert_ok!(Person::get(&client, "p1".to_string()).await);
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crm/people/p1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&mock_server)
        .await;

    let client = OutsetaClient::new(&mock_server.uri(), KEY).unwrap();
    let err = assert_err!(Person::get(&client, "p1".to_string()).await);

    assert!(matches!(
        err,
        OutsetaError::RateLimited {
            retry_after_secs: Some(30)
        }
    ));
    assert_eq!(err.status_code(), Some(429));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crm/people/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = OutsetaClient::new(&mock_server.uri(), KEY).unwrap();
    let err = assert_err!(Person::get(&client, "p1".to_string()).await);
    assert!(matches!(err, OutsetaError::ParseError(_)));
}

#[tokio::test]
async fn test_lowercase_error_message_is_extracted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crm/people/p1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({"message": "Forbidden"})),
        )
        .mount(&mock_server)
        .await;

    let client = OutsetaClient::new(&mock_server.uri(), KEY).unwrap();
    let err = assert_err!(Person::get(&client, "p1".to_string()).await);
    assert_eq!(err.to_string(), "Outseta API error: Forbidden");
    assert!(!err.is_not_found());
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_list_all_walks_every_page() {
    let mock_server = MockServer::start().await;

    for (offset, uids) in [(0, vec!["p1", "p2"]), (1, vec!["p3"])] {
        let items: Vec<_> = uids
            .iter()
            .map(|uid| serde_json::json!({"Uid": uid}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/crm/people"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "metadata": {"limit": 25, "offset": offset, "total": 27},
                "items": items
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = OutsetaClient::new(&mock_server.uri(), KEY).unwrap();
    let people = Person::list_all(&client, &()).await.unwrap();

    let uids: Vec<_> = people.iter().filter_map(|p| p.uid.as_deref()).collect();
    assert_eq!(uids, ["p1", "p2", "p3"]);
}

#[tokio::test]
async fn test_list_all_stops_on_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crm/people"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": {"limit": 25, "offset": 0, "total": 100},
            "items": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OutsetaClient::new(&mock_server.uri(), KEY).unwrap();
    let people = Person::list_all(&client, &()).await.unwrap();
    assert!(people.is_empty());
}

#[tokio::test]
async fn test_zero_page_size_is_rejected() {
    let mock_server = MockServer::start().await;
    let client = OutsetaClient::new(&mock_server.uri(), KEY).unwrap();

    let err = assert_err!(Person::list_page(&client, &(), 0, 0).await);
    match err {
        OutsetaError::InvalidPage(msg) => assert_eq!(
            msg,
            "Page size must be greater than 0 and less than or equal to 25"
        ),
        other => panic!("expected InvalidPage, got {other:?}"),
    }
}

// ============================================================================
// Tokens and profile
// ============================================================================

#[tokio::test]
async fn test_token_then_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tokens"))
        .and(body_json(serde_json::json!({
            "username": "ada@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "jwt-abc",
            "token_type": "bearer",
            "expires_in": 86400
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("Authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Uid": "p1",
            "Email": "ada@example.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/profile/password"))
        .and(body_json(serde_json::json!({
            "ExistingPassword": "hunter2",
            "NewPassword": "correct-horse"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server_client = OutsetaClient::new(&mock_server.uri(), KEY).unwrap();
    let token = get_auth_token(&server_client, "ada@example.com", "hunter2")
        .await
        .unwrap();

    let user_client = OutsetaClient::builder(mock_server.uri())
        .access_key(token.access_token)
        .build()
        .unwrap();
    let me = Profile::get(&user_client).await.unwrap();
    assert_eq!(me.email.as_deref(), Some("ada@example.com"));

    let request = UpdatePasswordRequest {
        existing_password: "hunter2".to_string(),
        new_password: "correct-horse".to_string(),
    };
    assert_ok!(Profile::update_password(&user_client, &request).await);
}

#[tokio::test]
async fn test_token_requires_credentials() {
    let mock_server = MockServer::start().await;
    let client = OutsetaClient::new(&mock_server.uri(), KEY).unwrap();

    let err = assert_err!(get_auth_token(&client, "", "pw").await);
    assert!(matches!(err, OutsetaError::InvalidArgument(ref m) if m.starts_with("Username")));

    let err = assert_err!(get_auth_token(&client, "ada@example.com", " ").await);
    assert!(matches!(err, OutsetaError::InvalidArgument(ref m) if m.starts_with("Password")));
}

#[tokio::test]
async fn test_profile_update_is_partial() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/profile"))
        .and(body_json(serde_json::json!({"Title": "CTO"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Uid": "p1",
            "Title": "CTO"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OutsetaClient::builder(mock_server.uri())
        .access_key("jwt-abc")
        .build()
        .unwrap();
    let update = Person {
        title: Some("CTO".to_string()),
        ..Default::default()
    };
    let me = Profile::update(&client, &update).await.unwrap();
    assert_eq!(me.title.as_deref(), Some("CTO"));
}
