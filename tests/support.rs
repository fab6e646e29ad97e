//! Request-level tests for support cases.

use outseta::{Case, CaseReply, CaseSource, CaseStatus, Get, OutsetaClient, OutsetaError, Person};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "Outseta test-key:test-secret";

fn client(server: &MockServer) -> OutsetaClient {
    OutsetaClient::new(&server.uri(), KEY).unwrap()
}

#[tokio::test]
async fn test_create_case_with_auto_responder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/support/cases"))
        .and(query_param("sendAutoResponder", "false"))
        .and(body_json(serde_json::json!({
            "FromPerson": {"Email": "ada@example.com"},
            "Subject": "Cannot log in",
            "Body": "Password reset mail never arrives",
            "Source": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Uid": "case-1",
            "Subject": "Cannot log in",
            "Status": 1,
            "Source": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let case = Case {
        from_person: Some(Person::with_email("ada@example.com")),
        subject: Some("Cannot log in".to_string()),
        body: Some("Password reset mail never arrives".to_string()),
        source: Some(CaseSource::Website.value()),
        ..Default::default()
    };
    let created = Case::create(&client(&mock_server), false, &case)
        .await
        .unwrap();

    assert_eq!(created.case_status(), Some(CaseStatus::Open));
    assert_eq!(created.case_source(), Some(CaseSource::Website));
}

#[tokio::test]
async fn test_client_response_is_encoded_in_path() {
    let mock_server = MockServer::start().await;

    let response_path = "/support/cases/case-1/clientresponse/Still%20broken%3F";
    Mock::given(method("POST"))
        .and(path(response_path))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert_ok!(Case::add_client_response(&client, "case-1", "Still broken?").await);

    let err = Case::add_client_response(&client, "case-1", "  ")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OutsetaError::InvalidArgument(ref m) if m == "Comment cannot be null or blank."
    ));
}

#[tokio::test]
async fn test_add_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/support/cases/case-1/replies"))
        .and(body_json(serde_json::json!({
            "AgentName": "Grace",
            "Case": {"Uid": "case-1"},
            "Comment": "Sent a new link"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Uid": "case-1",
            "CaseHistories": [{"AgentName": "Grace", "Comment": "Sent a new link"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = CaseReply {
        agent_name: Some("Grace".to_string()),
        case: Some(Case {
            uid: Some("case-1".to_string()),
            ..Default::default()
        }),
        comment: Some("Sent a new link".to_string()),
    };
    let case = Case::add_reply(&client(&mock_server), "case-1", &reply)
        .await
        .unwrap();

    let history = case.case_histories.unwrap();
    assert_eq!(history[0].agent_name.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn test_get_case_server_error_keeps_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/support/cases/case-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let err = Case::get(&client(&mock_server), "case-1".to_string())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(matches!(
        err,
        OutsetaError::ApiError { ref message, .. } if message == "upstream exploded"
    ));
}
