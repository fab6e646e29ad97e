//! Request-level tests for email lists and their subscribers.

use outseta::{
    EmailList, Get, List, MarketingSubscription, OutsetaClient, OutsetaError, Person,
    SubscriberListQuery,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "Outseta test-key:test-secret";

fn client(server: &MockServer) -> OutsetaClient {
    OutsetaClient::new(&server.uri(), KEY).unwrap()
}

#[tokio::test]
async fn test_get_email_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/email/lists/list-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Uid": "list-1",
            "Name": "Newsletter",
            "CountSubscriptionsActive": 1234
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let list = EmailList::get(&client(&mock_server), "list-1".to_string())
        .await
        .unwrap();

    assert_eq!(list.name.as_deref(), Some("Newsletter"));
    assert_eq!(list.count_subscriptions_active, Some(1234));
}

#[tokio::test]
async fn test_subscribe_returns_subscription() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email/lists/list-1/subscriptions"))
        .and(body_json(serde_json::json!({
            "Person": {"Email": "ada@example.com"},
            "SendWelcomeEmail": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Uid": "sub-1",
            "Person": {"Uid": "p1", "Email": "ada@example.com"},
            "SubscribedDate": "2024-02-03T04:05:06Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let subscription = MarketingSubscription::new(Person::with_email("ada@example.com"), true);
    let created = MarketingSubscription::subscribe(&client(&mock_server), "list-1", &subscription)
        .await
        .unwrap();

    assert_eq!(created.uid.as_deref(), Some("sub-1"));
    assert!(created.subscribed_date.is_some());
}

#[tokio::test]
async fn test_unsubscribe_and_blank_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/email/lists/list-1/subscriptions/sub-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert_ok!(MarketingSubscription::unsubscribe(&client, "list-1", "sub-1").await);

    let err = MarketingSubscription::unsubscribe(&client, "list-1", "")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OutsetaError::InvalidArgument(ref m) if m == "Subscriber id cannot be null or blank."
    ));

    let err = MarketingSubscription::unsubscribe(&client, "", "sub-1")
        .await
        .unwrap_err();
    assert!(matches!(err, OutsetaError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_list_subscribers_of_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/email/lists/list-1/subscriptions"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": {"limit": 2, "offset": 0, "total": 3},
            "items": [{"Uid": "s1"}, {"Uid": "s2"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = SubscriberListQuery::for_list("list-1");
    let page = MarketingSubscription::list_page(&client(&mock_server), &query, 0, 2)
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more);
}
