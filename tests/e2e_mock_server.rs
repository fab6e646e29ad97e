//! E2E tests using the mock Outseta server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use outseta::mock_server::{Fixtures, MockServer, MockState, DEFAULT_LOGIN};
use outseta::{
    get_auth_token, Account, AccountListQuery, AccountStage, CancelAccountRequest, Create, Deal,
    Delete, Get, List, ListOptions, OutsetaClient, Person, PersonAccount, Profile, Update,
};

const KEY: &str = "Outseta mock-key:mock-secret";

fn client(server: &MockServer) -> OutsetaClient {
    OutsetaClient::new(server.url(), KEY).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let result = reqwest::get(format!("{}/health", url)).await;
    assert!(result.is_err());
}

// =============================================================================
// People Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_person_lifecycle() {
    let server = MockServer::start_empty().await;
    let client = client(&server);

    // Step 1: Create
    let created = Person::create(
        &client,
        Person {
            email: Some("linus@example.com".to_string()),
            first_name: Some("Linus".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to create person");
    let uid = created.uid.clone().expect("server assigns a Uid");

    // Step 2: Partial update keeps the email
    let update = Person {
        last_name: Some("Torvalds".to_string()),
        ..Default::default()
    };
    let updated = Person::update(&client, uid.clone(), update)
        .await
        .expect("Failed to update person");
    assert_eq!(updated.email.as_deref(), Some("linus@example.com"));
    assert_eq!(updated.display_name(), "Linus Torvalds");

    // Step 3: Delete, then the person is gone
    Person::delete(&client, uid.clone())
        .await
        .expect("Failed to delete person");
    let err = Person::get(&client, uid).await.unwrap_err();
    assert!(err.is_not_found());

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_all_people_across_pages() {
    let mut state = MockState::new();
    for i in 0..30 {
        state.insert_person(Person::with_email(format!("user{i:02}@example.com")));
    }
    let server = MockServer::with_state(state).await;

    let people = Person::list_all(&client(&server), &())
        .await
        .expect("Failed to list people");

    assert_eq!(people.len(), 30);

    server.shutdown().await;
}

// =============================================================================
// Account Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_accounts_by_stage() {
    let server = MockServer::start().await;

    let query = AccountListQuery {
        account_stage: Some(AccountStage::PastDue),
        ..Default::default()
    };
    let page = Account::list_page(&client(&server), &query, 0, 25)
        .await
        .expect("Failed to list accounts");

    assert_eq!(page.total, Some(1));
    assert_eq!(page.items[0].name.as_deref(), Some("Initech"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_account_registers_primary_person() {
    let server = MockServer::start_empty().await;
    let client = client(&server);

    let account = Account {
        name: Some("Hooli".to_string()),
        person_account: Some(vec![PersonAccount::for_person(
            Person::with_email("gavin@hooli.test"),
            true,
        )]),
        ..Default::default()
    };
    let created = Account::create_with_new_person(&client, false, &account)
        .await
        .expect("Failed to create account");

    let primary = created
        .primary_contact()
        .and_then(|pa| pa.person.as_deref())
        .and_then(|p| p.uid.clone())
        .expect("primary contact stored with a Uid");

    let person = Person::get(&client, primary)
        .await
        .expect("primary contact exists as a person");
    assert_eq!(person.email.as_deref(), Some("gavin@hooli.test"));

    let memberships = person.person_account.expect("person lists the account");
    let account = memberships[0].account.as_ref().expect("account");
    assert_eq!(account.name.as_deref(), Some("Hooli"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_cancel_and_restore_account_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);
    let uid = "account-acme";

    // Step 1: Cancel
    let request = CancelAccountRequest {
        cancelation_reason: Some("Budget".to_string()),
        ..Default::default()
    };
    Account::cancel(&client, uid, &request)
        .await
        .expect("Failed to cancel");
    let account = Account::get(&client, uid.to_string()).await.unwrap();
    assert_eq!(account.stage(), Some(AccountStage::Cancelling));

    // Step 2: Restore
    Account::remove_cancellation(&client, uid)
        .await
        .expect("Failed to remove cancellation");
    let account = Account::get(&client, uid.to_string()).await.unwrap();
    assert_eq!(account.stage(), Some(AccountStage::Subscribing));

    server.shutdown().await;
}

#[tokio::test]
async fn test_update_and_delete_account() {
    let server = MockServer::start().await;
    let client = client(&server);

    let updated = Account::update(
        &client,
        "account-globex".to_string(),
        Account {
            name: Some("Globex Corporation".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to update account");
    assert_eq!(updated.name.as_deref(), Some("Globex Corporation"));
    assert_eq!(updated.stage(), Some(AccountStage::Trialing));

    Account::delete(&client, "account-globex".to_string())
        .await
        .expect("Failed to delete account");
    let page = Account::list_page(&client, &Default::default(), 0, 25)
        .await
        .unwrap();
    assert_eq!(page.total, Some(2));

    server.shutdown().await;
}

// =============================================================================
// Deal Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_and_get_deal() {
    let server = MockServer::start().await;
    let client = client(&server);

    let page = Deal::list_page(&client, &ListOptions::default(), 0, 25)
        .await
        .expect("Failed to list deals");
    assert_eq!(page.len(), 2);

    let first = &page.items[0];
    let deal = Deal::get(&client, first.uid.clone().unwrap())
        .await
        .expect("Failed to get deal");
    assert_eq!(deal.name, first.name);

    server.shutdown().await;
}

// =============================================================================
// Token and Profile Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_login_then_read_profile() {
    let server = MockServer::start().await;
    let (email, password) = DEFAULT_LOGIN;

    let token = get_auth_token(&client(&server), email, password)
        .await
        .expect("Failed to get token");

    let user_client = OutsetaClient::builder(server.url())
        .access_key(token.access_token)
        .build()
        .unwrap();
    let me = Profile::get(&user_client)
        .await
        .expect("Failed to get profile");

    assert_eq!(me.email.as_deref(), Some(email));
    assert!(me.person_account.is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let server = MockServer::start().await;

    let err = get_auth_token(&client(&server), DEFAULT_LOGIN.0, "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));

    server.shutdown().await;
}

#[tokio::test]
async fn test_required_auth() {
    let state = MockState::new()
        .with_deal(Fixtures::deal("d1", "Deal", 10.0, "stage-1"))
        .with_required_auth(KEY);
    let server = MockServer::with_state(state).await;

    assert!(Deal::get(&client(&server), "d1".to_string()).await.is_ok());

    let other = OutsetaClient::new(server.url(), "Outseta other:key").unwrap();
    let err = Deal::get(&other, "d1".to_string()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    server.shutdown().await;
}

#[tokio::test]
async fn test_required_auth_leaves_bearer_routes_open() {
    let (email, password) = DEFAULT_LOGIN;
    let state = MockState::new()
        .with_person(Fixtures::person("person-ada", email, "Ada", "Lovelace"))
        .with_login(email, password)
        .with_required_auth(KEY);
    let server = MockServer::with_state(state).await;

    let token = get_auth_token(&client(&server), email, password)
        .await
        .expect("login works with the server key");

    let user_client = OutsetaClient::builder(server.url())
        .access_key(token.access_token)
        .build()
        .unwrap();
    let me = Profile::get(&user_client)
        .await
        .expect("bearer token reaches the profile");
    assert_eq!(me.email.as_deref(), Some(email));

    // The bearer token is still no substitute for the server key
    let err = Deal::list_page(&user_client, &ListOptions::default(), 0, 25)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    server.shutdown().await;
}
