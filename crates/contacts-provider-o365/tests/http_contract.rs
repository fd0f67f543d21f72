//! Contract Test: Office 365 listing over HTTP
//!
//! Runs the source and a full ContactFetcher against a mock server.
//!
//! Constraints verified:
//! - the credential is sent as basic auth on every request
//! - failure statuses are reported before the body is parsed
//! - malformed bodies surface as Parse / Schema errors
//! - repeated fetches de-duplicate by `Id`

use contacts_core::{ContactFetcher, ContactSource, Credential, Error};
use contacts_provider_o365::O365ContactSource;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTACTS_PATH: &str = "/api/v1.0/me/contacts";

/// Basic auth header for me@example.com / hunter2
const BASIC_AUTH: &str = "Basic bWVAZXhhbXBsZS5jb206aHVudGVyMg==";

fn source_for(server: &MockServer) -> O365ContactSource {
    O365ContactSource::with_endpoint(
        format!("{}{}", server.uri(), CONTACTS_PATH),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn fetcher_for(server: &MockServer) -> ContactFetcher {
    ContactFetcher::new("me@example.com", "hunter2", Box::new(source_for(server)))
}

fn ok_json(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn empty_listing_returns_true_and_no_contacts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTACTS_PATH))
        .respond_with(ok_json(json!({ "value": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut fetcher = fetcher_for(&server);
    assert!(fetcher.fetch().await.unwrap());
    assert!(fetcher.is_empty());
}

#[tokio::test]
async fn credential_is_sent_as_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTACTS_PATH))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ok_json(json!({
            "value": [{ "Id": "1", "DisplayName": "Alice" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut fetcher = fetcher_for(&server);
    fetcher.fetch().await.expect("request carries the expected credential");

    assert_eq!(fetcher.len(), 1);
    assert_eq!(fetcher.contacts()[0].id(), "1");
}

#[tokio::test]
async fn second_fetch_skips_known_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTACTS_PATH))
        .respond_with(ok_json(json!({
            "value": [{ "Id": "1", "DisplayName": "Alice" }]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CONTACTS_PATH))
        .respond_with(ok_json(json!({
            "value": [
                { "Id": "1", "DisplayName": "Alice" },
                { "Id": "2", "DisplayName": "Bob" }
            ]
        })))
        .mount(&server)
        .await;

    let mut fetcher = fetcher_for(&server);
    fetcher.fetch().await.unwrap();
    fetcher.fetch().await.unwrap();

    let ids: Vec<&str> = fetcher.contacts().iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn invalid_json_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTACTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let mut fetcher = fetcher_for(&server);
    let err = fetcher.fetch().await.unwrap_err();

    assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
    assert!(fetcher.is_empty());
}

#[tokio::test]
async fn unauthorized_fails_before_parsing_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONTACTS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "value": [{ "Id": "1", "DisplayName": "Alice" }]
        })))
        .mount(&server)
        .await;

    let mut fetcher = fetcher_for(&server);
    let err = fetcher.fetch().await.unwrap_err();

    assert!(err.is_auth(), "got {:?}", err);
    assert!(fetcher.is_empty());
}

#[tokio::test]
async fn forbidden_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let source = source_for(&server);
    let err = source
        .list_contacts(&Credential::new("me@example.com", "hunter2"))
        .await
        .unwrap_err();

    assert!(err.is_auth());
}

#[tokio::test]
async fn error_messages_never_contain_secret() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list_contacts(&Credential::new("me@example.com", "hunter2"))
        .await
        .unwrap_err();

    assert!(!err.to_string().contains("hunter2"));
}

#[tokio::test]
async fn server_error_is_http_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list_contacts(&Credential::new("me@example.com", "hunter2"))
        .await
        .unwrap_err();

    match err {
        Error::Http(message) => {
            assert!(message.contains("503"));
            assert!(message.contains("maintenance"));
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_value_is_schema_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_json(json!({ "error": "nope" })))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list_contacts(&Credential::new("me@example.com", "hunter2"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Schema(_)), "got {:?}", err);
}

#[tokio::test]
async fn non_array_value_is_schema_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_json(json!({ "value": { "Id": "1" } })))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .list_contacts(&Credential::new("me@example.com", "hunter2"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Schema(_)), "got {:?}", err);
}

#[tokio::test]
async fn element_without_id_keeps_earlier_contacts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_json(json!({
            "value": [
                { "Id": "1", "DisplayName": "Alice" },
                { "DisplayName": "Nobody" },
                { "Id": "3", "DisplayName": "Carol" }
            ]
        })))
        .mount(&server)
        .await;

    let mut fetcher = fetcher_for(&server);
    let err = fetcher.fetch().await.unwrap_err();

    assert!(matches!(err, Error::Schema(_)));
    assert_eq!(fetcher.len(), 1);
    assert!(fetcher.contains("1"));
}

#[tokio::test]
async fn extra_fields_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_json(json!({
            "@odata.nextLink": "https://outlook.office365.com/api/v1.0/me/contacts?$skip=10",
            "value": [{
                "Id": "AAMk1",
                "DisplayName": "Alice Liddell",
                "GivenName": "Alice",
                "Surname": "Liddell",
                "EmailAddresses": [{ "Name": "Alice", "Address": "alice@example.com" }],
                "CompanyName": "Wonderland"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut fetcher = fetcher_for(&server);
    fetcher.fetch().await.unwrap();

    let alice = fetcher.get("AAMk1").unwrap();
    assert_eq!(alice.given_name(), Some("Alice"));
    assert_eq!(alice.surname(), Some("Liddell"));
    assert_eq!(alice.email_addresses(), vec!["alice@example.com"]);
    assert_eq!(alice.json()["CompanyName"], "Wonderland");
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    // Reserve a free port, then release it so nothing listens there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let source = O365ContactSource::with_endpoint(
        format!("http://127.0.0.1:{}/contacts", port),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = source
        .list_contacts(&Credential::new("me@example.com", "hunter2"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn configured_timeout_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok_json(json!({ "value": [] })).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let source = O365ContactSource::with_endpoint(
        format!("{}{}", server.uri(), CONTACTS_PATH),
        Duration::from_millis(200),
    )
    .unwrap();

    let err = source
        .list_contacts(&Credential::new("me@example.com", "hunter2"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
}
