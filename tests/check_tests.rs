//! Integration tests for the license check pipeline
//!
//! Each test stands up a mock query endpoint and drives `check::run` end to
//! end: short-circuit behavior on empty steps, the composite-key diff, the
//! per-license aggregation, and error propagation on query failure.

use serde_json::{json, Value};
use sf_license_check::api::OrgClient;
use sf_license_check::check;
use sf_license_check::config::OrgConnection;
use sf_license_check::error::CliError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/services/data/v43.0/query";

const PERMISSION_SET_SOQL: &str = "SELECT Id, Name, LicenseId \
     FROM PermissionSet \
     WHERE IsOwnedByProfile = false \
     AND LicenseId <> NULL";

fn set_assignment_soql(in_clause: &str) -> String {
    format!(
        "SELECT PermissionSet.LicenseId, AssigneeId \
         FROM PermissionSetAssignment \
         WHERE PermissionSet.LicenseId IN ({in_clause}) \
         ORDER BY PermissionSet.LicenseId, AssigneeId"
    )
}

fn license_assignment_soql(in_clause: &str) -> String {
    format!(
        "SELECT Id, AssigneeId, Assignee.IsActive, PermissionSetLicenseId, \
         PermissionSetLicense.DeveloperName, PermissionSetLicense.MasterLabel, \
         PermissionSetLicense.UsedLicenses, PermissionSetLicense.TotalLicenses \
         FROM PermissionSetLicenseAssign \
         WHERE PermissionSetLicenseId IN ({in_clause}) \
         ORDER BY PermissionSetLicenseId, AssigneeId"
    )
}

fn client(server: &MockServer) -> OrgClient {
    OrgClient::new(
        OrgConnection {
            instance_url: server.uri(),
            access_token: "00D-test-token".to_string(),
        },
        "43.0",
        5,
    )
    .expect("Failed to create client")
}

fn envelope(records: Vec<Value>) -> Value {
    json!({
        "totalSize": records.len(),
        "done": true,
        "records": records,
    })
}

fn permission_set(id: &str, name: &str, license_id: &str) -> Value {
    json!({"Id": id, "Name": name, "LicenseId": license_id})
}

fn set_assignment(license_id: &str, user: &str) -> Value {
    json!({"PermissionSet": {"LicenseId": license_id}, "AssigneeId": user})
}

fn license_assignment(id: &str, license_id: &str, user: &str, active: bool) -> Value {
    json!({
        "Id": id,
        "AssigneeId": user,
        "Assignee": {"IsActive": active},
        "PermissionSetLicenseId": license_id,
        "PermissionSetLicense": {
            "DeveloperName": "Analytics_Dev",
            "MasterLabel": "X",
            "UsedLicenses": 5,
            "TotalLicenses": 10
        }
    })
}

async fn mock_query(server: &MockServer, soql: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("q", soql))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// -------------------------------------------------------------------------
// Short-circuit scenarios
// -------------------------------------------------------------------------

#[tokio::test]
async fn test_no_license_linked_permission_sets_returns_empty() {
    let server = MockServer::start().await;
    mock_query(&server, PERMISSION_SET_SOQL, envelope(vec![])).await;

    let entries = check::run(&client(&server), true).await.unwrap();

    assert!(entries.is_empty());
    // Only the first query should have been issued.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_no_permission_set_license_prefix_returns_empty() {
    let server = MockServer::start().await;
    // LicenseId present but pointing at a UserLicense, not a 0PL record
    mock_query(
        &server,
        PERMISSION_SET_SOQL,
        envelope(vec![permission_set("0PS1", "Basic", "100000000000001")]),
    )
    .await;

    let entries = check::run(&client(&server), true).await.unwrap();

    assert!(entries.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_assignment_queries_return_empty_report() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        PERMISSION_SET_SOQL,
        envelope(vec![permission_set("0PS1", "Analytics", "0PLxxx")]),
    )
    .await;
    mock_query(&server, &set_assignment_soql("'0PLxxx'"), envelope(vec![])).await;
    mock_query(
        &server,
        &license_assignment_soql("'0PLxxx'"),
        envelope(vec![]),
    )
    .await;

    let entries = check::run(&client(&server), true).await.unwrap();

    assert!(entries.is_empty());
    // Empty assignment result sets do not short-circuit; all three queries run.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

// -------------------------------------------------------------------------
// Reconciliation scenarios
// -------------------------------------------------------------------------

#[tokio::test]
async fn test_unbacked_seat_is_reported() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        PERMISSION_SET_SOQL,
        envelope(vec![permission_set("0PS1", "Analytics", "0PLa")]),
    )
    .await;
    mock_query(&server, &set_assignment_soql("'0PLa'"), envelope(vec![])).await;
    mock_query(
        &server,
        &license_assignment_soql("'0PLa'"),
        envelope(vec![license_assignment("0Pa1", "0PLa", "u1", true)]),
    )
    .await;

    let entries = check::run(&client(&server), true).await.unwrap();

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.id, "0PLa");
    assert_eq!(entry.name, "X");
    assert_eq!(entry.used, 5);
    assert_eq!(entry.total, 10);
    assert_eq!(entry.unnecessary_assigned, 1);
    assert_eq!(entry.unnecessary_assigned_to_active_users, 1);
    assert_eq!(entry.unnecessary_assignments, vec!["0Pa1"]);
}

#[tokio::test]
async fn test_backed_seat_is_not_reported() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        PERMISSION_SET_SOQL,
        envelope(vec![permission_set("0PS1", "Analytics", "0PLa")]),
    )
    .await;
    mock_query(
        &server,
        &set_assignment_soql("'0PLa'"),
        envelope(vec![set_assignment("0PLa", "u1")]),
    )
    .await;
    mock_query(
        &server,
        &license_assignment_soql("'0PLa'"),
        envelope(vec![license_assignment("0Pa1", "0PLa", "u1", true)]),
    )
    .await;

    let entries = check::run(&client(&server), true).await.unwrap();

    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_active_and_inactive_orphans_aggregate() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        PERMISSION_SET_SOQL,
        envelope(vec![permission_set("0PS1", "Analytics", "0PLa")]),
    )
    .await;
    mock_query(&server, &set_assignment_soql("'0PLa'"), envelope(vec![])).await;
    mock_query(
        &server,
        &license_assignment_soql("'0PLa'"),
        envelope(vec![
            license_assignment("0Pa1", "0PLa", "u1", true),
            license_assignment("0Pa2", "0PLa", "u2", false),
        ]),
    )
    .await;

    let entries = check::run(&client(&server), true).await.unwrap();

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.unnecessary_assigned, 2);
    assert_eq!(entry.unnecessary_assigned_to_active_users, 1);
    assert_eq!(entry.unnecessary_assignments, vec!["0Pa1"]);
}

#[tokio::test]
async fn test_distinct_license_ids_share_one_in_clause() {
    let server = MockServer::start().await;
    // Two permission sets on the same license plus one on another; the
    // IN-clause carries each license id once, in first-encounter order.
    mock_query(
        &server,
        PERMISSION_SET_SOQL,
        envelope(vec![
            permission_set("0PS1", "Analytics", "0PLa"),
            permission_set("0PS2", "Analytics_Extra", "0PLa"),
            permission_set("0PS3", "Maps", "0PLb"),
        ]),
    )
    .await;
    let in_clause = "'0PLa', '0PLb'";
    mock_query(
        &server,
        &set_assignment_soql(in_clause),
        envelope(vec![set_assignment("0PLb", "u2")]),
    )
    .await;
    mock_query(
        &server,
        &license_assignment_soql(in_clause),
        envelope(vec![
            license_assignment("0Pa1", "0PLa", "u1", true),
            license_assignment("0Pa2", "0PLb", "u2", true),
            license_assignment("0Pa3", "0PLb", "u3", true),
        ]),
    )
    .await;

    let entries = check::run(&client(&server), true).await.unwrap();

    // u2's seat on 0PLb is backed; u1 on 0PLa and u3 on 0PLb are not.
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "0PLa");
    assert_eq!(entries[0].unnecessary_assignments, vec!["0Pa1"]);
    assert_eq!(entries[1].id, "0PLb");
    assert_eq!(entries[1].unnecessary_assignments, vec!["0Pa3"]);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        PERMISSION_SET_SOQL,
        envelope(vec![permission_set("0PS1", "Analytics", "0PLa")]),
    )
    .await;
    mock_query(&server, &set_assignment_soql("'0PLa'"), envelope(vec![])).await;
    mock_query(
        &server,
        &license_assignment_soql("'0PLa'"),
        envelope(vec![
            license_assignment("0Pa1", "0PLa", "u1", true),
            license_assignment("0Pa2", "0PLa", "u2", false),
        ]),
    )
    .await;

    let org_client = client(&server);
    let first = check::run(&org_client, true).await.unwrap();
    let second = check::run(&org_client, true).await.unwrap();

    assert_eq!(first, second);
}

// -------------------------------------------------------------------------
// Failure propagation
// -------------------------------------------------------------------------

#[tokio::test]
async fn test_query_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!([
            {"message": "An unexpected error occurred", "errorCode": "UNKNOWN_EXCEPTION"}
        ])))
        .mount(&server)
        .await;

    let error = check::run(&client(&server), true).await.unwrap_err();

    match error {
        CliError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("UNKNOWN_EXCEPTION"));
        }
        other => panic!("Expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!([
            {"message": "Session expired or invalid", "errorCode": "INVALID_SESSION_ID"}
        ])))
        .mount(&server)
        .await;

    let error = check::run(&client(&server), true).await.unwrap_err();

    assert!(matches!(error, CliError::InvalidSession));
    assert_eq!(error.exit_code(), 2);
}

#[tokio::test]
async fn test_query_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(header("authorization", "Bearer 00D-test-token"))
        .and(query_param("q", PERMISSION_SET_SOQL))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let entries = check::run(&client(&server), true).await.unwrap();
    assert!(entries.is_empty());
}
