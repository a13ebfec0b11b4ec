#![allow(clippy::unwrap_used)]
// Integration tests for `ReservationClient` using wiremock.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use labres_api::{CreateReservationRequest, Error, ReservationClient, WireId};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ReservationClient) {
    let server = MockServer::start().await;
    let base_url = format!("{}/api", server.uri());
    let client = ReservationClient::from_reqwest(&base_url, reqwest::Client::new()).unwrap();
    (server, client)
}

fn sample_reservation(id: serde_json::Value, time: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": "a@x.edu",
        "name": "Ana",
        "studentId": "S1",
        "laboratory": "Lab 2",
        "reservationTime": time
    })
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_active() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sample_reservation(json!(7), "2024-05-01T14:00:00"),
            sample_reservation(json!("r-8"), "2024-05-02T09:00:00"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let reservations = client.list_active().await.unwrap();

    assert_eq!(reservations.len(), 2);
    assert_eq!(reservations[0].id, WireId::Number(7));
    assert_eq!(reservations[0].student_id, "S1");
    assert_eq!(reservations[0].reservation_time, "2024-05-01T14:00:00");
    assert_eq!(reservations[1].id, WireId::Text("r-8".into()));
}

#[tokio::test]
async fn test_list_active_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_past_sends_date_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/past"))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([sample_reservation(
            json!(1),
            "2024-01-15T10:00:00"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let reservations = client.list_past(start, end).await.unwrap();

    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].laboratory, "Lab 2");
}

#[tokio::test]
async fn test_list_past_forwards_reversed_range() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/past"))
        .and(query_param("startDate", "2024-02-01"))
        .and(query_param("endDate", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert!(client.list_past(start, end).await.unwrap().is_empty());
}

// ── Creation ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_reservation_posts_camel_case_body() {
    let (server, client) = setup().await;

    let request = CreateReservationRequest {
        email: "a@x.edu".into(),
        name: "Ana".into(),
        student_id: "S1".into(),
        laboratory: "Lab 2".into(),
        reservation_time: "2024-05-01T14:00:00".into(),
    };

    Mock::given(method("POST"))
        .and(path("/api/reservations"))
        .and(body_json(json!({
            "email": "a@x.edu",
            "name": "Ana",
            "studentId": "S1",
            "laboratory": "Lab 2",
            "reservationTime": "2024-05-01T14:00:00"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(sample_reservation(json!(42), "2024-05-01T14:00:00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_reservation(&request).await.unwrap();
    assert_eq!(created.id, WireId::Number(42));
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rejection_with_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/reservations"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Slot already taken" })),
        )
        .mount(&server)
        .await;

    let request = CreateReservationRequest {
        email: "a@x.edu".into(),
        name: "Ana".into(),
        student_id: "S1".into(),
        laboratory: "Lab 2".into(),
        reservation_time: "2024-05-01T14:00:00".into(),
    };
    let err = client.create_reservation(&request).await.unwrap_err();

    assert_eq!(err.rejection_message(), Some("Slot already taken"));
    assert_eq!(err.status(), Some(409));
    assert!(
        matches!(err, Error::Rejected { .. }),
        "expected Rejected error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_server_error_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/active"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.list_active().await;

    assert!(
        matches!(result, Err(Error::Status { status: 500 })),
        "expected Status error, got: {result:?}"
    );
    assert!(result.unwrap_err().is_transient());
}

#[tokio::test]
async fn test_blank_message_falls_back_to_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/active"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "  " })))
        .mount(&server)
        .await;

    let result = client.list_active().await;
    assert!(
        matches!(result, Err(Error::Status { status: 400 })),
        "expected Status error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reservations/active"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_active().await;
    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client =
        ReservationClient::from_reqwest("http://127.0.0.1:1/api", reqwest::Client::new()).unwrap();

    let result = client.list_active().await;
    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
