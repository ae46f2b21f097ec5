//! Registration API integration tests.
//!
//! Drives the full router over the in-memory store: team and individual
//! registration, grouped listing, lifecycle status updates, and the role
//! checks on the admin surface.

#![allow(clippy::unwrap_used)] // Integration tests can unwrap for setup

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use festreg::payment::{MockPaymentGateway, PaymentService, PaymentVerifier};
use festreg::registration::RegistrationService;
use festreg::server::{build_router, AppState};
use festreg::store::InMemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;

fn admin_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-user-role"),
        HeaderValue::from_static("admin"),
    )
}

fn test_server() -> TestServer {
    let store = Arc::new(InMemoryStore::new());
    let registrations = Arc::new(RegistrationService::new(store.clone(), store.clone()));
    let payments = Arc::new(PaymentService::new(
        store.clone(),
        MockPaymentGateway::shared(),
        PaymentVerifier::new("test-secret"),
    ));
    let state = AppState::new(store, registrations, payments);
    TestServer::new(build_router(state)).unwrap()
}

async fn create_event(server: &TestServer, kind: &str, fee: i64, max_team_size: u32) -> String {
    let (name, value) = admin_header();
    let response = server
        .post("/events")
        .add_header(name, value)
        .json(&json!({
            "title": "Code Sprint",
            "description": "24h hackathon",
            "venue": "Main Block",
            "startsAt": "2026-10-01T09:00:00Z",
            "endsAt": "2026-10-02T09:00:00Z",
            "fee": fee,
            "kind": kind,
            "maxTeamSize": max_team_size,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

fn member(name: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "registration_no": "21BCE1001",
        "mobile_no": "9876543210",
        "semester": "5",
    })
}

fn team_body(event_id: &str, members: usize) -> Value {
    json!({
        "eventId": event_id,
        "teamName": "Null Pointers",
        "leader": member("Asha"),
        "teamMembers": (0..members)
            .map(|i| member(&format!("M{i}")))
            .collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn team_round_trip_creates_and_lists_pending_entries() {
    let server = test_server();
    let event_id = create_event(&server, "group", 49, 3).await;

    let response = server
        .post("/registrations/group")
        .json(&team_body(&event_id, 2))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["totalFee"], 147);
    let registrations = body["registrations"].as_array().unwrap();
    assert_eq!(registrations.len(), 3);
    assert_eq!(registrations[0]["isLeader"], true);
    assert!(registrations[1..].iter().all(|r| r["isLeader"] == false));

    let (name, value) = admin_header();
    let listing = server
        .get(&format!("/registrations/event/{event_id}"))
        .add_header(name, value)
        .await;
    listing.assert_status_ok();

    let grouped = listing.json::<Value>();
    assert!(grouped["individuals"].as_array().unwrap().is_empty());
    let team = &grouped["Null Pointers"];
    assert_eq!(team["teamName"], "Null Pointers");
    assert_eq!(team["members"].as_array().unwrap().len(), 3);
    assert_eq!(team["totalFee"], 147);
    assert!(team["members"]
        .as_array()
        .unwrap()
        .iter()
        .all(|m| m["status"] == "pending"));
}

#[tokio::test]
async fn team_size_bounds_are_enforced_over_http() {
    let server = test_server();
    let event_id = create_event(&server, "group", 49, 3).await;

    let too_small = server
        .post("/registrations/group")
        .json(&team_body(&event_id, 1))
        .await;
    too_small.assert_status_bad_request();
    assert!(too_small.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .contains("At least 2"));

    let too_big = server
        .post("/registrations/group")
        .json(&team_body(&event_id, 4))
        .await;
    too_big.assert_status_bad_request();
}

#[tokio::test]
async fn unknown_event_returns_404() {
    let server = test_server();
    let response = server
        .post("/registrations/group")
        .json(&team_body("00000000-0000-0000-0000-000000000000", 2))
        .await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["message"], "Event not found");
}

#[tokio::test]
async fn missing_top_level_fields_return_400_with_named_field() {
    let server = test_server();
    let response = server
        .post("/registrations/group")
        .json(&json!({ "teamName": "A" }))
        .await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .contains("eventId"));
}

#[tokio::test]
async fn duplicate_team_name_is_rejected() {
    let server = test_server();
    let event_id = create_event(&server, "group", 49, 3).await;

    server
        .post("/registrations/group")
        .json(&team_body(&event_id, 2))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let again = server
        .post("/registrations/group")
        .json(&team_body(&event_id, 2))
        .await;
    again.assert_status_bad_request();
}

#[tokio::test]
async fn invalid_mobile_number_is_rejected() {
    let server = test_server();
    let event_id = create_event(&server, "group", 49, 3).await;

    let mut body = team_body(&event_id, 2);
    body["leader"]["mobile_no"] = json!("12345");
    let response = server.post("/registrations/group").json(&body).await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .contains("mobile"));
}

#[tokio::test]
async fn individual_registration_lands_under_individuals() {
    let server = test_server();
    let event_id = create_event(&server, "individual", 99, 0).await;

    let response = server
        .post("/registrations")
        .json(&json!({ "eventId": event_id, "participant": member("Dev") }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["fee"], 99);
    assert_eq!(body["registration"]["isLeader"], false);

    let (name, value) = admin_header();
    let listing = server
        .get(&format!("/registrations/event/{event_id}"))
        .add_header(name, value)
        .await;
    let grouped = listing.json::<Value>();
    assert_eq!(grouped["individuals"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn admin_listing_requires_role_header() {
    let server = test_server();
    let event_id = create_event(&server, "group", 49, 3).await;

    let unauthenticated = server
        .get(&format!("/registrations/event/{event_id}"))
        .await;
    unauthenticated.assert_status_unauthorized();

    let participant = server
        .get(&format!("/registrations/event/{event_id}"))
        .add_header(
            HeaderName::from_static("x-user-role"),
            HeaderValue::from_static("participant"),
        )
        .await;
    participant.assert_status_forbidden();
}

#[tokio::test]
async fn status_update_round_trips_and_rejects_unknowns() {
    let server = test_server();
    let event_id = create_event(&server, "group", 49, 3).await;

    let created = server
        .post("/registrations/group")
        .json(&team_body(&event_id, 2))
        .await
        .json::<Value>();
    let registration_id = created["registrations"][0]["id"].as_str().unwrap().to_string();

    let (name, value) = admin_header();
    let updated = server
        .patch(&format!("/registrations/{registration_id}"))
        .add_header(name.clone(), value.clone())
        .json(&json!({ "status": "confirmed" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["status"], "confirmed");

    let bad_status = server
        .patch(&format!("/registrations/{registration_id}"))
        .add_header(name.clone(), value.clone())
        .json(&json!({ "status": "paid" }))
        .await;
    bad_status.assert_status_bad_request();

    let missing = server
        .patch("/registrations/00000000-0000-0000-0000-000000000000")
        .add_header(name, value)
        .json(&json!({ "status": "confirmed" }))
        .await;
    missing.assert_status_not_found();
}

#[tokio::test]
async fn single_registration_read_requires_authentication() {
    let server = test_server();
    let event_id = create_event(&server, "group", 49, 3).await;

    let created = server
        .post("/registrations/group")
        .json(&team_body(&event_id, 2))
        .await
        .json::<Value>();
    let registration_id = created["registrations"][1]["id"].as_str().unwrap().to_string();

    server
        .get(&format!("/registrations/{registration_id}"))
        .await
        .assert_status_unauthorized();

    let read = server
        .get(&format!("/registrations/{registration_id}"))
        .add_header(
            HeaderName::from_static("x-user-role"),
            HeaderValue::from_static("participant"),
        )
        .await;
    read.assert_status_ok();
    assert_eq!(read.json::<Value>()["teamName"], "Null Pointers");
}

#[tokio::test]
async fn event_catalog_read_surface_works() {
    let server = test_server();
    let event_id = create_event(&server, "group", 49, 3).await;

    let listing = server.get("/events").await;
    listing.assert_status_ok();
    assert_eq!(listing.json::<Value>().as_array().unwrap().len(), 1);

    let one = server.get(&format!("/events/{event_id}")).await;
    one.assert_status_ok();
    assert_eq!(one.json::<Value>()["kind"], "group");

    server
        .get("/events/00000000-0000-0000-0000-000000000000")
        .await
        .assert_status_not_found();
}
