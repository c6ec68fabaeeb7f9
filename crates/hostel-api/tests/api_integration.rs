use axum_test::TestServer;
use hostel_api::{create_router, AppState};
use hostel_core::{DatabaseConfig, HostelConfig};
use serde_json::json;
use std::sync::Arc;

fn test_server() -> TestServer {
    let config = HostelConfig {
        database: DatabaseConfig {
            path: ":memory:".into(),
            seed: true,
        },
        ..Default::default()
    };
    let state = AppState::new(Arc::new(config)).expect("app state");
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = test_server();

    let resp = server.get("/health").await;
    assert_eq!(resp.status_code(), 200);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn login_accepts_email_and_username() {
    let server = test_server();

    let by_email = server
        .post("/api/login")
        .json(&json!({ "email": "john@example.com", "password": "student123" }))
        .await;
    assert_eq!(by_email.status_code(), 200);
    let body: serde_json::Value = by_email.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["type"], "student");
    assert_eq!(body["user"]["name"], "John Doe");

    let by_username = server
        .post("/api/login")
        .json(&json!({ "username": "jane", "password": "password123" }))
        .await;
    assert_eq!(by_username.status_code(), 200);

    let admin = server
        .post("/api/login")
        .json(&json!({ "username": "admin", "password": "admin123", "userType": "admin" }))
        .await;
    assert_eq!(admin.status_code(), 200);
    let body: serde_json::Value = admin.json();
    assert_eq!(body["user"]["type"], "admin");
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let server = test_server();

    let resp = server
        .post("/api/login")
        .json(&json!({ "email": "john@example.com", "password": "wrong" }))
        .await;
    assert_eq!(resp.status_code(), 401);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn admin_dashboard_reports_statistics() {
    let server = test_server();

    let resp = server.get("/api/admin/dashboard").await;
    assert_eq!(resp.status_code(), 200);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["data"]["total_rooms"], 6);
    assert!(body["data"]["today_menu"].is_object());
}

#[tokio::test]
async fn student_dashboard_and_missing_student() {
    let server = test_server();

    let resp = server.get("/api/student/dashboard/1").await;
    assert_eq!(resp.status_code(), 200);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["data"]["student"]["name"], "John Doe");
    assert_eq!(body["data"]["student"]["room_number"], "101");
    // the password column must never reach the wire
    assert!(body["data"]["student"].get("password").is_none());

    let missing = server.get("/api/student/dashboard/999").await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn rooms_listing_and_details() {
    let server = test_server();

    let resp = server.get("/api/rooms").await;
    assert_eq!(resp.status_code(), 200);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 6);

    let details = server.get("/api/rooms/101/details").await;
    assert_eq!(details.status_code(), 200);
    let body: serde_json::Value = details.json();
    assert_eq!(body["data"]["room_number"], "101");
    assert_eq!(body["data"]["students"].as_array().unwrap().len(), 1);

    let missing = server.get("/api/rooms/404/details").await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn payment_update_round_trip() {
    let server = test_server();

    let resp = server
        .put("/api/payments/1")
        .json(&json!({ "status": "Paid" }))
        .await;
    assert_eq!(resp.status_code(), 200);

    let list = server.get("/api/payments").await;
    let body: serde_json::Value = list.json();
    let paid = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["payment_id"] == 1)
        .unwrap();
    assert_eq!(paid["status"], "Paid");
    assert!(paid["payment_date"].is_string());

    let missing = server
        .put("/api/payments/999")
        .json(&json!({ "status": "Paid" }))
        .await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn complaint_lifecycle() {
    let server = test_server();

    let created = server
        .post("/api/complaints")
        .json(&json!({
            "student_id": 1,
            "room_id": 1,
            "complaint_type": "Electrical",
            "description": "fan not working"
        }))
        .await;
    assert_eq!(created.status_code(), 200);

    let all = server.get("/api/complaints").await;
    let body: serde_json::Value = all.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let filtered = server.get("/api/complaints?student_id=2").await;
    let body: serde_json::Value = filtered.json();
    assert!(body["data"].as_array().unwrap().is_empty());

    let resolved = server
        .put("/api/complaints/1")
        .json(&json!({ "status": "Resolved" }))
        .await;
    assert_eq!(resolved.status_code(), 200);

    let empty_fields = server
        .post("/api/complaints")
        .json(&json!({
            "student_id": 1,
            "room_id": 1,
            "complaint_type": "",
            "description": ""
        }))
        .await;
    assert_eq!(empty_fields.status_code(), 400);
}

#[tokio::test]
async fn menu_is_in_calendar_order() {
    let server = test_server();

    let resp = server.get("/api/menu").await;
    assert_eq!(resp.status_code(), 200);
    let body: serde_json::Value = resp.json();
    let days: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["day"].as_str().unwrap())
        .collect();
    assert_eq!(
        days,
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
    );
}

#[tokio::test]
async fn waiting_list_assignment_flow() {
    let server = test_server();

    let joined = server
        .post("/api/waiting-list")
        .json(&json!({
            "student_name": "Alice Wonder",
            "phone": "5550100",
            "email": "alice@example.com",
            "join_date": "2026-01-15"
        }))
        .await;
    assert_eq!(joined.status_code(), 200);

    let assigned = server
        .post("/api/admin/waiting-list/1/assign")
        .json(&json!({ "room_id": "202" }))
        .await;
    assert_eq!(assigned.status_code(), 200);
    let body: serde_json::Value = assigned.json();
    let student_id = body["student_id"].as_i64().unwrap();

    // the new account can log in with the starter password
    let login = server
        .post("/api/login")
        .json(&json!({ "email": "alice@example.com", "password": "student123" }))
        .await;
    assert_eq!(login.status_code(), 200);
    let body: serde_json::Value = login.json();
    assert_eq!(body["user"]["id"], student_id);

    // second assignment of the same entry is rejected
    let again = server
        .post("/api/admin/waiting-list/1/assign")
        .json(&json!({ "room_id": "203" }))
        .await;
    assert_eq!(again.status_code(), 400);

    // missing room id is a validation error
    let no_room = server
        .post("/api/admin/waiting-list/1/assign")
        .json(&json!({}))
        .await;
    assert_eq!(no_room.status_code(), 400);
}

#[tokio::test]
async fn full_room_assignment_conflicts() {
    let server = test_server();

    for (i, name) in ["First", "Second"].iter().enumerate() {
        let resp = server
            .post("/api/waiting-list")
            .json(&json!({
                "student_name": name,
                "phone": "5550100",
                "join_date": format!("2026-01-{:02}", i + 1)
            }))
            .await;
        assert_eq!(resp.status_code(), 200);
    }

    // room 201 holds exactly one student
    let first = server
        .post("/api/admin/waiting-list/1/assign")
        .json(&json!({ "room_id": "201" }))
        .await;
    assert_eq!(first.status_code(), 200);

    let second = server
        .post("/api/admin/waiting-list/2/assign")
        .json(&json!({ "room_id": "201" }))
        .await;
    assert_eq!(second.status_code(), 409);
}

#[tokio::test]
async fn maintenance_requests() {
    let server = test_server();

    let created = server
        .post("/api/maintenance")
        .json(&json!({
            "student_id": 1,
            "room_id": 1,
            "category": "Plumbing",
            "description": "leaky tap"
        }))
        .await;
    assert_eq!(created.status_code(), 200);

    let list = server.get("/api/maintenance").await;
    let body: serde_json::Value = list.json();
    let requests = body["data"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["priority"], "Medium");
    assert_eq!(requests[0]["status"], "Pending");
}

#[tokio::test]
async fn room_change_request_flow() {
    let server = test_server();

    let created = server
        .post("/api/room-change-requests")
        .json(&json!({
            "student_id": 1,
            "current_room": 1,
            "requested_room": 5,
            "reason": "closer to the library"
        }))
        .await;
    assert_eq!(created.status_code(), 200);

    let pending = server.get("/api/room-change-requests").await;
    let body: serde_json::Value = pending.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["student_name"], "John Doe");

    let approved = server.put("/api/room-change-requests/1/approve").await;
    assert_eq!(approved.status_code(), 200);

    // approval moved the student; the queue is empty again
    let after = server.get("/api/room-change-requests").await;
    let body: serde_json::Value = after.json();
    assert!(body["data"].as_array().unwrap().is_empty());

    let dashboard = server.get("/api/student/dashboard/1").await;
    let body: serde_json::Value = dashboard.json();
    assert_eq!(body["data"]["student"]["room_number"], "202");

    let twice = server.put("/api/room-change-requests/1/approve").await;
    assert_eq!(twice.status_code(), 400);

    let missing = server.put("/api/room-change-requests/99/deny").await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn announcements_round_trip() {
    let server = test_server();

    let list = server.get("/api/announcements").await;
    assert_eq!(list.status_code(), 200);
    let body: serde_json::Value = list.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let created = server
        .post("/api/announcements")
        .json(&json!({
            "title": "Water outage",
            "message": "Tomorrow 9-11am",
            "category": "Maintenance"
        }))
        .await;
    assert_eq!(created.status_code(), 200);

    let after: serde_json::Value = server.get("/api/announcements").await.json();
    assert_eq!(after["data"].as_array().unwrap().len(), 3);
}
