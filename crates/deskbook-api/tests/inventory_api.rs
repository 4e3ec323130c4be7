//! Inventory reads, availability, and identity handling over HTTP.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_needs_no_identity() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None, false).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["status"], "ok");
    assert!(response.data()["snapshot_version"].as_u64().unwrap() >= 1);
    assert_eq!(response.data()["database"], "memory");
}

#[tokio::test]
async fn test_missing_user_header_is_unauthorized() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/areas", None, None, false).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_list_and_get_areas() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/api/areas", "alice").await;
    assert_eq!(response.status, StatusCode::OK);
    let areas = response.data().as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["id"], "area-1");
    assert_eq!(areas[0]["item_count"], 2);

    let response = app.get("/api/areas/area-1", "alice").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["item_groups"][0]["items"][0]["id"], "item-1");
    assert_eq!(
        response.data()["item_groups"][0]["items"][0]["equipment"][0],
        "monitor"
    );

    let response = app.get("/api/areas/area-1/item-groups", "alice").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()[0]["id"], "ig-1");
}

#[tokio::test]
async fn test_unknown_area_is_not_found() {
    let app = helpers::TestApp::new().await;

    for path in [
        "/api/areas/nope",
        "/api/areas/nope/item-groups",
        "/api/areas/nope/availability",
        "/api/areas/nope/presence",
        "/api/item-groups/nope/items",
    ] {
        let response = app.get(path, "alice").await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.error_code(), "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_availability_shape_and_day_count() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/api/areas/area-1/availability", "alice").await;
    assert_eq!(response.status, StatusCode::OK);
    let groups = response.data().as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["item_group_id"], "ig-1");
    let days = groups[0]["days"].as_array().unwrap();
    assert_eq!(days.len(), 5);
    assert_eq!(days[0]["weekday"], "MO");
    assert_eq!(days[0]["total"], 2);

    let response = app
        .get("/api/areas/area-1/availability?days=7", "alice")
        .await;
    assert_eq!(response.data()[0]["days"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_availability_rejects_bad_input() {
    let app = helpers::TestApp::new().await;

    for query in ["days=6", "week=2026-W54", "week=2026-12"] {
        let path = format!("/api/areas/area-1/availability?{query}");
        let response = app.get(&path, "alice").await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_availability_reflects_bookings() {
    let app = helpers::TestApp::new().await;

    let response = app.book("alice", "item-1", "2099-03-18").await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app
        .get("/api/areas/area-1/availability?week=2099-W12", "bob")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let days = response.data()[0]["days"].as_array().unwrap();
    assert_eq!(days[0]["date"], "2099-03-16");
    assert_eq!(days[2]["date"], "2099-03-18");
    assert_eq!(days[2]["available"], 1);
    assert_eq!(days[3]["available"], 2);
}

#[tokio::test]
async fn test_presence_lists_booked_users() {
    let app = helpers::TestApp::new().await;
    let date = helpers::date_in(3);

    app.book("bob", "item-2", &date).await;
    app.book("alice", "item-1", &date).await;

    let path = format!("/api/areas/area-1/presence?date={date}");
    let response = app.get(&path, "carol").await;
    assert_eq!(response.status, StatusCode::OK);
    let presence = response.data().as_array().unwrap();
    assert_eq!(presence.len(), 2);
    assert_eq!(presence[0]["user_id"], "alice");
    assert_eq!(presence[0]["item_name"], "Desk 1");
    assert_eq!(presence[1]["user_id"], "bob");

    let response = app
        .get("/api/areas/area-1/presence?date=tomorrow", "carol")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_item_status_discloses_occupant_to_admins_only() {
    let app = helpers::TestApp::new().await;
    let date = helpers::date_in(2);
    app.book("alice", "item-1", &date).await;

    let path = format!("/api/item-groups/ig-1/items?date={date}");

    let response = app.get(&path, "bob").await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.data().as_array().unwrap();
    assert_eq!(items[0]["availability"], "occupied");
    assert!(items[0].get("booked_by").is_none());
    assert_eq!(items[1]["availability"], "available");

    let response = app
        .request("GET", &path, None, Some("root"), true)
        .await;
    assert_eq!(response.data()[0]["booked_by"], "alice");
}
