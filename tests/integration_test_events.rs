mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn future_date() -> String {
    (Utc::now() + Duration::days(30)).format("%Y-%m-%d").to_string()
}

async fn get(app: &TestApp, uri: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap()
}

async fn book(app: &TestApp, event_id: &str, name: &str) {
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/book")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"event_id": event_id, "participant_name": name}).to_string()))
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_listing_computes_availability_fresh() {
    let app = TestApp::new().await;
    let event = app.create_event(json!({
        "title": "DXセミナー 基礎編",
        "date": future_date(),
        "time": "14:00",
        "capacity": 3,
        "form_fields": {"participant_name": {"required": true}}
    })).await;
    let event_id = event["id"].as_str().unwrap();

    book(&app, event_id, "A").await;

    let body = parse_body(get(&app, "/api/v1/events").await).await;
    let listed = &body.as_array().unwrap()[0];
    assert_eq!(listed["reserved_count"], 1);
    assert_eq!(listed["available_count"], 2);
    assert_eq!(listed["full"], false);

    book(&app, event_id, "B").await;
    book(&app, event_id, "C").await;

    let body = parse_body(get(&app, "/api/v1/events").await).await;
    let listed = &body.as_array().unwrap()[0];
    assert_eq!(listed["available_count"], 0);
    assert_eq!(listed["full"], true);
}

#[tokio::test]
async fn test_negative_availability_is_clamped_in_display() {
    let app = TestApp::new().await;
    let event = app.create_event(json!({
        "title": "Test",
        "date": future_date(),
        "time": "14:00",
        "capacity": 2,
        "form_fields": {"participant_name": {"required": true}}
    })).await;
    let event_id = event["id"].as_str().unwrap();

    book(&app, event_id, "A").await;
    book(&app, event_id, "B").await;

    // Lowering capacity under the active count must not render negative seats.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("PUT")
            .uri(format!("/api/v1/admin/events/{}", event_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"capacity": 1}).to_string()))
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(get(&app, "/api/v1/events").await).await;
    let listed = &body.as_array().unwrap()[0];
    assert_eq!(listed["reserved_count"], 2);
    assert_eq!(listed["available_count"], 0);
    assert_eq!(listed["full"], true);
}

#[tokio::test]
async fn test_public_list_hides_past_events() {
    let app = TestApp::new().await;
    app.create_event(json!({
        "title": "Long gone",
        "date": "2000-01-01",
        "time": "14:00"
    })).await;
    app.create_event(json!({
        "title": "Upcoming",
        "date": future_date(),
        "time": "14:00"
    })).await;

    let body = parse_body(get(&app, "/api/v1/events").await).await;
    let titles: Vec<&str> = body.as_array().unwrap()
        .iter().map(|e| e["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Upcoming"]);

    // Admin sees everything, newest first.
    let body = parse_body(get(&app, "/api/v1/admin/events").await).await;
    let titles: Vec<&str> = body.as_array().unwrap()
        .iter().map(|e| e["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Upcoming", "Long gone"]);
}

#[tokio::test]
async fn test_upcoming_events_sorted_by_date_then_time() {
    let app = TestApp::new().await;
    let later = (Utc::now() + Duration::days(40)).format("%Y-%m-%d").to_string();
    let sooner = (Utc::now() + Duration::days(10)).format("%Y-%m-%d").to_string();

    app.create_event(json!({"title": "Late", "date": later, "time": "09:00"})).await;
    app.create_event(json!({"title": "Early afternoon", "date": sooner, "time": "14:00"})).await;
    app.create_event(json!({"title": "Early morning", "date": sooner, "time": "10:00"})).await;

    let body = parse_body(get(&app, "/api/v1/events").await).await;
    let titles: Vec<&str> = body.as_array().unwrap()
        .iter().map(|e| e["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Early morning", "Early afternoon", "Late"]);
}

#[tokio::test]
async fn test_event_detail_formats_date_and_options() {
    let app = TestApp::new().await;
    let event = app.create_event(json!({
        "title": "肉の会",
        "date": "2030-08-31",
        "time": "11:45",
        "event_type": "personal",
        "participation_options": ["焼肉バイキング 5800円", "", "ローストビーフ 2500円"]
    })).await;
    let event_id = event["id"].as_str().unwrap();

    let body = parse_body(get(&app, &format!("/api/v1/events/{}", event_id)).await).await;
    assert_eq!(body["event"]["formatted_date"], "2030年08月31日");
    // Blank option lines are dropped at creation time.
    assert_eq!(
        body["event"]["participation_options"],
        json!(["焼肉バイキング 5800円", "ローストビーフ 2500円"])
    );
}

#[tokio::test]
async fn test_event_detail_not_found() {
    let app = TestApp::new().await;
    let res = get(&app, "/api/v1/events/missing").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_stored_options_render_as_empty() {
    let app = TestApp::new().await;
    let event = app.create_event(json!({
        "title": "Test",
        "date": future_date(),
        "time": "14:00"
    })).await;
    let event_id = event["id"].as_str().unwrap();

    // Corrupt the stored blob behind the API's back.
    sqlx::query("UPDATE events SET participation_options = 'not json {' WHERE id = ?")
        .bind(event_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let res = get(&app, &format!("/api/v1/events/{}", event_id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["event"]["participation_options"], json!([]));
}
