use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, booking, catalog, event, health};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public browsing & booking flow
        .route("/api/v1/events", get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event))
        .route("/api/v1/form-fields", get(catalog::list_form_fields))
        .route("/api/v1/book", post(booking::create_reservation))
        .route("/api/v1/reservations", get(booking::lookup_reservations))
        .route("/api/v1/reservations/{code}", get(booking::get_confirmation))
        .route("/api/v1/cancel", post(booking::cancel_reservation))

        // Admin
        .route("/api/v1/admin/events", post(admin::create_event).get(admin::list_events))
        .route("/api/v1/admin/events/{event_id}", get(admin::get_event).put(admin::update_event).delete(admin::delete_event))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
