//! HTTP API for the dashboard frontend
//!
//! - `GET  /api/agent/status`: provider configuration
//! - `POST /api/agent/investigate`: start an investigation
//! - `GET  /api/agent/stream/:session_id`: server-sent events for a session
//! - `GET  /metrics`: Prometheus text format

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures_util::Stream;
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::agent::{AgentService, InvestigationRequest, RecordedEvent};
use crate::metrics::{self, STREAM_SUBSCRIBERS};

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub agent: Arc<AgentService>,
}

/// Start-investigation response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigateResponse {
    pub session_id: String,
}

/// Create the dashboard router
pub fn create_router(state: DashboardState) -> Router {
    Router::new()
        .route("/api/agent/status", get(agent_status))
        .route("/api/agent/investigate", post(investigate))
        .route("/api/agent/stream/:session_id", get(stream_session))
        .route("/metrics", get(prometheus_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn agent_status(State(state): State<DashboardState>) -> impl IntoResponse {
    Json(state.agent.status())
}

async fn investigate(
    State(state): State<DashboardState>,
    body: Option<Json<InvestigationRequest>>,
) -> Response {
    let request = match body {
        Some(Json(request)) if request.is_valid() => request,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Container id and name required" })),
            )
                .into_response();
        }
    };

    let session_id = state.agent.start_investigation(request);
    Json(InvestigateResponse { session_id }).into_response()
}

async fn stream_session(
    State(state): State<DashboardState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.agent.subscribe(&session_id) {
        Ok(subscription) => {
            debug!(
                session_id = %session_id,
                replay = subscription.replay.len(),
                live = subscription.live.is_some(),
                "Stream subscriber attached"
            );
            let events = event_stream(subscription.replay, subscription.live);
            Sse::new(events)
                .keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
                .into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "Session not found").into_response(),
    }
}

async fn prometheus_metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::render(),
    )
}

/// Replay, then forward live events until the session's `end`
fn event_stream(
    replay: Vec<RecordedEvent>,
    live: Option<tokio::sync::mpsc::UnboundedReceiver<RecordedEvent>>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    async_stream::stream! {
        let _guard = SubscriberGuard::new();

        for event in replay {
            yield Ok::<_, Infallible>(to_sse(&event));
        }

        if let Some(mut rx) = live {
            // The store drops our sender after `end`, which ends this loop
            while let Some(event) = rx.recv().await {
                yield Ok::<_, Infallible>(to_sse(&event));
            }
        }
    }
}

fn to_sse(event: &RecordedEvent) -> Event {
    Event::default()
        .event(event.kind.as_str())
        .data(event.payload.as_str())
}

/// Tracks open streams in the subscriber gauge
struct SubscriberGuard;

impl SubscriberGuard {
    fn new() -> Self {
        STREAM_SUBSCRIBERS.inc();
        Self
    }
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        STREAM_SUBSCRIBERS.dec();
    }
}
