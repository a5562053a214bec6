//! rest::router
//!
//! axum wiring for the REST surface.
//!
//! Handlers bind path segments and JSON bodies into the shared request
//! types, call the dispatcher, and project outcomes through
//! [`super::projection`]. Malformed JSON bodies are rejected by the `Json`
//! extractor before the dispatcher is reached (a transport concern, like an
//! unsupported method).

use std::net::SocketAddr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::projection;
use crate::protocol::{
    AddPayload, AddRequest, Dispatcher, EditPayload, EditRequest, GetRequest, ListRequest,
    RemoveRequest, RenamePayload, RenameRequest, TargetResult,
};

#[derive(Clone)]
struct RestState {
    dispatcher: Dispatcher,
}

/// Build the REST router over the given dispatcher.
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route(
            "/changelist/{project}",
            get(list_changelists).post(add_changelist),
        )
        .route(
            "/changelist/{project}/{name}",
            get(get_changelist)
                .put(edit_changelist)
                .post(rename_changelist)
                .delete(remove_changelist),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(RestState { dispatcher })
}

/// Bind `addr` and serve the REST surface until ctrl-c.
pub async fn serve(addr: SocketAddr, dispatcher: Dispatcher) -> std::io::Result<()> {
    let app = router(dispatcher);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "changelist REST gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
}

async fn list_changelists(
    State(state): State<RestState>,
    Path(project): Path<String>,
) -> Response {
    match state.dispatcher.list(&ListRequest { project }).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(err) => projection::error_response(&err).into_response(),
    }
}

async fn get_changelist(
    State(state): State<RestState>,
    Path((project, name)): Path<(String, String)>,
) -> Response {
    let request = GetRequest {
        project,
        name: Some(name),
    };
    match state.dispatcher.get(&request).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => projection::error_response(&err).into_response(),
    }
}

async fn add_changelist(
    State(state): State<RestState>,
    Path(project): Path<String>,
    Json(payload): Json<AddPayload>,
) -> Response {
    let request = AddRequest { project, payload };
    write_response(state.dispatcher.add(&request).await, StatusCode::CREATED)
}

async fn edit_changelist(
    State(state): State<RestState>,
    Path((project, name)): Path<(String, String)>,
    Json(payload): Json<EditPayload>,
) -> Response {
    let request = EditRequest {
        project,
        name: Some(name),
        payload,
    };
    write_response(state.dispatcher.edit(&request).await, StatusCode::NO_CONTENT)
}

async fn rename_changelist(
    State(state): State<RestState>,
    Path((project, name)): Path<(String, String)>,
    Json(payload): Json<RenamePayload>,
) -> Response {
    let request = RenameRequest {
        project,
        name: Some(name),
        payload,
    };
    write_response(
        state.dispatcher.rename(&request).await,
        StatusCode::NO_CONTENT,
    )
}

async fn remove_changelist(
    State(state): State<RestState>,
    Path((project, name)): Path<(String, String)>,
) -> Response {
    let request = RemoveRequest {
        project,
        name: Some(name),
    };
    write_response(
        state.dispatcher.remove(&request).await,
        StatusCode::NO_CONTENT,
    )
}

fn write_response(result: TargetResult, success: StatusCode) -> Response {
    match result {
        Ok(()) => success.into_response(),
        Err(err) => projection::error_response(&err).into_response(),
    }
}
