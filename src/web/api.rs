use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use log::info;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::dijkstra::Dijkstra;
use crate::graph::{MutableGraph, UndirectedGraph};
use crate::web::models::*;
use crate::web::server::ServerConfig;
use crate::Error;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state
///
/// Session graphs are only touched while the mutex is held, which keeps edge
/// additions from overlapping with searches over the same graph.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Locks the session map, taking it over from a handler that panicked
    /// while holding it. Every write to the map is a single insert, removal
    /// or graph edit, so the data stays usable.
    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(create_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/graphs/:session_id/edges", post(add_edges))
        .route("/api/paths/:session_id", post(find_path))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session))
        .route("/api/health", get(health_check))
}

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn session_not_found(session_id: Uuid) -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "session_not_found",
        format!("Session {} not found", session_id),
    )
}

/// Maps a library error onto its HTTP status and error code
fn library_error(err: Error) -> ApiError {
    let (status, code, details) = match &err {
        Error::UnknownNode(name) => (
            StatusCode::NOT_FOUND,
            "unknown_node",
            Some(serde_json::json!({ "node": name })),
        ),
        Error::NoPath { from, to } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "no_path",
            Some(serde_json::json!({ "source": from, "destination": to })),
        ),
        Error::NegativeWeight { from, to } => (
            StatusCode::BAD_REQUEST,
            "negative_weight",
            Some(serde_json::json!({ "from": from, "to": to })),
        ),
        Error::DistanceOverflow { from, to } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "distance_overflow",
            Some(serde_json::json!({ "source": from, "destination": to })),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "search_failed", None),
    };

    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
            details,
        }),
    )
}

/// Converts client edges into graph weights, rejecting the whole batch on the
/// first negative weight
fn validated_edges(edges: &[EdgeSpec]) -> Result<Vec<(&str, &str, u64)>, Error> {
    edges
        .iter()
        .map(|edge| {
            u64::try_from(edge.weight)
                .map(|weight| (edge.from.as_str(), edge.to.as_str(), weight))
                .map_err(|_| Error::NegativeWeight {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                })
        })
        .collect()
}

/// Create a new graph session
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphRequest>,
) -> Result<(StatusCode, Json<SessionSummary>), ApiError> {
    let edges = validated_edges(&request.edges).map_err(library_error)?;

    let mut graph = UndirectedGraph::with_capacity(edges.len());
    for (from, to, weight) in edges {
        graph.add_edge(from, to, weight);
    }

    let session = Session::new(graph);
    let summary = session.summary();

    let mut sessions = state.lock_sessions();
    let now = Utc::now();
    let timeout = state.config.session_timeout_minutes;
    sessions.retain(|_, session| !session.is_expired(now, timeout));

    if sessions.len() >= state.config.max_sessions {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "session_limit_reached",
            format!("At most {} sessions may be open", state.config.max_sessions),
        ));
    }

    info!(
        "session {} created with {} nodes and {} edges",
        summary.id, summary.node_count, summary.edge_count
    );
    sessions.insert(session.id, session);

    Ok((StatusCode::CREATED, Json(summary)))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    let sessions = state.lock_sessions();

    match sessions.get(&session_id) {
        Some(session) => Ok(Json(WebGraph::from(&session.graph))),
        None => Err(session_not_found(session_id)),
    }
}

/// Add edges to an existing session graph
pub async fn add_edges(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<GraphRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    let edges = validated_edges(&request.edges).map_err(library_error)?;

    let mut sessions = state.lock_sessions();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    for (from, to, weight) in edges {
        session.graph.add_edge(from, to, weight);
    }
    session.touch();

    Ok(Json(session.summary()))
}

/// Run a shortest path query on a session graph
pub async fn find_path(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PathRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    let mut sessions = state.lock_sessions();
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session.touch();

    let start_time = Instant::now();
    let route = Dijkstra::new()
        .shortest_path(&session.graph, &request.source, &request.destination)
        .map_err(library_error)?;
    let execution_time = start_time.elapsed();

    let response = PathResponse {
        execution_id: Uuid::new_v4(),
        source: request.source,
        destination: request.destination,
        hops: route.hops(),
        path: route.path,
        distance: route.distance,
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
        stats: route.stats,
        computed_at: Utc::now(),
    };

    session.queries_run += 1;
    session.last_result = Some(response.clone());

    Ok(Json(response))
}

/// List all sessions
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let sessions = state.lock_sessions();
    let mut summaries: Vec<SessionSummary> = sessions.values().map(Session::summary).collect();
    summaries.sort_by_key(|summary| summary.created_at);
    Ok(Json(summaries))
}

/// Get a specific session
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    let sessions = state.lock_sessions();

    match sessions.get(&session_id) {
        Some(session) => Ok(Json(session.summary())),
        None => Err(session_not_found(session_id)),
    }
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let sessions = state.lock_sessions().len();
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions,
    }))
}
