use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use route_finder::web::api::{add_edges, create_graph, find_path, get_graph, get_session, health_check, list_sessions, AppState};
use route_finder::web::models::{EdgeSpec, GraphRequest, PathRequest};
use route_finder::web::ServerConfig;
use uuid::Uuid;

fn edge(from: &str, to: &str, weight: i64) -> EdgeSpec {
    EdgeSpec {
        from: from.to_string(),
        to: to.to_string(),
        weight,
    }
}

fn example_request() -> GraphRequest {
    GraphRequest {
        edges: vec![
            edge("A", "B", 7),
            edge("A", "C", 9),
            edge("A", "F", 14),
            edge("B", "C", 10),
            edge("B", "D", 15),
            edge("C", "D", 11),
            edge("C", "F", 2),
            edge("D", "E", 6),
            edge("E", "F", 9),
        ],
    }
}

fn path_request(source: &str, destination: &str) -> PathRequest {
    PathRequest {
        source: source.to_string(),
        destination: destination.to_string(),
    }
}

async fn new_session(state: &AppState, request: GraphRequest) -> Uuid {
    let (status, Json(summary)) = create_graph(State(state.clone()), Json(request)).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    summary.id
}

#[tokio::test]
async fn test_create_graph_and_query_path() {
    let state = AppState::default();
    let (_, Json(summary)) = create_graph(State(state.clone()), Json(example_request())).await.unwrap();
    assert_eq!(summary.node_count, 6);
    assert_eq!(summary.edge_count, 9);
    assert_eq!(summary.queries_run, 0);

    let Json(response) = find_path(State(state.clone()), Path(summary.id), Json(path_request("A", "E")))
        .await
        .unwrap();
    assert_eq!(response.path, vec!["A", "C", "F", "E"]);
    assert_eq!(response.distance, 20);
    assert_eq!(response.hops, 3);
    assert!(response.stats.nodes_finalized >= 4);

    let Json(session) = get_session(State(state.clone()), Path(summary.id)).await.unwrap();
    assert_eq!(session.queries_run, 1);
    assert_eq!(session.last_result.map(|r| r.distance), Some(20));
}

#[tokio::test]
async fn test_get_graph_lists_nodes_and_links() {
    let state = AppState::default();
    let id = new_session(&state, example_request()).await;

    let Json(graph) = get_graph(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(graph.nodes.len(), 6);
    assert_eq!(graph.links.len(), 9);

    let c = graph.nodes.iter().find(|n| n.id == "C").unwrap();
    assert_eq!(c.degree, 4);
}

#[tokio::test]
async fn test_added_edges_change_the_route() {
    let state = AppState::default();
    let id = new_session(&state, example_request()).await;

    let request = GraphRequest {
        edges: vec![edge("A", "E", 5)],
    };
    let Json(summary) = add_edges(State(state.clone()), Path(id), Json(request)).await.unwrap();
    assert_eq!(summary.edge_count, 10);

    let Json(response) = find_path(State(state.clone()), Path(id), Json(path_request("A", "E")))
        .await
        .unwrap();
    assert_eq!(response.path, vec!["A", "E"]);
    assert_eq!(response.distance, 5);
}

#[tokio::test]
async fn test_search_errors_map_to_status_codes() {
    let state = AppState::default();
    let request = GraphRequest {
        edges: vec![edge("a", "b", 1), edge("c", "d", 1)],
    };
    let id = new_session(&state, request).await;

    let (status, Json(body)) = find_path(State(state.clone()), Path(id), Json(path_request("a", "d")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.error, "no_path");

    let (status, Json(body)) = find_path(State(state.clone()), Path(id), Json(path_request("a", "zz")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.error, "unknown_node");

    let (status, Json(body)) = find_path(State(state.clone()), Path(Uuid::new_v4()), Json(path_request("a", "b")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.error, "session_not_found");
}

#[tokio::test]
async fn test_negative_weights_are_rejected() {
    let state = AppState::default();
    let request = GraphRequest {
        edges: vec![edge("a", "b", 1), edge("b", "c", -4)],
    };
    let (status, Json(body)) = create_graph(State(state.clone()), Json(request)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "negative_weight");

    let id = new_session(&state, example_request()).await;
    let request = GraphRequest {
        edges: vec![edge("A", "Q", 1), edge("Q", "E", -1)],
    };
    let (status, _) = add_edges(State(state.clone()), Path(id), Json(request)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A rejected batch leaves the graph untouched
    let Json(graph) = get_graph(State(state.clone()), Path(id)).await.unwrap();
    assert!(graph.nodes.iter().all(|n| n.id != "Q"));
}

#[tokio::test]
async fn test_session_limit() {
    let state = AppState::new(ServerConfig {
        max_sessions: 2,
        ..Default::default()
    });
    new_session(&state, example_request()).await;
    new_session(&state, example_request()).await;

    let (status, Json(body)) = create_graph(State(state.clone()), Json(example_request())).await.unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.error, "session_limit_reached");

    let Json(sessions) = list_sessions(State(state.clone())).await.unwrap();
    assert_eq!(sessions.len(), 2);

    let Json(health) = health_check(State(state.clone())).await.unwrap();
    assert_eq!(health.sessions, 2);
}

/// Moves a session's last access `minutes` into the past
fn backdate(state: &AppState, id: Uuid, minutes: i64) {
    let mut sessions = state.sessions.lock().unwrap();
    let session = sessions.get_mut(&id).unwrap();
    session.last_accessed = Utc::now() - Duration::minutes(minutes);
}

#[tokio::test]
async fn test_distance_overflow_is_a_client_error() {
    let state = AppState::default();
    let request = GraphRequest {
        edges: vec![
            edge("a", "b", i64::MAX),
            edge("b", "c", i64::MAX),
            edge("c", "d", i64::MAX),
        ],
    };
    let id = new_session(&state, request).await;

    let (status, Json(body)) = find_path(State(state.clone()), Path(id), Json(path_request("a", "d")))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.error, "distance_overflow");

    // 2 * i64::MAX still fits in u64
    let Json(response) = find_path(State(state.clone()), Path(id), Json(path_request("a", "c")))
        .await
        .unwrap();
    assert_eq!(response.distance, u64::MAX - 1);

    let Json(health) = health_check(State(state.clone())).await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.sessions, 1);
}

#[tokio::test]
async fn test_handlers_survive_a_poisoned_session_lock() {
    let state = AppState::default();
    let id = new_session(&state, example_request()).await;

    let sessions = state.sessions.clone();
    let _ = std::thread::spawn(move || {
        let _guard = sessions.lock().unwrap();
        panic!("handler panicked while holding the session lock");
    })
    .join();
    assert!(state.sessions.is_poisoned());

    let Json(health) = health_check(State(state.clone())).await.unwrap();
    assert_eq!(health.sessions, 1);

    let Json(response) = find_path(State(state.clone()), Path(id), Json(path_request("A", "E")))
        .await
        .unwrap();
    assert_eq!(response.distance, 20);
    new_session(&state, example_request()).await;
}

#[tokio::test]
async fn test_expired_session_is_pruned_to_free_a_slot() {
    let state = AppState::new(ServerConfig {
        max_sessions: 1,
        session_timeout_minutes: 30,
        ..Default::default()
    });
    let stale = new_session(&state, example_request()).await;

    // Idle for exactly the timeout counts as expired
    backdate(&state, stale, 30);
    let fresh = new_session(&state, example_request()).await;

    let Json(sessions) = list_sessions(State(state.clone())).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, fresh);

    let (status, _) = get_session(State(state.clone()), Path(stale)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_idle_session_below_timeout_keeps_its_slot() {
    let state = AppState::new(ServerConfig {
        max_sessions: 1,
        session_timeout_minutes: 30,
        ..Default::default()
    });
    let id = new_session(&state, example_request()).await;
    backdate(&state, id, 29);

    let (status, Json(body)) = create_graph(State(state.clone()), Json(example_request())).await.unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.error, "session_limit_reached");

    let Json(session) = get_session(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(session.id, id);
}

#[tokio::test]
async fn test_zero_timeout_never_prunes() {
    let state = AppState::new(ServerConfig {
        max_sessions: 1,
        session_timeout_minutes: 0,
        ..Default::default()
    });
    let id = new_session(&state, example_request()).await;
    backdate(&state, id, 60 * 24 * 365);

    let (status, _) = create_graph(State(state.clone()), Json(example_request())).await.unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(get_session(State(state.clone()), Path(id)).await.is_ok());
}
