use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::dijkstra::SearchStats;
use crate::graph::{Graph, UndirectedGraph};

/// One undirected edge as submitted by a client
///
/// Weights arrive signed so that a negative value can be rejected with a
/// proper error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: i64,
}

/// Body for creating a graph or extending an existing one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphRequest {
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Represents a node in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: String,
    pub degree: usize,
}

/// Represents an edge in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Represents a complete graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

impl From<&UndirectedGraph<u64>> for WebGraph {
    fn from(graph: &UndirectedGraph<u64>) -> Self {
        let nodes = graph
            .node_names()
            .filter_map(|name| graph.get_node(name))
            .map(|node| WebNode {
                id: node.name().to_string(),
                degree: node.degree(),
            })
            .collect();

        let links = graph
            .edges()
            .map(|(source, target, weight)| WebEdge {
                source: source.to_string(),
                target: target.to_string(),
                weight,
            })
            .collect();

        WebGraph { nodes, links }
    }
}

/// Parameters for a shortest path query
#[derive(Debug, Clone, Deserialize)]
pub struct PathRequest {
    pub source: String,
    pub destination: String,
}

/// Response containing a shortest path query result
#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    pub execution_id: Uuid,
    pub source: String,
    pub destination: String,
    pub path: Vec<String>,
    pub distance: u64,
    pub hops: usize,
    pub execution_time_ms: f64,
    pub stats: SearchStats,
    pub computed_at: DateTime<Utc>,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions: usize,
}

/// Session containing a graph and its query history
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub graph: UndirectedGraph<u64>,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub queries_run: usize,
    pub last_result: Option<PathResponse>,
}

impl Session {
    pub fn new(graph: UndirectedGraph<u64>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            graph,
            created_at: now,
            last_accessed: now,
            queries_run: 0,
            last_result: None,
        }
    }

    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }

    /// A zero timeout never expires
    pub fn is_expired(&self, now: DateTime<Utc>, timeout_minutes: u64) -> bool {
        if timeout_minutes == 0 {
            return false;
        }
        let idle = (now - self.last_accessed).num_minutes();
        idle >= i64::try_from(timeout_minutes).unwrap_or(i64::MAX)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            node_count: self.graph.vertex_count(),
            edge_count: self.graph.edge_count(),
            created_at: self.created_at,
            last_accessed: self.last_accessed,
            queries_run: self.queries_run,
            last_result: self.last_result.clone(),
        }
    }
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub node_count: usize,
    pub edge_count: usize,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub queries_run: usize,
    pub last_result: Option<PathResponse>,
}
