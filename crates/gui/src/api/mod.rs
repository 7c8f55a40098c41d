//! Backend protocol: request/completion types exchanged between the UI
//! thread and the HTTP client, plus the error taxonomy.
//!
//! The client is fire-and-forget: requests are spawned onto a background
//! runtime and completions come back as [`ApiEvent`]s on a channel polled
//! once per frame. Nothing here blocks the UI thread.

pub mod client;

use std::fmt;

use shared::{Layer, LayerId, LayerUpdate, NewLayer, Point, PointId, PointUpdate, Project, ProjectId, Station};

use crate::state::scene::EntityKind;

pub use client::ApiClient;

/// Why a backend call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, DNS)
    Network(String),
    /// Backend answered with a non-success status
    Status { code: u16, message: String },
    /// Response body did not match the expected shape
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Status { code, message } => write!(f, "HTTP {code}: {message}"),
            ApiError::Decode(msg) => write!(f, "bad response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// A read of one cache collection, tagged with the cache's sequence number
/// so stale completions can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub kind: EntityKind,
    pub project_id: ProjectId,
    pub seq: u64,
}

/// A write issued by a completed gesture
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest {
    UpdatePoint { id: PointId, update: PointUpdate },
    UpdateLayer { id: LayerId, update: LayerUpdate },
    CreateLayer(NewLayer),
}

/// Payload of a successful fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPayload {
    Project(Project),
    Points(Vec<Point>),
    Stations(Vec<Station>),
    Layers(Vec<Layer>),
}

/// Acknowledged mutation, carrying the backend's updated entity
#[derive(Debug, Clone, PartialEq)]
pub enum MutationAck {
    PointSaved(Point),
    LayerSaved(Layer),
    LayerCreated(Layer),
}

/// A completion delivered back to the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    Fetched {
        kind: EntityKind,
        seq: u64,
        result: Result<FetchPayload, ApiError>,
    },
    Mutated {
        result: Result<MutationAck, ApiError>,
    },
}
