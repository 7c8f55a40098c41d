//! HTTP client against the topography backend.
//!
//! Owns a background tokio runtime. Every call spawns a task and returns
//! immediately; completions come back over an `std::sync::mpsc` channel the
//! app drains once per frame. Requests are not cancellable and are never
//! retried — a failed mutation surfaces a notice and the user re-attempts
//! the gesture.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use shared::{Layer, Point, Project, Station};

use super::{ApiError, ApiEvent, FetchPayload, FetchRequest, MutationAck, MutationRequest};
use crate::state::scene::EntityKind;

type Waker = Arc<dyn Fn() + Send + Sync>;

pub struct ApiClient {
    base_url: String,
    runtime: tokio::runtime::Runtime,
    http: reqwest::Client,
    tx: Sender<ApiEvent>,
    rx: Receiver<ApiEvent>,
    /// Called after a completion is queued, to wake the UI loop
    waker: Option<Waker>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            runtime,
            http: reqwest::Client::new(),
            tx,
            rx,
            waker: None,
        })
    }

    /// Register a callback (e.g. `egui::Context::request_repaint`) invoked
    /// whenever a completion arrives.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    /// Drain completions queued since the last frame
    pub fn poll(&self) -> Vec<ApiEvent> {
        self.rx.try_iter().collect()
    }

    /// Issue a cache fetch. Fire-and-forget; the completion carries the
    /// request's seq so the cache can discard stale responses.
    pub fn fetch(&self, req: FetchRequest) {
        let url = match req.kind {
            EntityKind::Project => format!("{}/projects/{}", self.base_url, req.project_id),
            EntityKind::Points => format!("{}/points/project/{}", self.base_url, req.project_id),
            EntityKind::Stations => {
                format!("{}/stations/project/{}", self.base_url, req.project_id)
            }
            EntityKind::Layers => format!("{}/layers/project/{}", self.base_url, req.project_id),
        };
        tracing::debug!(kind = ?req.kind, seq = req.seq, %url, "fetch");

        let http = self.http.clone();
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        self.runtime.spawn(async move {
            let result = match req.kind {
                EntityKind::Project => get_json::<Project>(&http, &url)
                    .await
                    .map(FetchPayload::Project),
                EntityKind::Points => get_json::<Vec<Point>>(&http, &url)
                    .await
                    .map(FetchPayload::Points),
                EntityKind::Stations => get_json::<Vec<Station>>(&http, &url)
                    .await
                    .map(FetchPayload::Stations),
                EntityKind::Layers => get_json::<Vec<Layer>>(&http, &url)
                    .await
                    .map(FetchPayload::Layers),
            };
            let _ = tx.send(ApiEvent::Fetched {
                kind: req.kind,
                seq: req.seq,
                result,
            });
            wake(&waker);
        });
    }

    /// Issue a write. Completion invalidates the affected cache collections.
    pub fn dispatch(&self, req: MutationRequest) {
        let http = self.http.clone();
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        let base = self.base_url.clone();
        self.runtime.spawn(async move {
            let result = match req {
                MutationRequest::UpdatePoint { id, update } => {
                    let url = format!("{base}/points/{id}");
                    patch_json::<_, Point>(&http, &url, &update)
                        .await
                        .map(MutationAck::PointSaved)
                }
                MutationRequest::UpdateLayer { id, update } => {
                    let url = format!("{base}/layers/{id}");
                    patch_json::<_, Layer>(&http, &url, &update)
                        .await
                        .map(MutationAck::LayerSaved)
                }
                MutationRequest::CreateLayer(new_layer) => {
                    let url = format!("{base}/layers");
                    post_json::<_, Layer>(&http, &url, &new_layer)
                        .await
                        .map(MutationAck::LayerCreated)
                }
            };
            let _ = tx.send(ApiEvent::Mutated { result });
            wake(&waker);
        });
    }
}

fn wake(waker: &Option<Waker>) {
    if let Some(waker) = waker {
        waker();
    }
}

async fn get_json<T: DeserializeOwned>(http: &reqwest::Client, url: &str) -> Result<T, ApiError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(response).await
}

async fn patch_json<B: Serialize, T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = http
        .patch(url)
        .json(body)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = http
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            code: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
