//! Read-through cache of the project's remote collections.
//!
//! Each collection is an independent slot keyed by (kind, project id) with
//! explicit invalidation edges: a point mutation marks points AND stations
//! stale, because stations embed resolved point values. Fetches carry a
//! monotonic sequence number; a completion whose seq is not the one issued
//! for its slot is discarded, so a slow stale response can never overwrite
//! a newer one.

use shared::{Layer, LayerId, Point, PointId, Project, ProjectId, Station};

use crate::api::{ApiError, ApiEvent, FetchPayload, FetchRequest, MutationAck};
use crate::state::notices::Notice;

/// One remotely-fetched collection
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Remote<T> {
    /// Never requested
    #[default]
    Idle,
    /// First request in flight, nothing to show yet
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Remote::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Cache collection kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Points,
    Stations,
    Layers,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Project,
        EntityKind::Points,
        EntityKind::Stations,
        EntityKind::Layers,
    ];

    /// Declared invalidation edges: marking a kind stale also marks these.
    /// Stations embed point values, so stale points imply stale stations.
    pub fn cascades_to(self) -> &'static [EntityKind] {
        match self {
            EntityKind::Points => &[EntityKind::Stations],
            _ => &[],
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    data: Remote<T>,
    stale: bool,
    in_flight: Option<u64>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot {
            data: Remote::Idle,
            stale: false,
            in_flight: None,
        }
    }
}

impl<T> Slot<T> {
    fn needs_fetch(&self) -> bool {
        self.in_flight.is_none() && (self.stale || matches!(self.data, Remote::Idle))
    }

    fn mark_issued(&mut self, seq: u64) {
        self.in_flight = Some(seq);
        if matches!(self.data, Remote::Idle) {
            self.data = Remote::Loading;
        }
    }
}

/// The scene's remote data, one project at a time
#[derive(Debug)]
pub struct SceneCache {
    pub project_id: ProjectId,
    project: Slot<Project>,
    points: Slot<Vec<Point>>,
    stations: Slot<Vec<Station>>,
    layers: Slot<Vec<Layer>>,
    /// Layer receiving drawn segments
    pub active_layer_id: Option<LayerId>,
    next_seq: u64,
}

impl SceneCache {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            project: Slot::default(),
            points: Slot::default(),
            stations: Slot::default(),
            layers: Slot::default(),
            active_layer_id: None,
            next_seq: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn project(&self) -> &Remote<Project> {
        &self.project.data
    }

    pub fn points(&self) -> &Remote<Vec<Point>> {
        &self.points.data
    }

    pub fn stations(&self) -> &Remote<Vec<Station>> {
        &self.stations.data
    }

    pub fn layers(&self) -> &Remote<Vec<Layer>> {
        &self.layers.data
    }

    /// Loaded points, or an empty slice while loading/failed
    pub fn loaded_points(&self) -> &[Point] {
        self.points.data.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn loaded_stations(&self) -> &[Station] {
        self.stations.data.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn loaded_layers(&self) -> &[Layer] {
        self.layers.data.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    /// The layer new segments are appended to
    pub fn active_layer(&self) -> Option<&Layer> {
        let id = self.active_layer_id?;
        self.loaded_layers().iter().find(|l| l.id == id)
    }

    /// Local echo of a drag in progress: the marker follows the cursor and
    /// stays put after drag-end until the authoritative refetch lands.
    pub fn set_point_xy(&mut self, id: PointId, x: f64, y: f64) {
        if let Remote::Loaded(points) = &mut self.points.data {
            if let Some(point) = points.iter_mut().find(|p| p.id == id) {
                point.x = x;
                point.y = y;
            }
        }
    }

    // ── Invalidation + fetching ───────────────────────────────

    /// Mark a collection stale, cascading along the declared edges
    pub fn invalidate(&mut self, kind: EntityKind) {
        self.mark_stale(kind);
        for &dependent in kind.cascades_to() {
            self.mark_stale(dependent);
        }
    }

    fn mark_stale(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Project => self.project.stale = true,
            EntityKind::Points => self.points.stale = true,
            EntityKind::Stations => self.stations.stale = true,
            EntityKind::Layers => self.layers.stale = true,
        }
    }

    /// Collections that need a (re)fetch right now. Each returned request is
    /// recorded as in-flight; at most one request per kind is outstanding.
    pub fn pending_fetches(&mut self) -> Vec<FetchRequest> {
        let mut requests = Vec::new();
        for kind in EntityKind::ALL {
            let needs = match kind {
                EntityKind::Project => self.project.needs_fetch(),
                EntityKind::Points => self.points.needs_fetch(),
                EntityKind::Stations => self.stations.needs_fetch(),
                EntityKind::Layers => self.layers.needs_fetch(),
            };
            if !needs {
                continue;
            }
            let seq = self.next_seq;
            self.next_seq += 1;
            match kind {
                EntityKind::Project => self.project.mark_issued(seq),
                EntityKind::Points => self.points.mark_issued(seq),
                EntityKind::Stations => self.stations.mark_issued(seq),
                EntityKind::Layers => self.layers.mark_issued(seq),
            }
            requests.push(FetchRequest {
                kind,
                project_id: self.project_id,
                seq,
            });
        }
        requests
    }

    /// Latest issued sequence number for a kind (None if never fetched)
    pub fn in_flight_seq(&self, kind: EntityKind) -> Option<u64> {
        match kind {
            EntityKind::Project => self.project.in_flight,
            EntityKind::Points => self.points.in_flight,
            EntityKind::Stations => self.stations.in_flight,
            EntityKind::Layers => self.layers.in_flight,
        }
    }

    // ── Event application ─────────────────────────────────────

    /// Fold a completion into the cache. Returns a notice when the user
    /// should hear about it.
    pub fn apply(&mut self, event: ApiEvent) -> Option<Notice> {
        match event {
            ApiEvent::Fetched { kind, seq, result } => self.apply_fetch(kind, seq, result),
            ApiEvent::Mutated { result } => self.apply_mutation(result),
        }
    }

    fn apply_fetch(
        &mut self,
        kind: EntityKind,
        seq: u64,
        result: Result<FetchPayload, ApiError>,
    ) -> Option<Notice> {
        if self.in_flight_seq(kind) != Some(seq) {
            tracing::debug!(?kind, seq, "discarding stale fetch completion");
            return None;
        }

        match (kind, result) {
            (EntityKind::Project, Ok(FetchPayload::Project(project))) => {
                self.project = loaded_slot(Remote::Loaded(project));
                None
            }
            (EntityKind::Points, Ok(FetchPayload::Points(points))) => {
                tracing::info!(count = points.len(), "points loaded");
                self.points = loaded_slot(Remote::Loaded(points));
                None
            }
            (EntityKind::Stations, Ok(FetchPayload::Stations(stations))) => {
                self.stations = loaded_slot(Remote::Loaded(stations));
                None
            }
            (EntityKind::Layers, Ok(FetchPayload::Layers(layers))) => {
                // Keep the active layer only while it still exists.
                if let Some(id) = self.active_layer_id {
                    if !layers.iter().any(|l| l.id == id) {
                        self.active_layer_id = None;
                    }
                }
                self.layers = loaded_slot(Remote::Loaded(layers));
                None
            }
            (kind, Err(err)) => self.apply_fetch_error(kind, err),
            (kind, Ok(payload)) => {
                tracing::warn!(?kind, "fetch completion with mismatched payload {payload:?}");
                None
            }
        }
    }

    fn apply_fetch_error(&mut self, kind: EntityKind, err: ApiError) -> Option<Notice> {
        tracing::warn!(?kind, %err, "fetch failed");
        match kind {
            // Optional subsystems degrade to an empty collection so the rest
            // of the scene keeps rendering.
            EntityKind::Stations => {
                if self.stations.data.loaded().is_none() {
                    self.stations = loaded_slot(Remote::Loaded(Vec::new()));
                } else {
                    self.stations = loaded_slot(std::mem::take(&mut self.stations.data));
                }
                Some(Notice::warn(format!("No se pudieron cargar las estaciones: {err}")))
            }
            EntityKind::Layers => {
                if self.layers.data.loaded().is_none() {
                    self.layers = loaded_slot(Remote::Loaded(Vec::new()));
                } else {
                    self.layers = loaded_slot(std::mem::take(&mut self.layers.data));
                }
                Some(Notice::warn(format!("No se pudieron cargar las capas: {err}")))
            }
            // Required collections block the scene.
            EntityKind::Project => {
                self.project = loaded_slot(keep_or_fail(std::mem::take(&mut self.project.data), &err));
                Some(Notice::error(format!("No se pudo cargar el proyecto: {err}")))
            }
            EntityKind::Points => {
                self.points = loaded_slot(keep_or_fail(std::mem::take(&mut self.points.data), &err));
                Some(Notice::error(format!("No se pudieron cargar los puntos: {err}")))
            }
        }
    }

    fn apply_mutation(&mut self, result: Result<MutationAck, ApiError>) -> Option<Notice> {
        match result {
            Ok(MutationAck::PointSaved(point)) => {
                tracing::info!(point = point.id, "point saved");
                self.invalidate(EntityKind::Points);
                None
            }
            Ok(MutationAck::LayerSaved(layer)) => {
                tracing::info!(layer = layer.id, "layer saved");
                self.invalidate(EntityKind::Layers);
                None
            }
            Ok(MutationAck::LayerCreated(layer)) => {
                tracing::info!(layer = layer.id, name = %layer.name, "layer created");
                // A freshly created layer becomes the drawing target when
                // none was chosen yet.
                if self.active_layer_id.is_none() {
                    self.active_layer_id = Some(layer.id);
                }
                self.invalidate(EntityKind::Layers);
                None
            }
            Err(err) => {
                tracing::error!(%err, "mutation failed");
                Some(Notice::error(format!("No se pudo guardar el cambio: {err}")))
            }
        }
    }
}

fn loaded_slot<T>(data: Remote<T>) -> Slot<T> {
    Slot {
        data,
        stale: false,
        in_flight: None,
    }
}

/// On a refetch failure keep what we had; only a first load becomes Failed.
fn keep_or_fail<T>(current: Remote<T>, err: &ApiError) -> Remote<T> {
    match current {
        Remote::Loaded(value) => Remote::Loaded(value),
        _ => Remote::Failed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::state::notices::NoticeLevel;

    fn drain(cache: &mut SceneCache) -> Vec<FetchRequest> {
        cache.pending_fetches()
    }

    fn seq_of(reqs: &[FetchRequest], kind: EntityKind) -> u64 {
        reqs.iter().find(|r| r.kind == kind).unwrap().seq
    }

    fn load_all(cache: &mut SceneCache) {
        let reqs = drain(cache);
        for req in reqs {
            let payload = match req.kind {
                EntityKind::Project => FetchPayload::Project(fixtures::project(cache.project_id, "Finca Norte")),
                EntityKind::Points => FetchPayload::Points(vec![fixtures::point(1, "BM1", 0.0, 0.0, 100.0)]),
                EntityKind::Stations => FetchPayload::Stations(vec![]),
                EntityKind::Layers => FetchPayload::Layers(vec![fixtures::layer(1, "Cercas", "#ff0000")]),
            };
            cache.apply(ApiEvent::Fetched {
                kind: req.kind,
                seq: req.seq,
                result: Ok(payload),
            });
        }
    }

    #[test]
    fn test_fresh_cache_wants_all_four_collections() {
        let mut cache = SceneCache::new(1);
        let reqs = drain(&mut cache);
        assert_eq!(reqs.len(), 4);
        // Issued requests are in flight; asking again issues nothing.
        assert!(drain(&mut cache).is_empty());
    }

    #[test]
    fn test_load_then_settled() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);
        assert_eq!(cache.loaded_points().len(), 1);
        assert!(cache.project().loaded().is_some());
        assert!(drain(&mut cache).is_empty());
    }

    #[test]
    fn test_point_mutation_invalidates_points_and_stations() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);

        let notice = cache.apply(ApiEvent::Mutated {
            result: Ok(MutationAck::PointSaved(fixtures::point(1, "BM1", 5.0, 5.0, 100.0))),
        });
        assert!(notice.is_none());

        let kinds: Vec<_> = drain(&mut cache).iter().map(|r| r.kind).collect();
        assert!(kinds.contains(&EntityKind::Points));
        assert!(kinds.contains(&EntityKind::Stations));
        assert!(!kinds.contains(&EntityKind::Layers));
        assert!(!kinds.contains(&EntityKind::Project));
    }

    #[test]
    fn test_layer_mutation_invalidates_layers_only() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);

        cache.apply(ApiEvent::Mutated {
            result: Ok(MutationAck::LayerSaved(fixtures::layer(1, "Cercas", "#ff0000"))),
        });
        let kinds: Vec<_> = drain(&mut cache).iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![EntityKind::Layers]);
    }

    #[test]
    fn test_stale_data_kept_while_refetching() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);
        cache.invalidate(EntityKind::Points);
        // The old points remain visible until the refetch lands.
        assert_eq!(cache.loaded_points().len(), 1);
        assert!(!drain(&mut cache).is_empty());
        assert_eq!(cache.loaded_points().len(), 1);
    }

    #[test]
    fn test_out_of_seq_completion_is_discarded() {
        let mut cache = SceneCache::new(1);
        let reqs = drain(&mut cache);
        let points_seq = seq_of(&reqs, EntityKind::Points);

        // A completion with a bogus seq (e.g. from an abandoned request)
        // must not land.
        cache.apply(ApiEvent::Fetched {
            kind: EntityKind::Points,
            seq: points_seq + 100,
            result: Ok(FetchPayload::Points(vec![fixtures::point(99, "X", 1.0, 1.0, 1.0)])),
        });
        assert!(cache.points().loaded().is_none());

        // The genuine completion still lands.
        cache.apply(ApiEvent::Fetched {
            kind: EntityKind::Points,
            seq: points_seq,
            result: Ok(FetchPayload::Points(vec![fixtures::point(1, "BM1", 0.0, 0.0, 0.0)])),
        });
        assert_eq!(cache.loaded_points().len(), 1);
    }

    #[test]
    fn test_optional_fetch_failure_degrades_to_empty() {
        let mut cache = SceneCache::new(1);
        let reqs = drain(&mut cache);

        let notice = cache.apply(ApiEvent::Fetched {
            kind: EntityKind::Stations,
            seq: seq_of(&reqs, EntityKind::Stations),
            result: Err(ApiError::Status {
                code: 404,
                message: "no stations".into(),
            }),
        });
        assert_eq!(notice.unwrap().level, NoticeLevel::Warn);
        // Degraded to an empty collection, not Failed: rendering continues.
        assert_eq!(cache.stations().loaded().map(Vec::len), Some(0));
    }

    #[test]
    fn test_required_fetch_failure_blocks() {
        let mut cache = SceneCache::new(1);
        let reqs = drain(&mut cache);

        let notice = cache.apply(ApiEvent::Fetched {
            kind: EntityKind::Points,
            seq: seq_of(&reqs, EntityKind::Points),
            result: Err(ApiError::Network("connection refused".into())),
        });
        assert_eq!(notice.unwrap().level, NoticeLevel::Error);
        assert!(cache.points().error().is_some());
    }

    #[test]
    fn test_refetch_failure_keeps_previous_points() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);
        cache.invalidate(EntityKind::Points);
        let reqs = drain(&mut cache);

        cache.apply(ApiEvent::Fetched {
            kind: EntityKind::Points,
            seq: seq_of(&reqs, EntityKind::Points),
            result: Err(ApiError::Network("timeout".into())),
        });
        // Previous authoritative data outlives a failed refresh.
        assert_eq!(cache.loaded_points().len(), 1);
    }

    #[test]
    fn test_mutation_failure_surfaces_error_notice() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);

        let notice = cache.apply(ApiEvent::Mutated {
            result: Err(ApiError::Status {
                code: 500,
                message: "boom".into(),
            }),
        });
        assert_eq!(notice.unwrap().level, NoticeLevel::Error);
        // No refetch forced; the data is simply unchanged.
        assert!(drain(&mut cache).is_empty());
    }

    #[test]
    fn test_created_layer_becomes_active_when_none_set() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);
        assert!(cache.active_layer_id.is_none());

        cache.apply(ApiEvent::Mutated {
            result: Ok(MutationAck::LayerCreated(fixtures::layer(8, "Bordes", "#00ff00"))),
        });
        assert_eq!(cache.active_layer_id, Some(8));
    }

    #[test]
    fn test_active_layer_cleared_when_layer_disappears() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);
        cache.active_layer_id = Some(1);

        cache.invalidate(EntityKind::Layers);
        let reqs = drain(&mut cache);
        cache.apply(ApiEvent::Fetched {
            kind: EntityKind::Layers,
            seq: seq_of(&reqs, EntityKind::Layers),
            result: Ok(FetchPayload::Layers(vec![])),
        });
        assert!(cache.active_layer_id.is_none());
    }

    #[test]
    fn test_local_point_echo() {
        let mut cache = SceneCache::new(1);
        load_all(&mut cache);
        cache.set_point_xy(1, 42.0, 43.0);
        assert_eq!(cache.loaded_points()[0].x, 42.0);
        assert_eq!(cache.loaded_points()[0].y, 43.0);
    }
}
