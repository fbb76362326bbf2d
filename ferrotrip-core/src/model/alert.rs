//! Service alerts and the lookup the renderer queries for them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;

use super::{Edge, EdgeId, LocalizedText, VertexId, Waypoint};

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: String,
    pub header: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub url: Option<LocalizedText>,
    pub effective_start: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn new(id: impl Into<String>, header: impl Into<LocalizedText>) -> Self {
        Self {
            id: id.into(),
            header: Some(header.into()),
            description: None,
            url: None,
            effective_start: None,
        }
    }
}

/// Half-open interval during which an alert patch is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// An alert attached to a transit pattern edge, optionally narrowed to one
/// trip.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertPatch {
    pub alert: Arc<Alert>,
    pub trip: Option<String>,
    /// No periods means always shown.
    pub periods: Vec<ActivePeriod>,
}

impl AlertPatch {
    pub fn display_during(&self, at: DateTime<Utc>) -> bool {
        self.periods.is_empty()
            || self
                .periods
                .iter()
                .any(|period| period.start <= at && at < period.end)
    }
}

/// Read-only alert lookup, shared by concurrent renders.
pub trait AlertService: Send + Sync {
    /// Street notes for a waypoint, reached over `back_edge`.
    fn street_notes(&self, waypoint: &Waypoint, back_edge: Option<&Edge>) -> Vec<Arc<Alert>>;

    /// Alert patches registered on an edge, regardless of their period.
    fn alert_patches(&self, edge: &Edge) -> Vec<Arc<AlertPatch>>;
}

/// Alert lookup for deployments without any alert feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAlerts;

impl AlertService for NoAlerts {
    fn street_notes(&self, _: &Waypoint, _: Option<&Edge>) -> Vec<Arc<Alert>> {
        Vec::new()
    }

    fn alert_patches(&self, _: &Edge) -> Vec<Arc<AlertPatch>> {
        Vec::new()
    }
}

/// In-memory alert lookup: street notes by vertex, patches by edge.
#[derive(Debug, Default, Clone)]
pub struct AlertIndex {
    notes: HashMap<VertexId, Vec<Arc<Alert>>>,
    patches: HashMap<EdgeId, Vec<Arc<AlertPatch>>>,
}

impl AlertIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_street_note(&mut self, vertex: VertexId, alert: Arc<Alert>) {
        self.notes.entry(vertex).or_default().push(alert);
    }

    pub fn add_alert_patch(&mut self, edge: EdgeId, patch: Arc<AlertPatch>) {
        self.patches.entry(edge).or_default().push(patch);
    }
}

impl AlertService for AlertIndex {
    fn street_notes(&self, waypoint: &Waypoint, _: Option<&Edge>) -> Vec<Arc<Alert>> {
        self.notes
            .get(&waypoint.vertex.id)
            .cloned()
            .unwrap_or_default()
    }

    fn alert_patches(&self, edge: &Edge) -> Vec<Arc<AlertPatch>> {
        self.patches.get(&edge.id).cloned().unwrap_or_default()
    }
}
