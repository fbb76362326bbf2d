//! Input model consumed by the renderer.
//!
//! These types mirror what the upstream path search hands over: the
//! waypoints it reached, the edges it traversed and the read-only transit
//! and alert data hanging off them. The renderer borrows all of it and never
//! mutates it.

pub mod alert;
pub mod edge;
pub mod fare;
pub mod locale;
pub mod mode;
pub mod path;
pub mod transit;
pub mod vertex;

use serde::{Deserialize, Serialize};

pub use alert::{ActivePeriod, Alert, AlertIndex, AlertPatch, AlertService, NoAlerts};
pub use edge::{Edge, EdgeKind};
pub use fare::{Fare, FareService, FareType, Money};
pub use locale::{Locale, LocalizedText};
pub use mode::TraverseMode;
pub use path::{Path, TripRef, Waypoint};
pub use transit::{Agency, BoardAlightType, Route, Stop, Trip, TripPattern, TripTimes};
pub use vertex::{BikeRentalStation, OutgoingStreet, Vertex, VertexKind};

/// Identifier of a graph vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

/// Identifier of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);
