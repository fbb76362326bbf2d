pub use crate::Error;
pub use crate::config::{PlanRequest, RenderConfig};
pub use crate::diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, LogSink, NullSink};

// Input model
pub use crate::model::{
    Alert, AlertIndex, AlertPatch, AlertService, Edge, EdgeId, EdgeKind, FareService, Locale,
    LocalizedText, Path, TraverseMode, TripRef, Vertex, VertexId, VertexKind, Waypoint,
};

// Output model
pub use crate::plan::{
    AbsoluteDirection, Itinerary, Leg, Place, RelativeDirection, TripPlan, VertexType, WalkStep,
};

// Rendering
pub use crate::render::{
    RenderContext, generate_itinerary, generate_plan, generate_walk_steps, slice_path,
};
