//! Renders search paths into passenger-facing itineraries: legs with
//! timing, geometry, transit details and alerts, plus turn-by-turn
//! instructions for the street legs.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod model;
pub mod plan;
pub mod prelude;
pub mod render;

pub use config::{PlanRequest, RenderConfig};
pub use error::Error;
pub use render::{RenderContext, generate_itinerary, generate_plan};
