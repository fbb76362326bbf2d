//! Path-to-itinerary rendering.
//!
//! A path is sliced into legs ([`segmenter`]), each leg is built from its
//! waypoints ([`leg_builder`]), street legs are narrated into walk steps
//! ([`narrator`]) and the legs are stitched together into an itinerary
//! ([`assembler`]).

pub mod assembler;
pub mod leg_builder;
pub mod narrator;
pub mod segmenter;
pub mod to_geojson;

pub use assembler::{generate_itinerary, generate_plan};
pub use leg_builder::build_leg;
pub use narrator::{ZagCleanup, generate_walk_steps, remove_zag};
pub use segmenter::{LegRange, slice_path};

use crate::config::RenderConfig;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::model::{AlertService, FareService, NoAlerts};

/// Read-only collaborators shared by every render.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a RenderConfig,
    pub alerts: &'a dyn AlertService,
    pub fares: Option<&'a dyn FareService>,
    pub diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> RenderContext<'a> {
    /// No alerts, no fares, diagnostics forwarded to the log.
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            alerts: &NoAlerts,
            fares: None,
            diagnostics: &LogSink,
        }
    }

    #[must_use]
    pub fn with_alerts(mut self, alerts: &'a dyn AlertService) -> Self {
        self.alerts = alerts;
        self
    }

    #[must_use]
    pub fn with_fares(mut self, fares: &'a dyn FareService) -> Self {
        self.fares = Some(fares);
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
