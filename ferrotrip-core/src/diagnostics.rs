//! Sinks for data-quality notices raised while rendering.
//!
//! Rendering never fails on missing names, geometry or elevation. Such gaps
//! are reported here instead and the output falls back to defaults.

use std::sync::Mutex;

use crate::model::EdgeId;

/// A recoverable data-quality notice.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The edge has no geometry and was left out of the leg polyline or
    /// the narrative.
    MissingGeometry { edge: EdgeId, leg_index: usize },
    /// A street leg produced no walk steps.
    EmptyLeg { leg_index: usize },
    /// A rendered itinerary has no legs.
    NoLegs,
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::MissingGeometry { edge, leg_index } => {
                log::debug!("Edge {edge:?} in leg {leg_index} has no geometry, skipping it");
            }
            Diagnostic::EmptyLeg { leg_index } => {
                log::debug!("Street leg {leg_index} produced no walk steps");
            }
            Diagnostic::NoLegs => log::warn!("Itinerary has no legs"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _: Diagnostic) {}
}

/// Records diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    reported: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything reported so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.reported.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match self.reported.lock() {
            Ok(mut guard) => guard.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
