use std::sync::Arc;

use geo::{Coord, LineString};

use super::{Locale, LocalizedText, Stop, VertexId};

#[derive(Debug, Clone, PartialEq)]
pub struct BikeRentalStation {
    pub id: String,
    pub name: LocalizedText,
    pub coord: Coord<f64>,
}

/// What kind of place a vertex is. Carried explicitly so that places and
/// exit labels never depend on inspecting the graph type.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexKind {
    /// Plain street intersection or split point.
    Street,
    /// Highway or building exit carrying a signposted label.
    Exit { exit_name: String },
    /// Transit stop (or platform) vertex.
    Transit { stop: Arc<Stop> },
    BikeShare { station: Arc<BikeRentalStation> },
    BikePark,
    /// Origin of a path that starts aboard a vehicle.
    OnboardDepart,
}

/// A street leaving a vertex. Used to decide whether a turn at the vertex
/// needs an explicit instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingStreet {
    pub name: LocalizedText,
    pub geometry: Option<LineString<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
    pub name: Option<LocalizedText>,
    pub coord: Coord<f64>,
    pub kind: VertexKind,
    pub outgoing_streets: Vec<OutgoingStreet>,
}

impl Vertex {
    pub fn new(id: VertexId, coord: Coord<f64>, kind: VertexKind) -> Self {
        Self {
            id,
            label: format!("vertex:{}", id.0),
            name: None,
            coord,
            kind,
            outgoing_streets: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<LocalizedText>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_outgoing(mut self, name: impl Into<LocalizedText>, geometry: LineString<f64>) -> Self {
        self.outgoing_streets.push(OutgoingStreet {
            name: name.into(),
            geometry: Some(geometry),
        });
        self
    }

    /// Localized name, falling back to the label for unnamed vertices.
    pub fn display_name(&self, locale: &Locale) -> String {
        self.name
            .as_ref()
            .map_or_else(|| self.label.clone(), |name| name.to_locale(locale).to_owned())
    }

    pub fn stop(&self) -> Option<&Arc<Stop>> {
        match &self.kind {
            VertexKind::Transit { stop } => Some(stop),
            _ => None,
        }
    }

    pub fn exit_name(&self) -> Option<&str> {
        match &self.kind {
            VertexKind::Exit { exit_name } => Some(exit_name),
            _ => None,
        }
    }

    pub fn x(&self) -> f64 {
        self.coord.x
    }

    pub fn y(&self) -> f64 {
        self.coord.y
    }
}
