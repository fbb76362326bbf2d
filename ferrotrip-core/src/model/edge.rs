use std::sync::Arc;

use geo::{Coord, LineString};

use super::{BikeRentalStation, EdgeId, Locale, LocalizedText, TripPattern, VertexId};

/// Kind of an edge, matched exhaustively wherever the renderer treats edges
/// differently.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    Street,
    /// Open walkable area, such as a plaza, crossed as one edge.
    Area,
    /// Leaving an elevator; carries the destination floor label.
    ElevatorAlight { floor: LocalizedText },
    /// Staying aboard while the vehicle changes trip.
    InterlineDwell,
    /// Riding a transit pattern; `stop_index` is the pattern position the
    /// edge departs from.
    Pattern {
        pattern: Arc<TripPattern>,
        stop_index: usize,
    },
    /// Station pathway (stairs, corridors, fare gates).
    Pathway,
    RentalBegin { station: Arc<BikeRentalStation> },
    RentalEnd { station: Arc<BikeRentalStation> },
    /// Zero-cost connector with no physical extent.
    Free,
    /// Link between the street network and a transit stop.
    TransitLink,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub kind: EdgeKind,
    pub name: LocalizedText,
    /// The name was synthesized ("path", "road") rather than taken from data.
    pub bogus_name: bool,
    /// Length in meters.
    pub distance: f64,
    pub geometry: Option<LineString<f64>>,
    pub roundabout: bool,
    /// Ramp or slip road class.
    pub link: bool,
    /// `x` is the distance along the edge, `y` the elevation, both in meters.
    pub elevation_profile: Option<Vec<Coord<f64>>>,
}

impl Edge {
    pub fn new(id: EdgeId, from: VertexId, to: VertexId, kind: EdgeKind) -> Self {
        Self {
            id,
            from,
            to,
            kind,
            name: LocalizedText::default(),
            bogus_name: false,
            distance: 0.0,
            geometry: None,
            roundabout: false,
            link: false,
            elevation_profile: None,
        }
    }

    pub fn street(
        id: EdgeId,
        from: VertexId,
        to: VertexId,
        name: impl Into<LocalizedText>,
        distance: f64,
        geometry: LineString<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            distance,
            geometry: Some(geometry),
            ..Self::new(id, from, to, EdgeKind::Street)
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<LocalizedText>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: LineString<f64>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    #[must_use]
    pub fn with_elevation(mut self, profile: Vec<Coord<f64>>) -> Self {
        self.elevation_profile = Some(profile);
        self
    }

    #[must_use]
    pub fn roundabout(mut self) -> Self {
        self.roundabout = true;
        self
    }

    #[must_use]
    pub fn link(mut self) -> Self {
        self.link = true;
        self
    }

    #[must_use]
    pub fn bogus_name(mut self) -> Self {
        self.bogus_name = true;
        self
    }

    pub fn name(&self, locale: &Locale) -> &str {
        self.name.to_locale(locale)
    }

    /// Street-network edge whose geometry and elevation describe real ground.
    pub fn is_street(&self) -> bool {
        match self.kind {
            EdgeKind::Street | EdgeKind::Area => true,
            EdgeKind::ElevatorAlight { .. }
            | EdgeKind::InterlineDwell
            | EdgeKind::Pattern { .. }
            | EdgeKind::Pathway
            | EdgeKind::RentalBegin { .. }
            | EdgeKind::RentalEnd { .. }
            | EdgeKind::Free
            | EdgeKind::TransitLink => false,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.kind, EdgeKind::Free)
    }

    pub fn is_interline_dwell(&self) -> bool {
        matches!(self.kind, EdgeKind::InterlineDwell)
    }

    /// Elevation samples, present only on street edges.
    pub fn elevation(&self) -> Option<&[Coord<f64>]> {
        if self.is_street() {
            self.elevation_profile.as_deref()
        } else {
            None
        }
    }

    pub fn pattern(&self) -> Option<(&TripPattern, usize)> {
        match &self.kind {
            EdgeKind::Pattern {
                pattern,
                stop_index,
            } => Some((pattern.as_ref(), *stop_index)),
            _ => None,
        }
    }
}
