//! The search result handed to the renderer.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use super::{Edge, Trip, TripTimes, TraverseMode, Vertex};
use crate::Error;

/// The vehicle trip a waypoint was reached aboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRef {
    pub trip: Arc<Trip>,
    pub service_date: Option<NaiveDate>,
    pub trip_times: Option<Arc<TripTimes>>,
}

/// One point reached along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub vertex: Arc<Vertex>,
    /// Seconds since the start of the path.
    pub elapsed_seconds: i64,
    /// Mode of the edge that reached this waypoint; absent on the first one.
    pub back_mode: Option<TraverseMode>,
    pub trip: Option<TripRef>,
    /// Headsign in effect when this waypoint was reached.
    pub back_direction: Option<String>,
    pub active_duration_seconds: i64,
    /// Meters walked since the start of the path.
    pub walk_distance: f64,
    pub num_boardings: u32,
    pub bike_renting: bool,
    /// The previous vertex offered more than one plausible way forward.
    pub multiple_options_before: bool,
}

impl Waypoint {
    pub fn new(vertex: Arc<Vertex>, elapsed_seconds: i64) -> Self {
        Self {
            vertex,
            elapsed_seconds,
            back_mode: None,
            trip: None,
            back_direction: None,
            active_duration_seconds: elapsed_seconds,
            walk_distance: 0.0,
            num_boardings: 0,
            bike_renting: false,
            multiple_options_before: false,
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: TraverseMode) -> Self {
        self.back_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn on_trip(mut self, trip: TripRef) -> Self {
        self.trip = Some(trip);
        self
    }

    #[must_use]
    pub fn back_direction(mut self, headsign: impl Into<String>) -> Self {
        self.back_direction = Some(headsign.into());
        self
    }

    #[must_use]
    pub fn walk_distance(mut self, meters: f64) -> Self {
        self.walk_distance = meters;
        self
    }

    #[must_use]
    pub fn boardings(mut self, count: u32) -> Self {
        self.num_boardings = count;
        self
    }

    #[must_use]
    pub fn renting_bike(mut self) -> Self {
        self.bike_renting = true;
        self
    }

    #[must_use]
    pub fn with_options_before(mut self) -> Self {
        self.multiple_options_before = true;
        self
    }

    /// Back mode, unless it is a leg switch.
    pub fn travel_mode(&self) -> Option<TraverseMode> {
        self.back_mode.filter(|&mode| mode != TraverseMode::LegSwitch)
    }
}

/// Ordered waypoints plus the edges traversed between them:
/// `edges[i]` leads from `waypoints[i]` to `waypoints[i + 1]`.
#[derive(Debug, Clone)]
pub struct Path {
    pub waypoints: Vec<Waypoint>,
    pub edges: Vec<Arc<Edge>>,
    pub start_time: DateTime<Utc>,
    pub time_zone: Tz,
}

impl Path {
    /// Builds a path and checks its structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPath`] if the edges do not chain the
    /// waypoints.
    pub fn new(
        start_time: DateTime<Utc>,
        time_zone: Tz,
        waypoints: Vec<Waypoint>,
        edges: Vec<Arc<Edge>>,
    ) -> Result<Self, Error> {
        let path = Self {
            waypoints,
            edges,
            start_time,
            time_zone,
        };
        path.validate()?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.waypoints.is_empty() {
            return Err(Error::MalformedPath("path has no waypoints".to_string()));
        }
        if self.edges.len() + 1 != self.waypoints.len() {
            return Err(Error::MalformedPath(format!(
                "{} waypoints need {} edges, got {}",
                self.waypoints.len(),
                self.waypoints.len() - 1,
                self.edges.len()
            )));
        }
        for (index, edge) in self.edges.iter().enumerate() {
            let from = self.waypoints[index].vertex.id;
            let to = self.waypoints[index + 1].vertex.id;
            if edge.from != from || edge.to != to {
                return Err(Error::MalformedPath(format!(
                    "edge {:?} at position {index} connects {:?} -> {:?}, \
                     but waypoints are at {from:?} -> {to:?}",
                    edge.id, edge.from, edge.to
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Edge traversed to reach the waypoint at `index`.
    pub fn back_edge(&self, index: usize) -> Option<&Edge> {
        index
            .checked_sub(1)
            .and_then(|prev| self.edges.get(prev))
            .map(Arc::as_ref)
    }

    /// Absolute time the waypoint at `index` is reached.
    pub fn instant(&self, index: usize) -> DateTime<Utc> {
        self.start_time + TimeDelta::seconds(self.waypoints[index].elapsed_seconds)
    }

    /// Wall-clock time of the waypoint at `index` in the path's time zone.
    pub fn wall_clock(&self, index: usize) -> DateTime<Tz> {
        self.time_zone
            .from_utc_datetime(&self.instant(index).naive_utc())
    }

    /// Seconds spent reaching the waypoint at `index` from the previous one.
    pub fn time_delta(&self, index: usize) -> i64 {
        match index.checked_sub(1) {
            Some(prev) => {
                (self.waypoints[index].elapsed_seconds - self.waypoints[prev].elapsed_seconds)
                    .abs()
            }
            None => 0,
        }
    }

    pub fn first(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    pub fn last(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }
}
