//! Synthetic path fixtures.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use geo::{Coord, Distance, Haversine, LineString, Point, coord};

use ferrotrip_core::model::{
    Agency, Edge, EdgeId, EdgeKind, Path, Route, Stop, TraverseMode, Trip, TripPattern, TripRef,
    TripTimes, Vertex, VertexId, VertexKind, Waypoint,
};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

/// Appends waypoints one hop at a time. Every hop gets a fresh vertex and
/// a straight edge from the previous vertex; closures adjust the defaults.
pub struct PathBuilder {
    waypoints: Vec<Waypoint>,
    edges: Vec<Arc<Edge>>,
    elapsed: i64,
}

impl PathBuilder {
    pub fn new(x: f64, y: f64) -> Self {
        Self::from_vertex(x, y, |vertex| vertex)
    }

    pub fn from_vertex(x: f64, y: f64, vertex: impl FnOnce(Vertex) -> Vertex) -> Self {
        let origin = vertex(Vertex::new(
            VertexId(0),
            coord! { x: x, y: y },
            VertexKind::Street,
        ));
        Self {
            waypoints: vec![Waypoint::new(Arc::new(origin), 0)],
            edges: Vec::new(),
            elapsed: 0,
        }
    }

    fn here(&self) -> &Waypoint {
        self.waypoints.last().unwrap()
    }

    /// General hop. The default edge is a nameless street edge with a
    /// straight geometry and its haversine length; the default waypoint
    /// inherits the running counters of the previous one.
    pub fn hop(
        mut self,
        x: f64,
        y: f64,
        seconds: i64,
        mode: TraverseMode,
        vertex: impl FnOnce(Vertex) -> Vertex,
        edge: impl FnOnce(Edge) -> Edge,
        waypoint: impl FnOnce(Waypoint) -> Waypoint,
    ) -> Self {
        let index = self.waypoints.len();
        let previous = self.here().clone();
        let from: Coord<f64> = previous.vertex.coord;
        let to = coord! { x: x, y: y };
        let distance = Haversine.distance(Point::from(from), Point::from(to));

        let next_vertex = vertex(Vertex::new(VertexId(index), to, VertexKind::Street));
        let next_edge = edge(
            Edge::new(
                EdgeId(index - 1),
                previous.vertex.id,
                next_vertex.id,
                EdgeKind::Street,
            )
            .with_distance(distance)
            .with_geometry(LineString::new(vec![from, to])),
        );

        self.elapsed += seconds;
        let mut next = Waypoint::new(Arc::new(next_vertex), self.elapsed).mode(mode);
        next.walk_distance = previous.walk_distance;
        next.num_boardings = previous.num_boardings;
        if mode.is_on_street_non_transit() {
            next.walk_distance += next_edge.distance;
        }

        self.waypoints.push(waypoint(next));
        self.edges.push(Arc::new(next_edge));
        self
    }

    /// Walks a named street to `(x, y)` at 1 m/s.
    pub fn walk(self, name: &str, x: f64, y: f64) -> Self {
        let seconds = self.seconds_to(x, y);
        self.hop(x, y, seconds, TraverseMode::Walk, |v| v, |e| e.with_name(name), |w| w)
    }

    /// Walks a named street, overriding its recorded length.
    pub fn walk_exactly(self, name: &str, x: f64, y: f64, meters: f64) -> Self {
        self.hop(
            x,
            y,
            meters as i64,
            TraverseMode::Walk,
            |v| v,
            |e| e.with_name(name).with_distance(meters),
            |w| w,
        )
    }

    pub fn walk_edge(self, x: f64, y: f64, edge: impl FnOnce(Edge) -> Edge) -> Self {
        let seconds = self.seconds_to(x, y);
        self.hop(x, y, seconds, TraverseMode::Walk, |v| v, edge, |w| w)
    }

    /// Walks onto a new vertex.
    pub fn walk_to(self, name: &str, x: f64, y: f64, vertex: impl FnOnce(Vertex) -> Vertex) -> Self {
        let seconds = self.seconds_to(x, y);
        self.hop(x, y, seconds, TraverseMode::Walk, vertex, |e| e.with_name(name), |w| w)
    }

    /// Waits in place, e.g. for boarding.
    pub fn wait(self, seconds: i64) -> Self {
        let here = self.here().vertex.clone();
        self.hop(
            here.x(),
            here.y(),
            seconds,
            TraverseMode::LegSwitch,
            |v| Vertex { kind: here.kind.clone(), ..v },
            |e| Edge {
                kind: EdgeKind::TransitLink,
                geometry: None,
                distance: 0.0,
                ..e
            },
            |w| w,
        )
    }

    /// Rides a pattern from the current stop to a new stop.
    #[allow(clippy::too_many_arguments)]
    pub fn ride(
        self,
        ride: &Ride,
        stop_index: usize,
        stop: &Arc<Stop>,
        x: f64,
        y: f64,
        seconds: i64,
        waypoint: impl FnOnce(Waypoint) -> Waypoint,
    ) -> Self {
        let trip = ride.trip_ref();
        let pattern = Arc::clone(&ride.pattern);
        let stop = Arc::clone(stop);
        let route_name = ride.trip.route.short_name.clone().unwrap_or_default();
        self.hop(
            x,
            y,
            seconds,
            ride.mode,
            |v| Vertex {
                kind: VertexKind::Transit { stop },
                ..v
            },
            |e| Edge {
                kind: EdgeKind::Pattern {
                    pattern,
                    stop_index,
                },
                ..e
            }
            .with_name(route_name),
            |w| waypoint(w.on_trip(trip)),
        )
    }

    fn seconds_to(&self, x: f64, y: f64) -> i64 {
        let from = Point::from(self.here().vertex.coord);
        Haversine.distance(from, Point::new(x, y)).round() as i64
    }

    pub fn into_parts(self) -> (Vec<Waypoint>, Vec<Arc<Edge>>) {
        (self.waypoints, self.edges)
    }

    pub fn build(self) -> Path {
        Path::new(
            start_time(),
            chrono_tz::Europe::Berlin,
            self.waypoints,
            self.edges,
        )
        .unwrap()
    }
}

/// A transit trip along one pattern.
pub struct Ride {
    pub mode: TraverseMode,
    pub trip: Arc<Trip>,
    pub pattern: Arc<TripPattern>,
    pub trip_times: Option<Arc<TripTimes>>,
}

impl Ride {
    pub fn bus(trip_id: &str, pattern: TripPattern) -> Self {
        let agency = Arc::new(Agency {
            id: "agency".into(),
            name: "City Transit".into(),
            url: Some("https://transit.example".into()),
        });
        let route = Arc::new(Route {
            id: "route-42".into(),
            agency,
            short_name: Some("42".into()),
            long_name: Some("Harbour - Airport".into()),
            color: Some("FF0000".into()),
            text_color: None,
            route_type: 3,
        });
        let trip = Arc::new(Trip {
            id: trip_id.into(),
            route,
            short_name: None,
            block_id: Some("block-1".into()),
            headsign: Some("Airport".into()),
        });
        let stops = pattern.board_types.len() as u32;
        Self {
            mode: TraverseMode::Bus,
            trip,
            pattern: Arc::new(pattern),
            trip_times: Some(Arc::new(TripTimes::scheduled((1..=stops).collect()))),
        }
    }

    pub fn with_trip_times(mut self, trip_times: TripTimes) -> Self {
        self.trip_times = Some(Arc::new(trip_times));
        self
    }

    pub fn trip_ref(&self) -> TripRef {
        TripRef {
            trip: Arc::clone(&self.trip),
            service_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
            trip_times: self.trip_times.clone(),
        }
    }
}

pub fn pattern(id: &str, board_types: Vec<i32>, alight_types: Vec<i32>) -> TripPattern {
    TripPattern {
        id: id.into(),
        board_types,
        alight_types,
    }
}

pub fn stop(id: &str, name: &str) -> Arc<Stop> {
    Arc::new(Stop::new(id, name))
}

pub fn transit_vertex(stop: &Arc<Stop>) -> impl FnOnce(Vertex) -> Vertex {
    let stop = Arc::clone(stop);
    move |v| Vertex {
        kind: VertexKind::Transit { stop },
        ..v
    }
}
