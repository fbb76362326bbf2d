mod common;

use std::sync::Arc;

use chrono::Offset;
use geo::coord;
use itertools::Itertools;

use common::{PathBuilder, Ride, pattern, start_time, stop, transit_vertex};
use ferrotrip_core::model::{
    ActivePeriod, Fare, FareType, Money, TripTimes, VertexKind,
};
use ferrotrip_core::plan::VertexType;
use ferrotrip_core::prelude::*;

fn render(path: &Path) -> Result<Itinerary, Error> {
    let config = RenderConfig::default();
    generate_itinerary(path, &Locale::default(), false, &RenderContext::new(&config))
}

/// Walk to stop A, ride A-B-C on trip t1, stay aboard as the vehicle
/// becomes trip t2, ride C-D, walk away.
fn interlined_path() -> Path {
    let (a, b, c, d) = (
        stop("A", "Alpha"),
        stop("B", "Bravo"),
        stop("C", "Charlie"),
        stop("D", "Delta"),
    );
    let first = Ride::bus("t1", pattern("p1", vec![2, 0, 0], vec![0, 0, 3]));
    let second = Ride::bus("t2", pattern("p2", vec![2, 0], vec![0, 1]));
    let second_trip = second.trip_ref();

    PathBuilder::new(0.0, 0.0)
        .walk_to("Station Rd", 0.0, 0.001, transit_vertex(&a))
        .ride(&first, 0, &b, 0.0, 0.01, 120, |w| w.boardings(1))
        .ride(&first, 1, &c, 0.0, 0.02, 120, |w| w)
        .hop(
            0.0,
            0.02,
            60,
            TraverseMode::Bus,
            transit_vertex(&c),
            |e| Edge {
                kind: EdgeKind::InterlineDwell,
                geometry: None,
                distance: 0.0,
                ..e
            },
            |w| w.on_trip(second_trip),
        )
        .ride(&second, 0, &d, 0.0, 0.03, 120, |w| w)
        .walk("Harbour St", 0.001, 0.03)
        .build()
}

/// Walk to stop A, wait, ride A-B-C, walk away.
fn bus_path(ride: &Ride) -> Path {
    let (a, b, c) = (stop("A", "Alpha"), stop("B", "Bravo"), stop("C", "Charlie"));
    PathBuilder::new(0.0, 0.0)
        .walk_to("Station Rd", 0.0, 0.001, transit_vertex(&a))
        .wait(300)
        .ride(ride, 0, &b, 0.0, 0.01, 240, |w| w.boardings(1))
        .ride(ride, 1, &c, 0.0, 0.02, 240, |w| w)
        .walk("Harbour St", 0.001, 0.02)
        .build()
}

#[test]
fn interlined_legs_do_not_repeat_rules() {
    let itinerary = render(&interlined_path()).unwrap();
    let legs = &itinerary.legs;

    let modes: Vec<_> = legs.iter().map(|leg| leg.mode).collect();
    assert_eq!(
        modes,
        vec![
            TraverseMode::Walk,
            TraverseMode::Bus,
            TraverseMode::Bus,
            TraverseMode::Walk
        ]
    );

    assert!(!legs[1].interline_with_previous_leg);
    assert!(legs[2].interline_with_previous_leg);

    assert_eq!(legs[1].board_rule.as_deref(), Some("mustPhone"));
    assert_eq!(legs[1].alight_rule, None);
    assert_eq!(legs[2].board_rule, None);
    assert_eq!(legs[2].alight_rule.as_deref(), Some("impossible"));

    assert_eq!(legs[1].trip_id.as_deref(), Some("t1"));
    assert_eq!(legs[2].trip_id.as_deref(), Some("t2"));
    assert_eq!(legs[2].route, "42");
    assert_eq!(legs[2].headsign.as_deref(), Some("Airport"));
    assert_eq!(itinerary.transfers, 0);
}

#[test]
fn transit_places_carry_stop_details() {
    let itinerary = render(&interlined_path()).unwrap();
    let legs = &itinerary.legs;

    let from = &legs[1].from;
    assert_eq!(from.stop_id.as_deref(), Some("A"));
    assert_eq!(from.stop_index, Some(0));
    assert_eq!(from.stop_sequence, Some(1));
    assert_eq!(from.vertex_type, VertexType::Transit);
    assert_eq!(from.arrival, legs[0].to.arrival);

    let to = &legs[1].to;
    assert_eq!(to.stop_id.as_deref(), Some("C"));
    assert_eq!(to.stop_index, Some(2));
    assert_eq!(to.stop_sequence, Some(3));

    // street legs adopt the stop places of the transit legs they touch
    assert_eq!(legs[0].to.stop_id.as_deref(), Some("A"));
    assert_eq!(legs[3].from.stop_id.as_deref(), Some("D"));
    assert!(legs[0].from.arrival.is_none());
    assert!(legs[3].to.departure.is_none());
}

#[test]
fn segmentation_covers_the_path() {
    let ride = Ride::bus("t1", pattern("p1", vec![0, 0, 0], vec![0, 0, 0]));
    let paths = [
        PathBuilder::new(0.0, 0.0)
            .walk("Main St", 0.0, 0.001)
            .walk("Oak Ave", 0.001, 0.001)
            .build(),
        bus_path(&ride),
    ];

    for path in &paths {
        let ranges = slice_path(path).unwrap();
        assert_eq!(ranges.first().map(|r| r.0), Some(0));
        assert_eq!(ranges.last().map(|r| r.1), Some(path.len() - 1));
        for ((_, end), (start, _)) in ranges.iter().tuple_windows() {
            assert!(end <= start);
        }
    }

    let ranges = slice_path(&paths[1]).unwrap();
    // the wait at the stop belongs to no leg
    assert_eq!(ranges, vec![(0, 1), (2, 4), (4, 5)]);
}

#[test]
fn distance_is_conserved() {
    let path = interlined_path();
    let itinerary = render(&path).unwrap();

    let legs: f64 = itinerary.legs.iter().map(|leg| leg.distance).sum();
    let edges: f64 = path.edges.iter().map(|edge| edge.distance).sum();
    assert!((legs - edges).abs() < 1e-6);
}

#[test]
fn times_are_bucketed_by_mode() {
    let ride = Ride::bus("t1", pattern("p1", vec![0, 0, 0], vec![0, 0, 0]));
    let path = bus_path(&ride);
    let itinerary = render(&path).unwrap();

    let walk_seconds = path.waypoints[1].elapsed_seconds
        + (path.last().elapsed_seconds - path.waypoints[4].elapsed_seconds);
    assert_eq!(itinerary.waiting_time, 300);
    assert_eq!(itinerary.transit_time, 480);
    assert_eq!(itinerary.walk_time, walk_seconds);
    assert_eq!(
        itinerary.duration,
        itinerary.walk_time + itinerary.transit_time + itinerary.waiting_time
    );
}

#[test]
fn times_use_the_path_time_zone() {
    let path = PathBuilder::new(0.0, 0.0)
        .walk("Main St", 0.0, 0.001)
        .build();
    let itinerary = render(&path).unwrap();
    let leg = &itinerary.legs[0];

    // Berlin is on summer time in May
    assert_eq!(leg.start_time.offset().fix().local_minus_utc(), 7200);
    assert_eq!(leg.agency_time_zone_offset, 7_200_000);
    assert_eq!(leg.start_time, start_time());
    assert_eq!(itinerary.end_time, leg.end_time);
}

#[test]
fn intermediate_stops_skip_the_ends() {
    let ride = Ride::bus("t1", pattern("p1", vec![0, 0, 0], vec![0, 0, 0]));
    let path = bus_path(&ride);
    let config = RenderConfig::default();
    let itinerary =
        generate_itinerary(&path, &Locale::default(), true, &RenderContext::new(&config)).unwrap();

    let stops = itinerary.legs[1].intermediate_stops.as_ref().unwrap();
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].stop_id.as_deref(), Some("B"));
    assert_eq!(stops[0].stop_index, Some(1));
    assert!(itinerary.legs[0].intermediate_stops.as_ref().unwrap().is_empty());
}

#[test]
fn real_time_delays_at_boundary_stops() {
    let ride = Ride::bus("t1", pattern("p1", vec![0, 0, 0], vec![0, 0, 0])).with_trip_times(
        TripTimes {
            scheduled: false,
            arrival_delays: vec![0, 60, 120],
            departure_delays: vec![30, 60, 90],
            stop_sequences: vec![1, 2, 3],
        },
    );
    let itinerary = render(&bus_path(&ride)).unwrap();
    let leg = &itinerary.legs[1];

    assert!(leg.real_time);
    assert_eq!(leg.departure_delay, 30);
    assert_eq!(leg.arrival_delay, 120);
    assert!(!itinerary.legs[0].real_time);
}

#[test]
fn transfers_discount_first_boarding_unless_onboard() {
    let ride = Ride::bus("t1", pattern("p1", vec![0, 0], vec![0, 0]));
    let b = stop("B", "Bravo");
    let build = |kind: VertexKind| {
        PathBuilder::from_vertex(0.0, 0.0, |v| Vertex { kind, ..v })
            .ride(&ride, 0, &b, 0.0, 0.01, 300, |w| w.boardings(2))
            .build()
    };

    let onboard = render(&build(VertexKind::OnboardDepart)).unwrap();
    assert_eq!(onboard.transfers, 2);
    let street = render(&build(VertexKind::Street)).unwrap();
    assert_eq!(street.transfers, 1);
}

#[test]
fn elevation_gain_and_loss() {
    let path = PathBuilder::new(0.0, 0.0)
        .walk_edge(0.0, 0.0001, |e| {
            e.with_name("Hill Rd").with_elevation(vec![
                coord! { x: 0.0, y: 10.0 },
                coord! { x: 5.0, y: 15.0 },
                coord! { x: 10.0, y: 12.0 },
            ])
        })
        .build();
    let itinerary = render(&path).unwrap();

    assert_eq!(itinerary.elevation_gained, 5.0);
    assert_eq!(itinerary.elevation_lost, 3.0);
    assert_eq!(
        itinerary.legs[0].steps[0].elevation,
        vec![(0.0, 10.0), (5.0, 15.0), (10.0, 12.0)]
    );
}

#[test]
fn trivial_path_is_an_error() {
    let path = PathBuilder::new(0.0, 0.0).wait(60).wait(60).build();
    assert_eq!(render(&path), Err(Error::TrivialPath));
}

#[test]
fn malformed_path_is_an_error() {
    let (waypoints, mut edges) = PathBuilder::new(0.0, 0.0)
        .walk("Main St", 0.0, 0.001)
        .walk("Main St", 0.0, 0.002)
        .into_parts();
    edges.pop();
    let path = Path {
        waypoints,
        edges,
        start_time: start_time(),
        time_zone: chrono_tz::UTC,
    };

    assert!(matches!(render(&path), Err(Error::MalformedPath(_))));
}

#[test]
fn disconnected_edge_is_rejected() {
    let (waypoints, mut edges) = PathBuilder::new(0.0, 0.0)
        .walk("Main St", 0.0, 0.001)
        .walk("Main St", 0.0, 0.002)
        .into_parts();
    edges.swap(0, 1);

    let result = Path::new(start_time(), chrono_tz::UTC, waypoints, edges);
    assert!(matches!(result, Err(Error::MalformedPath(_))));
}

#[test]
fn missing_geometry_is_reported_not_fatal() {
    let path = PathBuilder::new(0.0, 0.0)
        .walk("Main St", 0.0, 0.001)
        .walk_edge(0.0, 0.002, |e| Edge {
            geometry: None,
            ..e.with_name("Main St")
        })
        .build();
    let config = RenderConfig::default();
    let sink = CollectingSink::new();
    let ctx = RenderContext::new(&config).with_diagnostics(&sink);

    let itinerary = generate_itinerary(&path, &Locale::default(), false, &ctx).unwrap();

    assert_eq!(
        sink.diagnostics(),
        vec![Diagnostic::MissingGeometry {
            edge: EdgeId(1),
            leg_index: 0
        }]
    );
    let leg = &itinerary.legs[0];
    assert_eq!(leg.leg_geometry.length, 2);
    assert_eq!(leg.steps.len(), 1);
    let total: f64 = path.edges.iter().map(|edge| edge.distance).sum();
    assert!((leg.distance - total).abs() < 1e-9);
}

#[test]
fn alerts_are_localized_and_filtered_by_trip() {
    let ride = Ride::bus("t1", pattern("p1", vec![0, 0, 0], vec![0, 0, 0]));
    let path = bus_path(&ride);

    let mut alerts = AlertIndex::new();
    let closure = Arc::new(Alert {
        header: Some(LocalizedText::new("Sidewalk closed").with_translation("de", "Gehweg gesperrt")),
        ..Alert::new("closure", "Sidewalk closed")
    });
    alerts.add_street_note(path.waypoints[1].vertex.id, Arc::clone(&closure));
    for (id, trip) in [("detour", Some("t1")), ("other-trip", Some("t9")), ("pattern", None)] {
        alerts.add_alert_patch(
            path.edges[2].id,
            Arc::new(AlertPatch {
                alert: Arc::new(Alert::new(id, id)),
                trip: trip.map(str::to_string),
                periods: Vec::new(),
            }),
        );
    }
    alerts.add_alert_patch(
        path.edges[3].id,
        Arc::new(AlertPatch {
            alert: Arc::new(Alert::new("expired", "expired")),
            trip: None,
            periods: vec![ActivePeriod {
                start: start_time() - chrono::TimeDelta::hours(2),
                end: start_time() - chrono::TimeDelta::hours(1),
            }],
        }),
    );

    let config = RenderConfig::default();
    let ctx = RenderContext::new(&config).with_alerts(&alerts);
    let itinerary = generate_itinerary(&path, &Locale::new("de-DE"), false, &ctx).unwrap();

    let walk = &itinerary.legs[0];
    assert_eq!(walk.alerts.len(), 1);
    assert_eq!(
        walk.alerts[0].alert_header_text.as_deref(),
        Some("Gehweg gesperrt")
    );
    assert_eq!(walk.steps[0].alerts, walk.alerts);

    let ids: Vec<_> = itinerary.legs[1]
        .alerts
        .iter()
        .map(|alert| alert.id.as_str())
        .collect();
    assert_eq!(ids, vec!["detour", "pattern"]);
}

struct FlatFare;

impl FareService for FlatFare {
    fn cost(&self, path: &Path) -> Option<Fare> {
        path.last().trip.as_ref()?;
        let mut fare = Fare::default();
        fare.add_fare(
            FareType::Regular,
            Money {
                currency: "EUR".into(),
                cents: 290,
            },
        );
        Some(fare)
    }
}

#[test]
fn fare_comes_from_the_fare_service() {
    let ride = Ride::bus("t1", pattern("p1", vec![0, 0, 0], vec![0, 0, 0]));
    let config = RenderConfig::default();
    let ctx = RenderContext::new(&config).with_fares(&FlatFare);

    let walk_only = PathBuilder::new(0.0, 0.0)
        .walk("Main St", 0.0, 0.001)
        .build();
    let itinerary = generate_itinerary(&walk_only, &Locale::default(), false, &ctx).unwrap();
    assert_eq!(itinerary.fare, None);

    let transit_path = PathBuilder::new(0.0, 0.0)
        .walk_to("Station Rd", 0.0, 0.001, transit_vertex(&stop("A", "Alpha")))
        .ride(&ride, 0, &stop("B", "Bravo"), 0.0, 0.01, 300, |w| w)
        .build();
    let itinerary = generate_itinerary(&transit_path, &Locale::default(), false, &ctx).unwrap();
    let fare = itinerary.fare.unwrap();
    assert_eq!(fare.get(FareType::Regular).map(|m| m.cents), Some(290));
}

#[test]
fn serializes_to_camel_case_document() {
    let path = PathBuilder::new(0.0, 0.0)
        .walk("Main St", 0.0, 0.001)
        .build();
    let itinerary = render(&path).unwrap();
    let value = serde_json::to_value(&itinerary).unwrap();

    assert!(value.get("walkDistance").is_some());
    assert_eq!(value["legs"][0]["mode"], "WALK");
    assert_eq!(value["legs"][0]["steps"][0]["relativeDirection"], "DEPART");
    assert_eq!(value["legs"][0]["steps"][0]["absoluteDirection"], "NORTH");
    assert_eq!(value["legs"][0]["legGeometry"]["length"], 2);
    assert!(value["legs"][0]["steps"][0].get("edges").is_none());
}

#[test]
fn plan_flags_long_walks_and_names_endpoints() {
    let short = PathBuilder::new(0.0, 0.0)
        .walk("Main St", 0.0, 0.001)
        .build();
    let long = PathBuilder::new(0.0, 0.0)
        .walk("Main St", 0.0, 0.001)
        .walk("Main St", 0.0, 0.01)
        .build();
    let request = PlanRequest::new(chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        .with_max_walk_distance(500.0)
        .with_place_names("Home", "Work");
    let config = RenderConfig::default();

    let plan = generate_plan(&[short, long], &request, &RenderContext::new(&config)).unwrap();

    assert_eq!(plan.itineraries.len(), 2);
    assert!(!plan.itineraries[0].walk_limit_exceeded);
    assert!(plan.itineraries[1].walk_limit_exceeded);
    assert_eq!(plan.from.orig.as_deref(), Some("Home"));
    assert_eq!(plan.to.orig.as_deref(), Some("Work"));
    for itinerary in &plan.itineraries {
        assert_eq!(itinerary.legs[0].from.orig.as_deref(), Some("Home"));
        assert_eq!(itinerary.legs[0].to.orig.as_deref(), Some("Work"));
    }
}

#[test]
fn plan_needs_at_least_one_path() {
    let request = PlanRequest::new(chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    let config = RenderConfig::default();

    let result = generate_plan(&[], &request, &RenderContext::new(&config));
    assert!(matches!(result, Err(Error::MalformedPath(_))));
}
