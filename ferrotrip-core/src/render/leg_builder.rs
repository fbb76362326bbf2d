//! Builds one [`Leg`] from a waypoint range of a path.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset};
use geo::LineString;

use super::{LegRange, RenderContext};
use crate::Error;
use crate::diagnostics::Diagnostic;
use crate::geometry::{encode_polyline, make_coordinates};
use crate::model::{Edge, Locale, Path, TraverseMode, TripTimes, VertexKind};
use crate::plan::{Leg, LocalizedAlert, Place, VertexType};

/// Builds the leg spanning `range` of `path`.
///
/// Walk steps are not generated here; see
/// [`generate_walk_steps`](super::generate_walk_steps).
///
/// # Errors
///
/// Returns [`Error::Polyline`] if the leg geometry cannot be encoded.
pub fn build_leg(
    path: &Path,
    range: LegRange,
    leg_index: usize,
    locale: &Locale,
    show_intermediate_stops: bool,
    ctx: &RenderContext<'_>,
) -> Result<Leg, Error> {
    let (start, end) = range;
    let edges = &path.edges[start..end];

    let start_time = path.wall_clock(start);
    let agency_time_zone_offset = start_time.offset().fix().local_minus_utc() * 1000;

    for edge in edges {
        if edge.is_street() && edge.geometry.is_none() {
            ctx.diagnostics.report(Diagnostic::MissingGeometry {
                edge: edge.id,
                leg_index,
            });
        }
    }
    let coordinates = make_coordinates(edges.iter().map(Arc::as_ref));
    let leg_geometry = encode_polyline(&coordinates, ctx.config.polyline_precision)?;

    let first = &path.waypoints[start];
    let last = &path.waypoints[end];

    let (from, to, intermediate_stops) = add_places(path, range, locale, show_intermediate_stops);

    let mut leg = Leg {
        start_time: start_time.fixed_offset(),
        end_time: path.wall_clock(end).fixed_offset(),
        agency_time_zone_offset,
        departure_delay: 0,
        arrival_delay: 0,
        real_time: false,
        distance: edges.iter().map(|edge| edge.distance).sum(),
        pathway: false,
        mode: leg_mode(path, range),
        route: String::new(),
        interline_with_previous_leg: path
            .back_edge(start)
            .is_some_and(Edge::is_interline_dwell),
        rented_bike: first.bike_renting && last.bike_renting,
        agency_id: None,
        agency_name: None,
        agency_url: None,
        route_id: None,
        route_short_name: None,
        route_long_name: None,
        route_color: None,
        route_text_color: None,
        route_type: None,
        trip_id: None,
        trip_short_name: None,
        trip_block_id: None,
        headsign: None,
        service_date: None,
        board_rule: None,
        alight_rule: None,
        from,
        to,
        intermediate_stops,
        leg_geometry,
        geometry: LineString::new(coordinates),
        steps: Vec::new(),
        alerts: Vec::new(),
    };

    add_trip_fields(&mut leg, path, end, locale);
    add_alerts(&mut leg, path, range, locale, ctx);
    if leg.is_transit_leg() {
        add_real_time_data(&mut leg, path, end);
    }

    Ok(leg)
}

/// Mode of the last waypoint reached by actual travel.
fn leg_mode(path: &Path, (start, end): LegRange) -> TraverseMode {
    path.waypoints[start..=end]
        .iter()
        .rev()
        .find_map(|waypoint| waypoint.travel_mode())
        .unwrap_or(TraverseMode::Walk)
}

fn add_trip_fields(leg: &mut Leg, path: &Path, end: usize, locale: &Locale) {
    let last = &path.waypoints[end];
    let Some(trip_ref) = &last.trip else {
        return;
    };
    let trip = &trip_ref.trip;
    let route = &trip.route;
    let agency = &route.agency;

    leg.agency_id = Some(agency.id.clone());
    leg.agency_name = Some(agency.name.clone());
    leg.agency_url = agency.url.clone();
    leg.headsign = last
        .back_direction
        .clone()
        .or_else(|| trip.headsign.clone());
    leg.route = path
        .back_edge(end)
        .map(|edge| edge.name(locale).to_owned())
        .unwrap_or_default();
    leg.route_color = route.color.clone();
    leg.route_id = Some(route.id.clone());
    leg.route_long_name = route.long_name.clone();
    leg.route_short_name = route.short_name.clone();
    leg.route_text_color = route.text_color.clone();
    leg.route_type = Some(route.route_type);
    leg.trip_id = Some(trip.id.clone());
    leg.trip_short_name = trip.short_name.clone();
    leg.trip_block_id = trip.block_id.clone();
    leg.service_date = trip_ref.service_date;
}

fn add_alerts(
    leg: &mut Leg,
    path: &Path,
    (start, end): LegRange,
    locale: &Locale,
    ctx: &RenderContext<'_>,
) {
    for index in start..=end {
        let waypoint = &path.waypoints[index];
        let back_edge = path.back_edge(index);

        for alert in ctx.alerts.street_notes(waypoint, back_edge) {
            leg.add_alert(LocalizedAlert::new(&alert, locale));
        }

        let Some(edge) = back_edge else {
            continue;
        };
        let instant = path.instant(index);
        for patch in ctx.alerts.alert_patches(edge) {
            if !patch.display_during(instant) {
                continue;
            }
            let applies = match &patch.trip {
                Some(trip_id) => leg.trip_id.as_ref() == Some(trip_id),
                None => true,
            };
            if applies {
                leg.add_alert(LocalizedAlert::new(&patch.alert, locale));
            }
        }
    }
}

fn add_real_time_data(leg: &mut Leg, path: &Path, end: usize) {
    let Some(trip_times) = trip_times_at(path, end) else {
        return;
    };
    if trip_times.is_scheduled() {
        return;
    }

    leg.real_time = true;
    if let Some(delay) = leg
        .from
        .stop_index
        .and_then(|index| trip_times.departure_delay(index))
    {
        leg.departure_delay = delay;
    }
    if let Some(delay) = leg
        .to
        .stop_index
        .and_then(|index| trip_times.arrival_delay(index))
    {
        leg.arrival_delay = delay;
    }
}

fn trip_times_at(path: &Path, index: usize) -> Option<&TripTimes> {
    path.waypoints[index]
        .trip
        .as_ref()
        .and_then(|trip| trip.trip_times.as_deref())
}

/// Builds the boundary places of the leg and, if requested, its
/// intermediate stops.
fn add_places(
    path: &Path,
    (start, end): LegRange,
    locale: &Locale,
    show_intermediate_stops: bool,
) -> (Place, Place, Option<Vec<Place>>) {
    let trip_times = trip_times_at(path, end);
    let first_stop = path.waypoints[start].vertex.stop();
    let last_stop = path.waypoints[end].vertex.stop();

    let mut from = make_place(
        path,
        start,
        path.edges.get(start).filter(|_| start < end).map(Arc::as_ref),
        false,
        trip_times,
        locale,
    );
    from.arrival = None;

    let mut to = make_place(path, end, path.back_edge(end), true, trip_times, locale);
    to.departure = None;

    if !show_intermediate_stops {
        return (from, to, None);
    }

    let mut stops: Vec<Place> = Vec::new();
    let mut previous_stop = None;
    for index in start + 1..end {
        let Some(current) = path.waypoints[index].vertex.stop() else {
            continue;
        };
        if Some(current) == first_stop {
            continue;
        }
        if Some(current) == previous_stop {
            if let Some(kept) = stops.last_mut() {
                kept.departure = Some(path.wall_clock(index).fixed_offset());
            }
            continue;
        }
        previous_stop = Some(current);
        if Some(current) == last_stop {
            break;
        }
        stops.push(make_place(
            path,
            index,
            path.edges.get(index).map(Arc::as_ref),
            false,
            trip_times,
            locale,
        ));
    }

    (from, to, Some(stops))
}

/// Place for the waypoint at `index`. `edge` is the pattern edge leaving
/// the waypoint, or the one reaching it when `end_of_leg` is set.
fn make_place(
    path: &Path,
    index: usize,
    edge: Option<&Edge>,
    end_of_leg: bool,
    trip_times: Option<&TripTimes>,
    locale: &Locale,
) -> Place {
    let vertex = &path.waypoints[index].vertex;
    let time: DateTime<FixedOffset> = path.wall_clock(index).fixed_offset();

    let mut place = Place::new(vertex.x(), vertex.y(), vertex.display_name(locale));
    place.arrival = Some(time);
    place.departure = Some(time);

    match (&vertex.kind, edge.and_then(Edge::pattern)) {
        (VertexKind::Transit { stop }, Some((_, stop_index))) => {
            let stop_index = stop_index + usize::from(end_of_leg);
            place.stop_id = Some(stop.id.clone());
            place.stop_code = stop.code.clone();
            place.platform_code = stop.platform_code.clone();
            place.zone_id = stop.zone_id.clone();
            place.stop_index = Some(stop_index);
            place.stop_sequence = trip_times.and_then(|times| times.stop_sequence(stop_index));
            place.vertex_type = VertexType::Transit;
        }
        (VertexKind::BikeShare { station }, _) => {
            place.bike_share_id = Some(station.id.clone());
            place.vertex_type = VertexType::Bikeshare;
        }
        (VertexKind::BikePark, _) => place.vertex_type = VertexType::Bikepark,
        _ => place.vertex_type = VertexType::Normal,
    }

    place
}
