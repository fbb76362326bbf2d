//! Turn-by-turn narrative for street legs.
//!
//! Edges are walked in order and folded into [`WalkStep`]s. A new step
//! starts when the street name changes, when a roundabout is entered or
//! left, when a link road is entered, or when a turn keeps the same name
//! but another street at the junction makes it ambiguous. Short doglegs are
//! cleaned up as soon as the step after them is opened.

use std::sync::Arc;

use super::{LegRange, RenderContext};
use crate::diagnostics::Diagnostic;
use crate::geometry::{self, absolute_angle_diff, encode_elevation_profile, first_angle};
use crate::model::{BikeRentalStation, Edge, EdgeKind, Locale, Path, TraverseMode, Waypoint};
use crate::plan::walk_step::strip_parens;
use crate::plan::{BikeRentalStationInfo, LocalizedAlert, RelativeDirection, WalkStep};

/// What [`remove_zag`] did to the step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZagCleanup {
    Unchanged,
    /// Two same-handed turns around a short step became one U-turn.
    UTurn,
    /// A short dogleg off the street and back was dropped.
    Dogleg,
}

/// Generates the walk steps of the street leg spanning `range`.
///
/// `previous` is the last step of the preceding street leg, if the legs
/// are adjacent; the first step's direction is then relative to it rather
/// than a plain departure.
pub fn generate_walk_steps(
    path: &Path,
    range: LegRange,
    leg_index: usize,
    previous: Option<&WalkStep>,
    locale: &Locale,
    ctx: &RenderContext<'_>,
) -> Vec<WalkStep> {
    let config = ctx.config;
    let min_length = config.bearing_min_segment_length;
    let (start, end) = range;

    let mut steps: Vec<WalkStep> = Vec::new();
    let mut last_angle = 0.0;
    // distance into the current step, used to offset elevation samples
    let mut distance = 0.0;
    let mut roundabout_exit: u32 = 0;
    let mut roundabout_previous_street: Option<String> = None;
    let mut rental_on: Option<&BikeRentalStation> = None;
    let mut rental_off: Option<&BikeRentalStation> = None;

    for index in start..end {
        let back = &path.waypoints[index];
        let forward = &path.waypoints[index + 1];
        let edge: &Edge = &path.edges[index];

        match &edge.kind {
            EdgeKind::RentalBegin { station } => rental_on = Some(station.as_ref()),
            EdgeKind::RentalEnd { station } => rental_off = Some(station.as_ref()),
            _ => {}
        }

        if edge.is_free() {
            continue;
        }
        if !forward
            .back_mode
            .is_some_and(TraverseMode::is_on_street_non_transit)
        {
            continue;
        }

        if let EdgeKind::ElevatorAlight { floor } = &edge.kind {
            let angle = edge
                .geometry
                .as_ref()
                .map_or(last_angle, |line| first_angle(&line.0, min_length));
            let mut step = create_walk_step(path, index, angle, locale, ctx);
            step.street_name = floor.to_locale(locale).to_owned();
            step.relative_direction = RelativeDirection::Elevator;
            steps.push(step);
            continue;
        }

        let Some(line) = &edge.geometry else {
            continue;
        };
        let this_angle = first_angle(&line.0, min_length);
        let street_name = edge.name(locale);
        let street_name_no_parens = strip_parens(street_name);
        let back_edge = path.back_edge(index);

        let opens_new_street = steps.last().map(|step| {
            starts_new_step(step, edge, street_name_no_parens, roundabout_exit > 0, back_edge)
        });

        let created_new_step = match opens_new_street {
            None => {
                let mut step = create_walk_step(path, index, this_angle, locale, ctx);
                match previous {
                    Some(previous) => step.set_directions(previous.angle, this_angle, false),
                    None => {
                        step.set_absolute_direction(this_angle);
                        step.relative_direction = RelativeDirection::Depart;
                    }
                }
                steps.push(step);
                distance = edge.distance;
                true
            }
            Some(true) => {
                if roundabout_exit > 0 {
                    if let Some(step) = steps.last_mut() {
                        step.exit = Some(roundabout_exit.to_string());
                        if roundabout_previous_street.as_deref() == Some(street_name_no_parens) {
                            step.stay_on = true;
                        }
                    }
                    roundabout_exit = 0;
                }

                let mut step = create_walk_step(path, index, this_angle, locale, ctx);
                if edge.roundabout {
                    roundabout_exit = 1;
                    roundabout_previous_street = Some(
                        back_edge
                            .map(|back_edge| strip_parens(back_edge.name(locale)).to_owned())
                            .unwrap_or_default(),
                    );
                }
                step.set_directions(last_angle, this_angle, edge.roundabout);
                steps.push(step);
                distance = edge.distance;
                true
            }
            Some(false) => {
                if edge.roundabout && back.multiple_options_before {
                    roundabout_exit += 1;
                }
                let direction =
                    RelativeDirection::between(last_angle, this_angle, edge.roundabout);

                if edge.roundabout || direction == RelativeDirection::Continue {
                    false
                } else if should_generate_continue(
                    edge,
                    back,
                    street_name,
                    this_angle,
                    last_angle,
                    locale,
                    ctx,
                ) {
                    let mut step = create_walk_step(path, index, this_angle, locale, ctx);
                    step.set_directions(last_angle, this_angle, false);
                    step.stay_on = true;
                    steps.push(step);
                    distance = edge.distance;
                    true
                } else {
                    false
                }
            }
        };

        if let Some(exit_name) = exit_label(path, index)
            && let Some(step) = steps.last_mut()
        {
            step.exit = Some(exit_name.to_owned());
        }

        if created_new_step {
            // the new step already holds this edge's samples from offset 0
            if forward.back_mode == back.back_mode
                && remove_zag(&mut steps, config.max_zag_distance) == ZagCleanup::Dogleg
                && let Some(step) = steps.last_mut()
            {
                step.elevation
                    .extend(encode_elevation_profile(edge, step.distance));
                distance = step.distance + edge.distance;
            }
        } else {
            if let Some(step) = steps.last_mut() {
                step.elevation
                    .extend(encode_elevation_profile(edge, distance));
            }
            distance += edge.distance;
        }

        if let Some(step) = steps.last_mut() {
            step.distance += edge.distance;
            for alert in ctx.alerts.street_notes(forward, Some(edge)) {
                step.add_alert(LocalizedAlert::new(&alert, locale));
            }
            step.edges.push(Arc::clone(&path.edges[index]));
        }
        last_angle = geometry::last_angle(&line.0, min_length);
    }

    if let (Some(station), Some(step)) = (rental_on, steps.last_mut()) {
        step.bike_rental_on_station = Some(BikeRentalStationInfo::new(station, locale));
    }
    if let (Some(station), Some(step)) = (rental_off, steps.first_mut()) {
        step.bike_rental_off_station = Some(BikeRentalStationInfo::new(station, locale));
    }

    if steps.is_empty() {
        ctx.diagnostics.report(Diagnostic::EmptyLeg { leg_index });
    }
    steps
}

fn create_walk_step(
    path: &Path,
    index: usize,
    angle: f64,
    locale: &Locale,
    ctx: &RenderContext<'_>,
) -> WalkStep {
    let edge = &path.edges[index];
    let from = &path.waypoints[index].vertex;

    let mut step = WalkStep::new(edge.name(locale), angle);
    step.lon = from.x();
    step.lat = from.y();
    step.elevation = encode_elevation_profile(edge, 0.0);
    step.bogus_name = edge.bogus_name;
    step.area = matches!(edge.kind, EdgeKind::Area);
    for alert in ctx
        .alerts
        .street_notes(&path.waypoints[index + 1], Some(edge))
    {
        step.add_alert(LocalizedAlert::new(&alert, locale));
    }
    step
}

/// Renames only count when at least one of the two names is real.
fn starts_new_step(
    step: &WalkStep,
    edge: &Edge,
    street_name_no_parens: &str,
    on_roundabout: bool,
    back_edge: Option<&Edge>,
) -> bool {
    let renamed = step.street_name_no_parens() != street_name_no_parens
        && !(step.bogus_name && edge.bogus_name);
    let onto_link = edge.link && !back_edge.is_some_and(|back_edge| back_edge.link);

    renamed || edge.roundabout != on_roundabout || onto_link
}

/// A turn that keeps the street name still gets an instruction when the
/// junction offers a differently named street at a comparable angle.
fn should_generate_continue(
    edge: &Edge,
    back: &Waypoint,
    street_name: &str,
    this_angle: f64,
    last_angle: f64,
    locale: &Locale,
    ctx: &RenderContext<'_>,
) -> bool {
    if !edge.is_street() {
        return false;
    }
    let config = ctx.config;
    let angle_diff = absolute_angle_diff(this_angle, last_angle);

    back.vertex
        .outgoing_streets
        .iter()
        // same-named alternatives are street splits
        .filter(|alternative| alternative.name.to_locale(locale) != street_name)
        .filter_map(|alternative| alternative.geometry.as_ref())
        .any(|line| {
            let alt_angle = first_angle(&line.0, config.bearing_min_segment_length);
            let alt_angle_diff = absolute_angle_diff(alt_angle, last_angle);
            angle_diff > config.continue_max_turn_angle
                || alt_angle_diff - angle_diff < config.continue_alternative_tolerance
        })
}

/// Signposted exit at the waypoint, looking back through free edges.
fn exit_label(path: &Path, index: usize) -> Option<&str> {
    let mut index = index;
    while path.back_edge(index).is_some_and(Edge::is_free) {
        index -= 1;
    }
    path.waypoints[index].vertex.exit_name()
}

/// Collapses a zag at the end of `steps`: a middle step shorter than
/// `max_zag_distance` between two steps on the same street.
///
/// Two turns of the same hand become a U-turn on the last step. Anything
/// else is a dogleg, and the middle and last steps are folded back into the
/// one before them. A trailing U-turn is left alone, and so is an elevator
/// step in the middle.
pub fn remove_zag(steps: &mut Vec<WalkStep>, max_zag_distance: f64) -> ZagCleanup {
    let n = steps.len();
    if n < 3 {
        return ZagCleanup::Unchanged;
    }
    let (three_back, two_back, last) = (&steps[n - 3], &steps[n - 2], &steps[n - 1]);

    if two_back.distance >= max_zag_distance
        || two_back.relative_direction == RelativeDirection::Elevator
        || last.street_name_no_parens() != three_back.street_name_no_parens()
        || matches!(
            last.relative_direction,
            RelativeDirection::UturnLeft | RelativeDirection::UturnRight
        )
    {
        return ZagCleanup::Unchanged;
    }

    let lefts = last.relative_direction.is_left_turn() && two_back.relative_direction.is_left_turn();
    let rights =
        last.relative_direction.is_right_turn() && two_back.relative_direction.is_right_turn();

    if lefts || rights {
        let middle = steps.remove(n - 2);
        let last = &mut steps[n - 2];
        last.distance += middle.distance;
        last.relative_direction = if lefts {
            RelativeDirection::UturnLeft
        } else {
            RelativeDirection::UturnRight
        };
        last.stay_on = true;
        log::debug!("Merged short {:.1} m step into a U-turn", middle.distance);
        return ZagCleanup::UTurn;
    }

    steps.truncate(n - 1);
    let Some(middle) = steps.pop() else {
        return ZagCleanup::Unchanged;
    };
    let Some(step) = steps.last_mut() else {
        return ZagCleanup::Unchanged;
    };
    let offset = step.distance;
    step.distance += middle.distance;
    step.elevation.extend(
        middle
            .elevation
            .iter()
            .map(|&(along, elevation)| (along + offset, elevation)),
    );
    log::debug!("Dropped {:.1} m dogleg on {}", middle.distance, step.street_name);
    ZagCleanup::Dogleg
}
