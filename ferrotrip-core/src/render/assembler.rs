//! Assembles legs into itineraries and itineraries into a plan.

use std::sync::Arc;

use itertools::Itertools;
use rayon::prelude::*;

use super::{LegRange, RenderContext, build_leg, generate_walk_steps, slice_path};
use crate::Error;
use crate::config::PlanRequest;
use crate::diagnostics::Diagnostic;
use crate::model::{BoardAlightType, Edge, EdgeKind, Locale, Path, TraverseMode, VertexKind};
use crate::plan::{Itinerary, Leg, Place, TripPlan, WalkStep};

/// Renders every path into an itinerary of one plan.
///
/// Paths are rendered in parallel. The plan's endpoints come from the
/// first path.
///
/// # Errors
///
/// Returns [`Error::MalformedPath`] if `paths` is empty, and otherwise the
/// first error any path produced.
pub fn generate_plan(
    paths: &[Path],
    request: &PlanRequest,
    ctx: &RenderContext<'_>,
) -> Result<TripPlan, Error> {
    let Some(exemplar) = paths.first() else {
        return Err(Error::MalformedPath("no paths to render".to_string()));
    };
    let locale = &request.locale;

    let start = &exemplar.first().vertex;
    let end = &exemplar.last().vertex;
    let mut from = Place::new(start.x(), start.y(), start.display_name(locale));
    let mut to = Place::new(end.x(), end.y(), end.display_name(locale));
    from.orig.clone_from(&request.from_name);
    to.orig.clone_from(&request.to_name);

    let mut itineraries = paths
        .par_iter()
        .map(|path| generate_itinerary(path, locale, request.show_intermediate_stops, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    for itinerary in &mut itineraries {
        if itinerary.walk_distance > request.max_walk_distance {
            itinerary.walk_limit_exceeded = true;
        }
        itinerary.too_sloped = request.slope_restriction_removed;

        let Some(first_leg) = itinerary.legs.first_mut() else {
            ctx.diagnostics.report(Diagnostic::NoLegs);
            continue;
        };
        first_leg.from.orig.clone_from(&from.orig);
        if let Some(last_leg) = itinerary.legs.last_mut() {
            last_leg.to.orig.clone_from(&to.orig);
        }
    }

    log::info!(
        "Rendered {} itineraries for {}",
        itineraries.len(),
        request.date
    );
    Ok(TripPlan {
        date: request.date,
        from,
        to,
        itineraries,
    })
}

/// Renders one path into an itinerary.
///
/// # Errors
///
/// Returns [`Error::MalformedPath`] if the path's edges do not chain its
/// waypoints, [`Error::TrivialPath`] if it contains no actual travel, and
/// [`Error::Polyline`] if a leg geometry cannot be encoded.
pub fn generate_itinerary(
    path: &Path,
    locale: &Locale,
    show_intermediate_stops: bool,
    ctx: &RenderContext<'_>,
) -> Result<Itinerary, Error> {
    path.validate()?;
    let ranges = slice_path(path)?;

    let fare = ctx.fares.and_then(|fares| fares.cost(path));

    let mut legs = ranges
        .iter()
        .enumerate()
        .map(|(leg_index, &range)| {
            build_leg(path, range, leg_index, locale, show_intermediate_stops, ctx)
        })
        .collect::<Result<Vec<_>, _>>()?;

    add_walk_steps(&mut legs, path, &ranges, locale, ctx);
    fixup_legs(&mut legs, path, &ranges);

    let (walk_time, transit_time, waiting_time) = calculate_times(path);
    let (elevation_gained, elevation_lost) =
        calculate_elevations(path.edges.iter().map(Arc::as_ref));

    let last = path.last();
    let mut transfers = last.num_boardings;
    if transfers > 0 && !matches!(path.first().vertex.kind, VertexKind::OnboardDepart) {
        transfers -= 1;
    }

    Ok(Itinerary {
        duration: last.elapsed_seconds,
        start_time: path.wall_clock(0).fixed_offset(),
        end_time: path.wall_clock(path.len() - 1).fixed_offset(),
        walk_time,
        transit_time,
        waiting_time,
        walk_distance: last.walk_distance,
        walk_limit_exceeded: false,
        elevation_lost,
        elevation_gained,
        transfers,
        fare,
        legs,
        too_sloped: false,
    })
}

/// Narrates every street leg, threading the last step of one street leg
/// into the next. A transit leg in between breaks the chain.
pub fn add_walk_steps(
    legs: &mut [Leg],
    path: &Path,
    ranges: &[LegRange],
    locale: &Locale,
    ctx: &RenderContext<'_>,
) {
    legs.iter_mut()
        .zip(ranges)
        .enumerate()
        .fold(
            (None::<WalkStep>, None::<TraverseMode>),
            |(previous, last_mode), (leg_index, (leg, &range))| {
                if leg.is_transit_leg() {
                    return (None, last_mode);
                }
                let mut steps =
                    generate_walk_steps(path, range, leg_index, previous.as_ref(), locale, ctx);

                let last_mode = match steps.first_mut() {
                    Some(first) if last_mode != Some(leg.mode) => {
                        first.new_mode = Some(leg.mode.to_string());
                        Some(leg.mode)
                    }
                    _ => last_mode,
                };
                let previous = steps.last().cloned();
                leg.steps = steps;
                (previous, last_mode)
            },
        );
}

/// Fills in what each leg only learns from its neighbours: boundary times,
/// shared stop places, board/alight rules and the pathway flag.
pub fn fixup_legs(legs: &mut [Leg], path: &Path, ranges: &[LegRange]) {
    for (i, &(start, end)) in ranges.iter().enumerate() {
        let to_other = legs.get(i + 1).is_some_and(|next| next.interline_with_previous_leg);
        let from_other = legs[i].interline_with_previous_leg;

        let mut rules: Option<(BoardAlightType, BoardAlightType)> = None;
        for edge in &path.edges[start..end] {
            if let Some((pattern, _)) = edge.pattern() {
                let leg = &legs[i];
                let board = leg
                    .from
                    .stop_index
                    .map_or(BoardAlightType::None, |index| pattern.board_type(index));
                let alight = leg
                    .to
                    .stop_index
                    .map_or(BoardAlightType::None, |index| pattern.alight_type(index));
                rules = Some((board, alight));
            }
            if is_pathway(edge) {
                legs[i].pathway = true;
            }
        }

        if let (Some(this), Some(next)) = pair_mut(legs, i) {
            next.from.arrival = this.to.arrival;
            this.to.departure = next.from.departure;

            if this.is_transit_leg() && !next.is_transit_leg() {
                next.from = this.to.clone();
            }
            if !this.is_transit_leg() && next.is_transit_leg() {
                this.to = next.from.clone();
            }
        }

        // an interlined leg boards or alights in its neighbour
        let leg = &mut legs[i];
        if leg.is_transit_leg()
            && let Some((board, alight)) = rules
        {
            if !from_other && let Some(rule) = board.message() {
                leg.board_rule = Some(rule.to_string());
            }
            if !to_other && let Some(rule) = alight.message() {
                leg.alight_rule = Some(rule.to_string());
            }
        }
    }
}

fn is_pathway(edge: &Edge) -> bool {
    matches!(edge.kind, EdgeKind::Pathway)
}

/// Mutable access to the leg at `i` and the one after it.
fn pair_mut(legs: &mut [Leg], i: usize) -> (Option<&mut Leg>, Option<&mut Leg>) {
    if i + 1 >= legs.len() {
        return (legs.get_mut(i), None);
    }
    let (head, tail) = legs.split_at_mut(i + 1);
    (head.last_mut(), tail.first_mut())
}

/// Seconds spent walking, riding and waiting, bucketed by how each
/// waypoint was reached: `(walk, transit, waiting)`.
pub fn calculate_times(path: &Path) -> (i64, i64, i64) {
    let (mut walk, mut transit, mut waiting) = (0, 0, 0);
    for (index, waypoint) in path.waypoints.iter().enumerate() {
        let Some(mode) = waypoint.back_mode else {
            continue;
        };
        let delta = path.time_delta(index);
        match mode {
            TraverseMode::LegSwitch => waiting += delta,
            TraverseMode::Walk | TraverseMode::Bicycle | TraverseMode::Car => walk += delta,
            _ => transit += delta,
        }
    }
    (walk, transit, waiting)
}

/// Total climb and descent over the elevation profiles of street edges:
/// `(gained, lost)`, both non-negative.
pub fn calculate_elevations<'a, I>(edges: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Edge>,
{
    edges
        .into_iter()
        .filter_map(Edge::elevation)
        .flat_map(|profile| profile.iter().tuple_windows())
        .fold((0.0, 0.0), |(gained, lost), (a, b)| {
            let change = b.y - a.y;
            if change > 0.0 {
                (gained + change, lost)
            } else {
                (gained, lost - change)
            }
        })
}
