//! Splits a path into per-leg waypoint ranges.

use crate::Error;
use crate::model::{Path, TraverseMode};

/// Inclusive `(start, end)` waypoint indices of one leg.
pub type LegRange = (usize, usize);

/// Returns the waypoint ranges of the legs of `path`, in order.
///
/// Consecutive ranges share their boundary waypoint, except around a
/// leg switch (which belongs to no leg) and around an interline dwell
/// edge (which is consumed between the two legs it separates).
///
/// # Errors
///
/// Returns [`Error::TrivialPath`] if no waypoint was reached by actual
/// travel.
pub fn slice_path(path: &Path) -> Result<Vec<LegRange>, Error> {
    let trivial = path
        .waypoints
        .iter()
        .all(|waypoint| waypoint.travel_mode().is_none());
    if trivial {
        return Err(Error::TrivialPath);
    }

    let last = path.len() - 1;
    let mut current: LegRange = (0, last);
    let mut legs = Vec::new();

    for i in 1..last {
        let (Some(back_mode), Some(forward_mode)) =
            (path.waypoints[i].back_mode, path.waypoints[i + 1].back_mode)
        else {
            continue;
        };

        if back_mode == TraverseMode::LegSwitch || forward_mode == TraverseMode::LegSwitch {
            if back_mode != TraverseMode::LegSwitch {
                current.1 = i;
            } else if forward_mode != TraverseMode::LegSwitch {
                if current.1 != last {
                    legs.push(current);
                }
                current = (i, last);
            }
        } else if back_mode != forward_mode {
            current.1 = i;
            legs.push(current);
            current = (i, last);
        } else if path.back_edge(i + 1).is_some_and(|edge| edge.is_interline_dwell()) {
            current.1 = i;
            legs.push(current);
            current = (i + 1, last);
        }
    }
    legs.push(current);

    log::debug!("Sliced {} waypoints into {} legs", path.len(), legs.len());
    Ok(legs)
}
