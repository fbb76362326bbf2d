//! Direction and geometry helpers used by the leg builder and the narrator.
//!
//! Bearings are radians clockwise from north in `(-PI, PI]`.

use std::f64::consts::PI;

use geo::{Bearing, Coord, Distance, Haversine, Point};

use crate::Error;
use crate::model::Edge;
use crate::plan::EncodedPolyline;

fn azimuth(origin: Point<f64>, target: Point<f64>) -> f64 {
    let radians = Haversine.bearing(origin, target).to_radians();
    if radians > PI {
        radians - 2.0 * PI
    } else {
        radians
    }
}

/// Bearing of the first segment. Vertices closer than `min_length` meters
/// to the start are skipped so that digitizing noise does not dominate.
pub fn first_angle(coords: &[Coord<f64>], min_length: f64) -> f64 {
    if coords.len() < 2 {
        return 0.0;
    }
    let origin = Point::from(coords[0]);
    let mut target = Point::from(coords[1]);
    for &next in &coords[2..] {
        if Haversine.distance(origin, target) >= min_length {
            break;
        }
        target = Point::from(next);
    }
    azimuth(origin, target)
}

/// Bearing of the last segment, with the same noise filtering as
/// [`first_angle`].
pub fn last_angle(coords: &[Coord<f64>], min_length: f64) -> f64 {
    let n = coords.len();
    if n < 2 {
        return 0.0;
    }
    let end = Point::from(coords[n - 1]);
    let mut start = Point::from(coords[n - 2]);
    for &prev in coords[..n - 2].iter().rev() {
        if Haversine.distance(start, end) >= min_length {
            break;
        }
        start = Point::from(prev);
    }
    azimuth(start, end)
}

/// Smallest angle between two bearings, in `[0, PI]`.
pub fn absolute_angle_diff(this_angle: f64, last_angle: f64) -> f64 {
    let mut angle_diff = this_angle - last_angle;
    if angle_diff < 0.0 {
        angle_diff += PI * 2.0;
    }
    let ccw_angle_diff = PI * 2.0 - angle_diff;
    angle_diff.min(ccw_angle_diff)
}

/// Concatenates edge geometries, dropping the junction vertex each edge
/// shares with its predecessor. Edges without geometry contribute nothing.
pub fn make_coordinates<'a, I>(edges: I) -> Vec<Coord<f64>>
where
    I: IntoIterator<Item = &'a Edge>,
{
    let mut coordinates: Vec<Coord<f64>> = Vec::new();
    for edge in edges {
        let Some(geometry) = &edge.geometry else {
            continue;
        };
        let skip = usize::from(!coordinates.is_empty());
        coordinates.extend(geometry.0.iter().skip(skip).copied());
    }
    coordinates
}

pub fn encode_polyline(coords: &[Coord<f64>], precision: u32) -> Result<EncodedPolyline, Error> {
    let points = polyline::encode_coordinates(coords.iter().copied(), precision)
        .map_err(|e| Error::Polyline(e.to_string()))?;
    Ok(EncodedPolyline {
        points,
        length: coords.len(),
    })
}

/// Elevation samples of a street edge as `(distance, elevation)` pairs, with
/// distances shifted by `offset`.
pub fn encode_elevation_profile(edge: &Edge, offset: f64) -> Vec<(f64, f64)> {
    edge.elevation()
        .map(|profile| profile.iter().map(|c| (c.x + offset, c.y)).collect())
        .unwrap_or_default()
}
