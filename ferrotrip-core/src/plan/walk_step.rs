//! Turn-by-turn instructions.

use std::f64::consts::PI;
use std::sync::Arc;

use serde::Serialize;

use super::LocalizedAlert;
use crate::model::{BikeRentalStation, Edge, Locale};

/// Turns gentler than this (radians) read as going straight.
const CONTINUE_ANGLE: f64 = 0.3;
const SLIGHT_TURN_ANGLE: f64 = 0.7;
const TURN_ANGLE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelativeDirection {
    Depart,
    HardLeft,
    Left,
    SlightlyLeft,
    Continue,
    SlightlyRight,
    Right,
    HardRight,
    CircleClockwise,
    CircleCounterclockwise,
    Elevator,
    UturnLeft,
    UturnRight,
}

impl RelativeDirection {
    /// Classifies the turn from `last_angle` to `this_angle`. Entering a
    /// roundabout only tells which way it circles.
    pub fn between(last_angle: f64, this_angle: f64, roundabout: bool) -> Self {
        let mut angle_diff = this_angle - last_angle;
        if angle_diff < 0.0 {
            angle_diff += PI * 2.0;
        }
        let ccw_angle_diff = PI * 2.0 - angle_diff;

        if roundabout {
            return if angle_diff > ccw_angle_diff {
                Self::CircleClockwise
            } else {
                Self::CircleCounterclockwise
            };
        }

        if angle_diff < CONTINUE_ANGLE || ccw_angle_diff < CONTINUE_ANGLE {
            Self::Continue
        } else if angle_diff < SLIGHT_TURN_ANGLE {
            Self::SlightlyRight
        } else if ccw_angle_diff < SLIGHT_TURN_ANGLE {
            Self::SlightlyLeft
        } else if angle_diff < TURN_ANGLE {
            Self::Right
        } else if ccw_angle_diff < TURN_ANGLE {
            Self::Left
        } else if angle_diff < PI {
            Self::HardRight
        } else {
            Self::HardLeft
        }
    }

    /// Left or hard left: the turns that can form a left U-turn.
    pub fn is_left_turn(self) -> bool {
        matches!(self, Self::Left | Self::HardLeft)
    }

    pub fn is_right_turn(self) -> bool {
        matches!(self, Self::Right | Self::HardRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsoluteDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl AbsoluteDirection {
    /// Nearest of the eight compass points to a bearing in radians.
    pub fn from_angle(angle: f64) -> Self {
        let octant = (8 + (angle * 8.0 / (PI * 2.0)).round() as i64).rem_euclid(8);
        match octant {
            0 => Self::North,
            1 => Self::Northeast,
            2 => Self::East,
            3 => Self::Southeast,
            4 => Self::South,
            5 => Self::Southwest,
            6 => Self::West,
            _ => Self::Northwest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeRentalStationInfo {
    pub id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl BikeRentalStationInfo {
    pub fn new(station: &BikeRentalStation, locale: &Locale) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.to_locale(locale).to_owned(),
            lon: station.coord.x,
            lat: station.coord.y,
        }
    }
}

/// One maneuver of a street leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkStep {
    /// Meters covered by this step.
    pub distance: f64,
    pub relative_direction: RelativeDirection,
    pub street_name: String,
    pub absolute_direction: AbsoluteDirection,
    /// Roundabout exit ordinal or signposted exit label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<String>,
    /// The maneuver keeps the traveler on a street of the same name.
    pub stay_on: bool,
    /// The step crosses an open area rather than following a street.
    pub area: bool,
    /// The street name was synthesized.
    pub bogus_name: bool,
    pub lon: f64,
    pub lat: f64,
    /// `(distance along step, elevation)` pairs.
    pub elevation: Vec<(f64, f64)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<LocalizedAlert>,
    /// Mode of the leg, set on its first step when the mode changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike_rental_on_station: Option<BikeRentalStationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike_rental_off_station: Option<BikeRentalStationInfo>,
    /// Bearing of the first segment, radians clockwise from north.
    #[serde(skip)]
    pub angle: f64,
    #[serde(skip)]
    pub edges: Vec<Arc<Edge>>,
}

impl WalkStep {
    pub fn new(street_name: impl Into<String>, angle: f64) -> Self {
        Self {
            distance: 0.0,
            relative_direction: RelativeDirection::Depart,
            street_name: street_name.into(),
            absolute_direction: AbsoluteDirection::from_angle(angle),
            exit: None,
            stay_on: false,
            area: false,
            bogus_name: false,
            lon: 0.0,
            lat: 0.0,
            elevation: Vec::new(),
            alerts: Vec::new(),
            new_mode: None,
            bike_rental_on_station: None,
            bike_rental_off_station: None,
            angle,
            edges: Vec::new(),
        }
    }

    pub fn set_absolute_direction(&mut self, angle: f64) {
        self.angle = angle;
        self.absolute_direction = AbsoluteDirection::from_angle(angle);
    }

    pub fn set_directions(&mut self, last_angle: f64, this_angle: f64, roundabout: bool) {
        self.relative_direction = RelativeDirection::between(last_angle, this_angle, roundabout);
        self.set_absolute_direction(this_angle);
    }

    /// Street name with any trailing parenthesized qualifier removed.
    pub fn street_name_no_parens(&self) -> &str {
        strip_parens(&self.street_name)
    }

    pub fn add_alert(&mut self, alert: LocalizedAlert) {
        if !self.alerts.contains(&alert) {
            self.alerts.push(alert);
        }
    }
}

/// `"Main St (sidewalk)"` becomes `"Main St"`. A name that starts with a
/// parenthesis is kept whole.
pub fn strip_parens(name: &str) -> &str {
    match name.find('(') {
        Some(idx) if idx > 0 => name[..idx].trim_end(),
        _ => name,
    }
}
