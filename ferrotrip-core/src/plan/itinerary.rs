use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use super::{Leg, Place};
use crate::model::Fare;

/// One complete way of making the trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Seconds.
    pub duration: i64,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub walk_time: i64,
    pub transit_time: i64,
    pub waiting_time: i64,
    /// Meters.
    pub walk_distance: f64,
    pub walk_limit_exceeded: bool,
    pub elevation_lost: f64,
    pub elevation_gained: f64,
    pub transfers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<Fare>,
    pub legs: Vec<Leg>,
    pub too_sloped: bool,
}

/// Every itinerary rendered for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub date: NaiveDate,
    pub from: Place,
    pub to: Place,
    pub itineraries: Vec<Itinerary>,
}
