use chrono::{DateTime, FixedOffset, NaiveDate};
use geo::LineString;
use serde::Serialize;

use super::{Place, WalkStep};
use crate::model::{Alert, Locale, LocalizedText, TraverseMode};

/// Encoded polyline plus the number of points it holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EncodedPolyline {
    pub points: String,
    pub length: usize,
}

/// An alert rendered in the requested language.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedAlert {
    #[serde(skip)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_header_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_description_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_start_date: Option<DateTime<chrono::Utc>>,
}

impl LocalizedAlert {
    pub fn new(alert: &Alert, locale: &Locale) -> Self {
        let localize = |text: &Option<LocalizedText>| {
            text.as_ref().map(|t| t.to_locale(locale).to_owned())
        };
        Self {
            id: alert.id.clone(),
            alert_header_text: localize(&alert.header),
            alert_description_text: localize(&alert.description),
            alert_url: localize(&alert.url),
            effective_start_date: alert.effective_start,
        }
    }
}

/// One mode-homogeneous slice of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    /// Offset of the path's time zone at `start_time`, in milliseconds.
    pub agency_time_zone_offset: i32,
    pub departure_delay: i32,
    pub arrival_delay: i32,
    pub real_time: bool,
    /// Meters.
    pub distance: f64,
    pub pathway: bool,
    pub mode: TraverseMode,
    pub route: String,
    pub interline_with_previous_leg: bool,
    pub rented_bike: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_block_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alight_rule: Option<String>,

    pub from: Place,
    pub to: Place,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_stops: Option<Vec<Place>>,
    pub leg_geometry: EncodedPolyline,
    /// Decoded form of `leg_geometry`, kept for GeoJSON export.
    #[serde(skip)]
    pub geometry: LineString<f64>,
    pub steps: Vec<WalkStep>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<LocalizedAlert>,
}

impl Leg {
    pub fn is_transit_leg(&self) -> bool {
        self.mode.is_transit()
    }

    /// Adds an alert unless one with the same id is already attached.
    pub fn add_alert(&mut self, alert: LocalizedAlert) {
        if !self.alerts.iter().any(|known| known.id == alert.id) {
            self.alerts.push(alert);
        }
    }

    /// Seconds between departure and arrival.
    pub fn duration(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}
