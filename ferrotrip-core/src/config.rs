//! Tunable constants of the narrative generator.
//!
//! The angular thresholds and the zag distance are empirical. They are kept
//! at the values the itinerary renderer has always used, but can be
//! overridden per deployment.

use std::f64::consts::PI;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::model::Locale;

/// Process-wide rendering configuration, shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Middle steps shorter than this (meters) are candidates for zag removal.
    pub max_zag_distance: f64,
    /// A same-street turn sharper than this (radians) always gets a
    /// "continue on" instruction.
    pub continue_max_turn_angle: f64,
    /// An alternative street whose bearing is within this margin (radians)
    /// of the taken one makes a same-street turn worth announcing.
    pub continue_alternative_tolerance: f64,
    /// Bearings are measured to the first vertex at least this far (meters)
    /// from the segment start.
    pub bearing_min_segment_length: f64,
    /// Decimal precision of the encoded leg polyline.
    pub polyline_precision: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_zag_distance: 30.0,
            continue_max_turn_angle: PI / 4.0,
            continue_alternative_tolerance: PI / 16.0,
            bearing_min_segment_length: 10.0,
            polyline_precision: 5,
        }
    }
}

impl RenderConfig {
    /// Parses a configuration from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the document is not valid JSON or a
    /// field has the wrong type or an out-of-range value.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: RenderConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        let non_negative = [
            ("max_zag_distance", self.max_zag_distance),
            ("continue_max_turn_angle", self.continue_max_turn_angle),
            (
                "continue_alternative_tolerance",
                self.continue_alternative_tolerance,
            ),
            ("bearing_min_segment_length", self.bearing_min_segment_length),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.polyline_precision == 0 || self.polyline_precision > 10 {
            return Err(Error::InvalidConfig(format!(
                "polyline_precision must be between 1 and 10, got {}",
                self.polyline_precision
            )));
        }
        Ok(())
    }
}

/// Per-request rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub show_intermediate_stops: bool,
    /// Itineraries walking further than this (meters) are flagged.
    #[serde(default = "unlimited")]
    pub max_walk_distance: f64,
    /// The search only succeeded after dropping its slope limit.
    #[serde(default)]
    pub slope_restriction_removed: bool,
    /// Origin name as entered by the user.
    #[serde(default)]
    pub from_name: Option<String>,
    #[serde(default)]
    pub to_name: Option<String>,
}

fn unlimited() -> f64 {
    f64::INFINITY
}

impl PlanRequest {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            locale: Locale::default(),
            show_intermediate_stops: false,
            max_walk_distance: unlimited(),
            slope_restriction_removed: false,
            from_name: None,
            to_name: None,
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_intermediate_stops(mut self) -> Self {
        self.show_intermediate_stops = true;
        self
    }

    #[must_use]
    pub fn with_max_walk_distance(mut self, meters: f64) -> Self {
        self.max_walk_distance = meters;
        self
    }

    #[must_use]
    pub fn with_place_names(
        mut self,
        from_name: impl Into<String>,
        to_name: impl Into<String>,
    ) -> Self {
        self.from_name = Some(from_name.into());
        self.to_name = Some(to_name.into());
        self
    }
}
