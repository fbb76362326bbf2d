//! Transit entities referenced by pattern edges and trip-bearing waypoints.

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Agency {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: String,
    pub agency: Arc<Agency>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    /// GTFS `route_type`
    pub route_type: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: String,
    pub route: Arc<Route>,
    pub short_name: Option<String>,
    pub block_id: Option<String>,
    pub headsign: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
    pub platform_code: Option<String>,
    pub zone_id: Option<String>,
}

impl Stop {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: None,
            platform_code: None,
            zone_id: None,
        }
    }
}

/// Pickup/drop-off restriction of a pattern at one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAlightType {
    None,
    Impossible,
    MustPhone,
    CoordinateWithDriver,
}

impl BoardAlightType {
    /// Maps a GTFS `pickup_type`/`drop_off_type` code; unknown codes mean no
    /// restriction.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Impossible,
            2 => Self::MustPhone,
            3 => Self::CoordinateWithDriver,
            _ => Self::None,
        }
    }

    /// Rule string shown to riders, absent when boarding is unrestricted.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Impossible => Some("impossible"),
            Self::MustPhone => Some("mustPhone"),
            Self::CoordinateWithDriver => Some("coordinateWithDriver"),
        }
    }
}

/// Stop sequence shared by a set of trips, with per-stop board/alight codes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripPattern {
    pub id: String,
    pub board_types: Vec<i32>,
    pub alight_types: Vec<i32>,
}

impl TripPattern {
    pub fn board_type(&self, stop_index: usize) -> BoardAlightType {
        self.board_types
            .get(stop_index)
            .map_or(BoardAlightType::None, |&code| BoardAlightType::from_code(code))
    }

    pub fn alight_type(&self, stop_index: usize) -> BoardAlightType {
        self.alight_types
            .get(stop_index)
            .map_or(BoardAlightType::None, |&code| BoardAlightType::from_code(code))
    }
}

/// Scheduled or real-time timing of one trip, indexed by stop position in
/// the pattern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTimes {
    pub scheduled: bool,
    pub arrival_delays: Vec<i32>,
    pub departure_delays: Vec<i32>,
    pub stop_sequences: Vec<u32>,
}

impl TripTimes {
    pub fn scheduled(stop_sequences: Vec<u32>) -> Self {
        Self {
            scheduled: true,
            arrival_delays: vec![0; stop_sequences.len()],
            departure_delays: vec![0; stop_sequences.len()],
            stop_sequences,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Seconds late (negative: early) at the stop.
    pub fn arrival_delay(&self, stop_index: usize) -> Option<i32> {
        self.arrival_delays.get(stop_index).copied()
    }

    pub fn departure_delay(&self, stop_index: usize) -> Option<i32> {
        self.departure_delays.get(stop_index).copied()
    }

    pub fn stop_sequence(&self, stop_index: usize) -> Option<u32> {
        self.stop_sequences.get(stop_index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_alight_codes() {
        let pattern = TripPattern {
            id: "p".into(),
            board_types: vec![0, 2],
            alight_types: vec![1, 3],
        };
        assert_eq!(pattern.board_type(1).message(), Some("mustPhone"));
        assert_eq!(pattern.board_type(0).message(), None);
        assert_eq!(pattern.alight_type(0), BoardAlightType::Impossible);
        assert_eq!(pattern.alight_type(1).message(), Some("coordinateWithDriver"));
        assert_eq!(pattern.alight_type(7), BoardAlightType::None);
    }
}
