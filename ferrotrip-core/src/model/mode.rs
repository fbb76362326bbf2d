use std::fmt;

use serde::{Deserialize, Serialize};

/// Mode used to traverse an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraverseMode {
    Walk,
    Bicycle,
    Car,
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
    Airplane,
    /// Not a travel mode: a pause between legs, such as waiting at a stop.
    LegSwitch,
}

impl TraverseMode {
    /// Walking, cycling or driving on the street network.
    pub fn is_on_street_non_transit(self) -> bool {
        matches!(self, Self::Walk | Self::Bicycle | Self::Car)
    }

    pub fn is_transit(self) -> bool {
        !matches!(
            self,
            Self::Walk | Self::Bicycle | Self::Car | Self::LegSwitch
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Walk => "WALK",
            Self::Bicycle => "BICYCLE",
            Self::Car => "CAR",
            Self::Tram => "TRAM",
            Self::Subway => "SUBWAY",
            Self::Rail => "RAIL",
            Self::Bus => "BUS",
            Self::Ferry => "FERRY",
            Self::CableCar => "CABLE_CAR",
            Self::Gondola => "GONDOLA",
            Self::Funicular => "FUNICULAR",
            Self::Airplane => "AIRPLANE",
            Self::LegSwitch => "LEG_SWITCH",
        }
    }
}

impl fmt::Display for TraverseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
