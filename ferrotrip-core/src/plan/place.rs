use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Classification of the vertex a place sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VertexType {
    Normal,
    Bikeshare,
    Bikepark,
    Transit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike_share_id: Option<String>,
    pub vertex_type: VertexType,
    pub arrival: Option<DateTime<FixedOffset>>,
    pub departure: Option<DateTime<FixedOffset>>,
    /// Name the user typed for this place, when it is a trip endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig: Option<String>,
}

impl Place {
    pub fn new(lon: f64, lat: f64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lon,
            lat,
            stop_id: None,
            stop_code: None,
            platform_code: None,
            zone_id: None,
            stop_index: None,
            stop_sequence: None,
            bike_share_id: None,
            vertex_type: VertexType::Normal,
            arrival: None,
            departure: None,
            orig: None,
        }
    }

    pub fn same_stop(&self, other: &Place) -> bool {
        self.stop_id.is_some() && self.stop_id == other.stop_id
    }
}
