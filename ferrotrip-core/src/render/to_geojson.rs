use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::plan::{Itinerary, Leg};

impl Itinerary {
    /// Converts the itinerary to a `GeoJSON` `FeatureCollection`, one
    /// feature per leg.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .legs
            .iter()
            .enumerate()
            .map(|(idx, leg)| leg_feature(idx, leg))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn leg_feature(leg_idx: usize, leg: &Leg) -> Result<Feature, Error> {
    // legs without a traversable shape are drawn at their start
    let geometry = if leg.geometry.0.len() >= 2 {
        Geometry::new(GeoJsonValue::from(&leg.geometry))
    } else {
        let start = Point::new(leg.from.lon, leg.from.lat);
        Geometry::new(GeoJsonValue::from(&start))
    };

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_index": leg_idx,
            "mode": leg.mode,
            "route": leg.route,
            "from_name": leg.from.name,
            "to_name": leg.to.name,
            "start_time": leg.start_time.to_rfc3339(),
            "end_time": leg.end_time.to_rfc3339(),
            "distance": leg.distance,
            "duration": leg.duration(),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
