//! Output model: what a rendered itinerary looks like.
//!
//! Everything here is owned by the itinerary that contains it and
//! serializes directly into a response document.

pub mod itinerary;
pub mod leg;
pub mod place;
pub mod walk_step;

pub use itinerary::{Itinerary, TripPlan};
pub use leg::{EncodedPolyline, Leg, LocalizedAlert};
pub use place::{Place, VertexType};
pub use walk_step::{AbsoluteDirection, BikeRentalStationInfo, RelativeDirection, WalkStep};
