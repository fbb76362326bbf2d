use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Path contains no travel: every waypoint is a leg switch or has no mode")]
    TrivialPath,
    #[error("Malformed path: {0}")]
    MalformedPath(String),
    #[error("Polyline encoding error: {0}")]
    Polyline(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
