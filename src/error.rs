use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanError>;

/// Which coordinate of a track point was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Latitude,
    Longitude,
    Elevation,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Elevation => "elevation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFault {
    #[error("missing {0}")]
    Missing(Field),
    #[error("{0} is not a finite number")]
    NotNumeric(Field),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("malformed track point #{index}: {fault}")]
    MalformedTrack { index: usize, fault: SampleFault },
    #[error("invalid GPX document: {0}")]
    InvalidDocument(String),
    #[error("no elevation profile loaded")]
    EmptyProfile,
    #[error("no waypoint at {0} km")]
    UnknownWaypoint(f64),
    #[error("unknown food: {0}")]
    UnknownFood(String),
    #[error("invalid target distance: {0}")]
    InvalidDistance(f64),
    #[error("profile point #{index} breaks distance ordering")]
    UnorderedProfile { index: usize },
    #[error("food listed twice in catalog: {0}")]
    DuplicateFood(String),
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}
