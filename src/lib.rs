pub mod error;
pub mod geo;
pub mod gpxxml;
pub mod nutrition;
pub mod pacing;
pub mod planner;
pub mod waypoints;

pub use error::{Field, PlanError, Result, SampleFault};
pub use geo::{GeoSample, Profile, ProfilePoint, build_profile, distance_km};
pub use nutrition::{
    Aggregate, Catalog, CatalogEntry, FoodAssignment, FoodKind, NutritionLedger, aggregate,
};
pub use planner::{Planner, WaypointView};
pub use waypoints::{Waypoint, WaypointStore};

/// Planned total time for the route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl PlanDuration {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.hours as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / 3600.0
    }
}

impl From<PlanDuration> for time::Duration {
    fn from(d: PlanDuration) -> Self {
        time::Duration::hours(d.hours.into())
            + time::Duration::minutes(d.minutes.into())
            + time::Duration::seconds(d.seconds.into())
    }
}

/// Parses `H:MM:SS` or `H:MM` into a [`PlanDuration`].
pub fn parse_plan_duration(s: &str) -> Result<PlanDuration> {
    let invalid = || PlanError::InvalidDuration(s.to_owned());
    let parts = s
        .trim()
        .split(':')
        .map(|p| p.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<u32>>>()?;

    match parts[..] {
        [hours, minutes] => Ok(PlanDuration::new(hours, minutes, 0)),
        [hours, minutes, seconds] => Ok(PlanDuration::new(hours, minutes, seconds)),
        _ => Err(invalid()),
    }
}
