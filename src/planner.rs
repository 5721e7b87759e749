//! The planning session: one route profile, its waypoints and their foods.
//!
//! Every `on_*` method is a user intent coming from a front end. Each one
//! either applies completely or returns an error and leaves the session as
//! it was.

use crate::PlanDuration;
use crate::error::{PlanError, Result};
use crate::geo::{GeoSample, Profile, build_profile};
use crate::gpxxml::extract_samples;
use crate::nutrition::{Aggregate, Catalog, FoodAssignment, NutritionLedger, aggregate};
use crate::pacing::{estimate_elapsed, format_elapsed};
use crate::waypoints::{Waypoint, WaypointStore};

/// What a front end shows for one waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointView<'a> {
    pub distance: f64,
    pub elevation: f64,
    pub elapsed_hours: f64,
    pub elapsed: String,
    pub foods: &'a [FoodAssignment],
}

#[derive(Debug, Clone, Default)]
pub struct Planner {
    profile: Profile,
    waypoints: WaypointStore,
    ledger: NutritionLedger,
    duration: PlanDuration,
}

impl Planner {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            ledger: NutritionLedger::new(catalog),
            ..Self::default()
        }
    }

    /// Replaces the route with the track of a GPX document.
    ///
    /// Waypoints and their foods are dropped together with the old profile.
    /// A document that fails to parse changes nothing.
    pub fn on_track_uploaded(&mut self, document: &str) -> Result<&Profile> {
        let samples = extract_samples(document.as_bytes())?;
        self.load_samples(&samples)
    }

    /// Same as [`Planner::on_track_uploaded`] for samples that are already decoded.
    pub fn load_samples(&mut self, samples: &[GeoSample]) -> Result<&Profile> {
        let profile = build_profile(samples)?;
        log::debug!(
            "loaded profile: {} points over {:.3} km, dropping {} waypoints",
            profile.len(),
            profile.max_distance(),
            self.waypoints.len()
        );
        self.profile = profile;
        self.waypoints.clear();
        Ok(&self.profile)
    }

    pub fn on_chart_clicked(&mut self, distance: f64) -> Result<&Waypoint> {
        self.waypoints.add_nearest(&self.profile, distance)
    }

    pub fn on_point_remove_clicked(&mut self, distance: f64) -> Option<Waypoint> {
        self.waypoints.remove(distance)
    }

    pub fn on_add_food(&mut self, distance: f64, food_name: &str) -> Result<()> {
        self.ledger.add_food(&mut self.waypoints, distance, food_name)
    }

    /// Returns the number of assignments removed.
    pub fn on_remove_food(&mut self, distance: f64, food_name: &str) -> Result<usize> {
        self.ledger.remove_food(&mut self.waypoints, distance, food_name)
    }

    pub fn on_duration_changed(&mut self, hours: u32, minutes: u32, seconds: u32) {
        self.duration = PlanDuration::new(hours, minutes, seconds);
    }

    pub fn set_duration(&mut self, duration: PlanDuration) {
        self.duration = duration;
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        self.waypoints.list()
    }

    pub fn catalog(&self) -> &Catalog {
        self.ledger.catalog()
    }

    pub fn duration(&self) -> PlanDuration {
        self.duration
    }

    /// Totals and hourly rates for the current plan duration.
    pub fn aggregate(&self) -> Aggregate {
        self.aggregate_for(self.duration.total_hours())
    }

    pub fn aggregate_for(&self, total_hours: f64) -> Aggregate {
        aggregate(self.waypoints.list(), total_hours)
    }

    /// Estimated elapsed hours at `distance` for the current duration.
    pub fn elapsed_at(&self, distance: f64) -> f64 {
        estimate_elapsed(
            distance,
            self.profile.max_distance(),
            self.duration.total_hours(),
        )
    }

    pub fn waypoint_views(&self) -> Vec<WaypointView<'_>> {
        self.waypoints
            .list()
            .iter()
            .map(|w| {
                let elapsed_hours = self.elapsed_at(w.distance());
                WaypointView {
                    distance: w.distance(),
                    elevation: w.elevation(),
                    elapsed_hours,
                    elapsed: format_elapsed(elapsed_hours),
                    foods: w.foods(),
                }
            })
            .collect()
    }

    /// Snaps `target` onto the profile and adds one serving there, creating
    /// the waypoint if needed. Returns the snapped distance.
    pub fn add_food_near(&mut self, target: f64, food_name: &str) -> Result<f64> {
        if self.catalog().find(food_name).is_none() {
            return Err(PlanError::UnknownFood(food_name.to_owned()));
        }
        let distance = self.on_chart_clicked(target)?.distance();
        self.on_add_food(distance, food_name)?;
        Ok(distance)
    }
}
