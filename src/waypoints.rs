use crate::error::{PlanError, Result};
use crate::geo::Profile;
use crate::nutrition::FoodAssignment;
use std::cmp::Ordering;

/// A profile point picked for refuelling, with the foods planned there.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    distance: f64,
    elevation: f64,
    foods: Vec<FoodAssignment>,
}

impl Waypoint {
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn foods(&self) -> &[FoodAssignment] {
        &self.foods
    }

    pub(crate) fn foods_mut(&mut self) -> &mut Vec<FoodAssignment> {
        &mut self.foods
    }
}

/// Waypoints kept sorted by distance, at most one per distance.
#[derive(Debug, Clone, Default)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
}

impl WaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn search(&self, distance: f64) -> std::result::Result<usize, usize> {
        self.waypoints.binary_search_by(|w| {
            w.distance
                .partial_cmp(&distance)
                .unwrap_or(Ordering::Less)
        })
    }

    /// Snaps `target` to the nearest profile point and places a waypoint
    /// there. If one already exists at that point it is returned as is.
    pub fn add_nearest(&mut self, profile: &Profile, target: f64) -> Result<&Waypoint> {
        if !target.is_finite() {
            return Err(PlanError::InvalidDistance(target));
        }
        let nearest = profile
            .nearest_index(target)
            .map(|i| profile.points()[i])
            .ok_or(PlanError::EmptyProfile)?;

        let index = match self.search(nearest.distance) {
            Ok(existing) => existing,
            Err(slot) => {
                log::debug!(
                    "waypoint at {} km ({} m) for target {}",
                    nearest.distance,
                    nearest.elevation,
                    target
                );
                self.waypoints.insert(
                    slot,
                    Waypoint {
                        distance: nearest.distance,
                        elevation: nearest.elevation,
                        foods: Vec::new(),
                    },
                );
                slot
            }
        };
        Ok(&self.waypoints[index])
    }

    /// Removes the waypoint at exactly `distance`, if there is one.
    pub fn remove(&mut self, distance: f64) -> Option<Waypoint> {
        let index = self.search(distance).ok()?;
        log::debug!("removed waypoint at {} km", distance);
        Some(self.waypoints.remove(index))
    }

    pub fn list(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, distance: f64) -> Option<&Waypoint> {
        self.search(distance).ok().map(|i| &self.waypoints[i])
    }

    pub(crate) fn get_mut(&mut self, distance: f64) -> Option<&mut Waypoint> {
        let index = self.search(distance).ok()?;
        Some(&mut self.waypoints[index])
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::ProfilePoint;

    fn profile(points: &[(f64, f64)]) -> Profile {
        Profile::from_points(
            points
                .iter()
                .map(|&(distance, elevation)| ProfilePoint {
                    distance,
                    elevation,
                })
                .collect(),
        )
        .unwrap()
    }

    fn distances(store: &WaypointStore) -> Vec<f64> {
        store.list().iter().map(|w| w.distance()).collect()
    }

    /// Tests that add_nearest snaps to the closest point and remove clears it.
    #[test]
    fn test_add_nearest_snaps_to_closest_point() {
        let profile = profile(&[(0.0, 100.0), (1.0, 110.0), (2.0, 90.0)]);
        let mut store = WaypointStore::new();

        let waypoint = store.add_nearest(&profile, 0.9).unwrap();
        assert_eq!(waypoint.distance(), 1.0);
        assert_eq!(waypoint.elevation(), 110.0);
        assert!(waypoint.foods().is_empty());

        assert!(store.remove(1.0).is_some());
        assert!(store.list().is_empty());
    }

    /// Tests that targets resolving to the same point create a single waypoint.
    #[test]
    fn test_add_nearest_is_idempotent() {
        let profile = profile(&[(0.0, 100.0), (1.0, 110.0), (2.0, 90.0)]);
        let mut store = WaypointStore::new();

        store.add_nearest(&profile, 0.9).unwrap();
        store.add_nearest(&profile, 0.9).unwrap();
        store.add_nearest(&profile, 1.2).unwrap();
        assert_eq!(distances(&store), vec![1.0]);
    }

    /// Tests that re-adding an existing waypoint keeps its foods.
    #[test]
    fn test_add_nearest_keeps_existing_foods() {
        use crate::nutrition::NutritionLedger;

        let profile = profile(&[(0.0, 100.0), (1.0, 110.0), (2.0, 90.0)]);
        let ledger = NutritionLedger::default();
        let mut store = WaypointStore::new();
        store.add_nearest(&profile, 1.0).unwrap();
        ledger.add_food(&mut store, 1.0, "Maurten Gel 100").unwrap();

        let again = store.add_nearest(&profile, 1.1).unwrap();
        assert_eq!(again.foods().len(), 1);
    }

    /// Tests that waypoints stay sorted by distance whatever the insertion order.
    #[test]
    fn test_waypoints_stay_sorted() {
        let profile = profile(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0), (4.0, 5.0)]);
        let mut store = WaypointStore::new();
        for target in [3.1, 0.2, 4.4, 1.9, 0.0, 3.0] {
            store.add_nearest(&profile, target).unwrap();
        }
        assert_eq!(distances(&store), vec![0.0, 2.0, 3.0, 4.0]);
    }

    /// Tests that add_nearest on an empty profile fails and inserts nothing.
    #[test]
    fn test_add_nearest_on_empty_profile() {
        let mut store = WaypointStore::new();
        assert_eq!(
            store.add_nearest(&Profile::default(), 1.0),
            Err(PlanError::EmptyProfile)
        );
        assert!(store.is_empty());
    }

    /// Tests that NaN and infinite targets are rejected.
    #[test]
    fn test_add_nearest_rejects_non_finite_target() {
        let profile = profile(&[(0.0, 100.0), (1.0, 110.0)]);
        let mut store = WaypointStore::new();
        assert!(matches!(
            store.add_nearest(&profile, f64::NAN),
            Err(PlanError::InvalidDistance(_))
        ));
        assert_eq!(
            store.add_nearest(&profile, f64::INFINITY),
            Err(PlanError::InvalidDistance(f64::INFINITY))
        );
        assert!(store.is_empty());
    }

    /// Tests that removing a distance without a waypoint does nothing.
    #[test]
    fn test_remove_missing_distance_is_noop() {
        let profile = profile(&[(0.0, 100.0), (1.0, 110.0), (2.0, 90.0)]);
        let mut store = WaypointStore::new();
        store.add_nearest(&profile, 2.0).unwrap();

        assert!(store.remove(1.0).is_none());
        assert!(store.remove(f64::NAN).is_none());
        assert_eq!(distances(&store), vec![2.0]);
    }

    /// Tests that points sharing a distance map to one waypoint with the first elevation.
    #[test]
    fn test_zero_length_steps_share_one_waypoint() {
        let profile = profile(&[(0.0, 100.0), (1.0, 110.0), (1.0, 130.0), (2.0, 90.0)]);
        let mut store = WaypointStore::new();
        store.add_nearest(&profile, 0.95).unwrap();
        let waypoint = store.add_nearest(&profile, 1.05).unwrap();
        assert_eq!(waypoint.elevation(), 110.0);
        assert_eq!(store.len(), 1);
    }
}
