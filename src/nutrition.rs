//! Food catalog, per-waypoint food assignments and the nutrient totals
//! derived from them.

use crate::error::{PlanError, Result};
use crate::waypoints::{Waypoint, WaypointStore};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Puree,
    Gel,
    Bar,
}

impl fmt::Display for FoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FoodKind::Puree => "Purée",
            FoodKind::Gel => "Gel",
            FoodKind::Bar => "Barre",
        };
        f.write_str(label)
    }
}

/// One product of the catalog. Nutrients are per serving.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub kind: FoodKind,
    pub brand: String,
    pub price: f64,
    pub carbs: f64,
    pub calories: f64,
    pub protein: f64,
}

impl CatalogEntry {
    fn new(
        name: &str,
        kind: FoodKind,
        brand: &str,
        price: f64,
        carbs: f64,
        calories: f64,
        protein: f64,
    ) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            brand: brand.to_owned(),
            price,
            carbs,
            calories,
            protein,
        }
    }
}

/// Immutable table of the foods a plan can use, keyed by name.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Arc<CatalogEntry>>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(PlanError::DuplicateFood(entry.name.clone()));
            }
        }
        Ok(Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        })
    }

    /// The products offered by default.
    pub fn builtin() -> Self {
        use FoodKind::*;
        let entries = vec![
            CatalogEntry::new(
                "Purée nutritionnelle bio Baouw framboise, fraise, basilic",
                Puree,
                "Baouw",
                3.25,
                11.0,
                66.0,
                0.01,
            ),
            CatalogEntry::new(
                "Purée nutritionnelle bio Baouw poire, pomme, menthe",
                Puree,
                "Baouw",
                2.95,
                11.0,
                66.0,
                0.01,
            ),
            CatalogEntry::new("Maurten Gel 100", Gel, "Maurten", 3.6, 25.0, 100.0, 0.0),
            CatalogEntry::new("Maurten Gel 100 CAF", Gel, "Maurten", 4.2, 25.0, 100.0, 0.0),
            CatalogEntry::new(
                "Pâte de fruits Fruit'n Perf Bio Overstim",
                Bar,
                "OVERSTIMS",
                1.65,
                19.0,
                77.0,
                0.5,
            ),
            CatalogEntry::new(
                "Gaufre énergétique Näak Ultra Energy saveur chocolat",
                Bar,
                "Naak",
                2.25,
                17.0,
                140.0,
                3.0,
            ),
            CatalogEntry::new(
                "Gaufre énergétique Näak Ultra Energy saveur sirop erable",
                Bar,
                "Naak",
                2.25,
                17.0,
                140.0,
                3.0,
            ),
        ];
        Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.lookup(name).map(|e| e.as_ref())
    }

    fn lookup(&self, name: &str) -> Option<&Arc<CatalogEntry>> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A catalog product placed at a waypoint. Shares the catalog's entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodAssignment(Arc<CatalogEntry>);

impl FoodAssignment {
    pub fn food(&self) -> &CatalogEntry {
        &self.0
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }
}

/// Attaches and detaches catalog foods on the waypoints of a store.
#[derive(Debug, Clone, Default)]
pub struct NutritionLedger {
    catalog: Catalog,
}

impl NutritionLedger {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Appends one serving of `food_name` to the waypoint at `distance`.
    /// The same food may be added any number of times.
    pub fn add_food(
        &self,
        store: &mut WaypointStore,
        distance: f64,
        food_name: &str,
    ) -> Result<()> {
        let waypoint = store
            .get_mut(distance)
            .ok_or(PlanError::UnknownWaypoint(distance))?;
        let entry = self
            .catalog
            .lookup(food_name)
            .ok_or_else(|| PlanError::UnknownFood(food_name.to_owned()))?;

        waypoint.foods_mut().push(FoodAssignment(Arc::clone(entry)));
        log::debug!("added {} at {} km", food_name, distance);
        Ok(())
    }

    /// Drops every assignment named `food_name` from the waypoint at
    /// `distance` and returns how many were removed.
    pub fn remove_food(
        &self,
        store: &mut WaypointStore,
        distance: f64,
        food_name: &str,
    ) -> Result<usize> {
        let waypoint = store
            .get_mut(distance)
            .ok_or(PlanError::UnknownWaypoint(distance))?;

        let foods = waypoint.foods_mut();
        let before = foods.len();
        foods.retain(|f| f.name() != food_name);
        let removed = before - foods.len();

        log::debug!("removed {} x {} at {} km", removed, food_name, distance);
        Ok(removed)
    }
}

/// Nutrient totals over a plan and the matching hourly rates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregate {
    pub total_carbs: f64,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_price: f64,
    pub avg_carbs_per_hour: f64,
    pub avg_calories_per_hour: f64,
    pub avg_protein_per_hour: f64,
}

/// Sums every assignment of every waypoint. Rates are zero unless
/// `total_hours` is positive.
pub fn aggregate(waypoints: &[Waypoint], total_hours: f64) -> Aggregate {
    let mut totals = Aggregate::default();
    for food in waypoints.iter().flat_map(|w| w.foods()).map(|f| f.food()) {
        totals.total_carbs += food.carbs;
        totals.total_calories += food.calories;
        totals.total_protein += food.protein;
        totals.total_price += food.price;
    }

    if total_hours > 0.0 {
        totals.avg_carbs_per_hour = totals.total_carbs / total_hours;
        totals.avg_calories_per_hour = totals.total_calories / total_hours;
        totals.avg_protein_per_hour = totals.total_protein / total_hours;
    }
    totals
}
