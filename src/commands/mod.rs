pub mod catalog;
pub mod plan;
pub mod profile;

use fuelplan::Planner;
use std::error::Error;
use std::io::{self, Read};

/// Reads a GPX document from stdin into a fresh planner.
fn load_planner() -> Result<Planner, Box<dyn Error>> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;

    let mut planner = Planner::default();
    planner.on_track_uploaded(&input)?;
    Ok(planner)
}
