use super::load_planner;
use std::error::Error;
use std::io::{self, Write};

pub fn profile_command() -> Result<(), Box<dyn Error>> {
    let planner = load_planner()?;

    let mut out = io::stdout().lock();
    writeln!(out, "distance_km,elevation_m")?;
    for point in planner.profile().points() {
        writeln!(out, "{:.6},{}", point.distance, point.elevation)?;
    }
    Ok(())
}
