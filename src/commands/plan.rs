use super::load_planner;
use clap::Args;
use fuelplan::pacing::arrival_time;
use fuelplan::{Planner, parse_plan_duration};
use std::error::Error;
use std::io::{self, Write};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[arg(short, long, help = "Planned total time, H:MM:SS or H:MM")]
    pub duration: String,

    #[arg(
        short,
        long = "point",
        value_name = "KM",
        help = "Add a waypoint at the profile point nearest to KM"
    )]
    pub points: Vec<f64>,

    #[arg(
        short,
        long = "food",
        value_name = "KM=NAME",
        help = "Add one serving of NAME at the profile point nearest to KM"
    )]
    pub foods: Vec<String>,

    #[arg(long, help = "Start time (RFC 3339), prints arrival clock times")]
    pub start: Option<String>,
}

pub fn plan_command(args: &PlanArgs) -> Result<(), Box<dyn Error>> {
    let duration = parse_plan_duration(&args.duration)?;
    let start = args
        .start
        .as_deref()
        .map(|s| OffsetDateTime::parse(s, &Rfc3339))
        .transpose()?;

    let mut planner = load_planner()?;
    planner.set_duration(duration);

    for &km in &args.points {
        planner.on_chart_clicked(km)?;
    }
    for food in &args.foods {
        let (km, name) = parse_food_arg(food)?;
        planner.add_food_near(km, name)?;
    }

    write_plan(&planner, start, &mut io::stdout().lock())
}

fn parse_food_arg(s: &str) -> Result<(f64, &str), Box<dyn Error>> {
    let (km, name) = s
        .split_once('=')
        .ok_or_else(|| format!("Food must be given as KM=NAME: {s}"))?;
    Ok((km.trim().parse()?, name.trim()))
}

fn write_plan<W: Write>(
    planner: &Planner,
    start: Option<OffsetDateTime>,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let profile = planner.profile();
    let (low, high) = profile.elevation_range().unwrap_or_default();
    writeln!(
        out,
        "Route: {:.2} km, {} points, elevation {:.2}-{:.2} m",
        profile.max_distance(),
        profile.len(),
        low,
        high
    )?;
    let d = planner.duration();
    writeln!(
        out,
        "Planned duration: {:02}:{:02}:{:02}",
        d.hours, d.minutes, d.seconds
    )?;

    for (i, view) in planner.waypoint_views().iter().enumerate() {
        let arrival = match start {
            Some(start) => Some(arrival_time(start, view.elapsed_hours)?.format(&Rfc3339)?),
            None => None,
        };
        write!(
            out,
            "Waypoint {}: km {:.2}, elevation {:.2} m, time {}",
            i + 1,
            view.distance,
            view.elevation,
            view.elapsed
        )?;
        if let Some(arrival) = arrival {
            write!(out, ", arrival {arrival}")?;
        }
        writeln!(out)?;
        for food in view.foods {
            writeln!(out, "  - {} ({})", food.name(), food.food().brand)?;
        }
    }

    let totals = planner.aggregate();
    writeln!(
        out,
        "Carbs: {:.2} g/h, total {:.2} g",
        totals.avg_carbs_per_hour, totals.total_carbs
    )?;
    writeln!(
        out,
        "Calories: {:.2} kcal/h, total {:.2} kcal",
        totals.avg_calories_per_hour, totals.total_calories
    )?;
    writeln!(
        out,
        "Protein: {:.2} g/h, total {:.2} g",
        totals.avg_protein_per_hour, totals.total_protein
    )?;
    writeln!(out, "Cost: {:.2}", totals.total_price)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that parse_food_arg splits KM=NAME and rejects other shapes.
    #[test]
    fn test_parse_food_arg() {
        assert_eq!(
            parse_food_arg("12.5=Maurten Gel 100").unwrap(),
            (12.5, "Maurten Gel 100")
        );
        assert_eq!(
            parse_food_arg(" 3 = Maurten Gel 100 CAF").unwrap(),
            (3.0, "Maurten Gel 100 CAF")
        );
        assert!(parse_food_arg("Maurten Gel 100").is_err());
        assert!(parse_food_arg("ten=Maurten Gel 100").is_err());
    }

    /// Tests that write_plan prints route, waypoint, arrival and totals lines.
    #[test]
    fn test_write_plan() {
        let mut planner = Planner::default();
        planner
            .on_track_uploaded(
                r#"<gpx><trk><trkseg>
    <trkpt lat="45.00" lon="6.00"><ele>500</ele></trkpt>
    <trkpt lat="45.01" lon="6.00"><ele>520</ele></trkpt>
</trkseg></trk></gpx>"#,
            )
            .unwrap();
        planner.on_duration_changed(1, 30, 0);
        planner.add_food_near(5.0, "Maurten Gel 100").unwrap();

        let start = OffsetDateTime::parse("2023-06-24T06:00:00Z", &Rfc3339).unwrap();
        let mut out = Vec::new();
        write_plan(&planner, Some(start), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Route: 1.11 km, 2 points, elevation 500.00-520.00 m"));
        assert!(text.contains("Planned duration: 01:30:00"));
        assert!(text.contains(
            "Waypoint 1: km 1.11, elevation 520.00 m, time 01:30:00, arrival 2023-06-24T07:30:00Z"
        ));
        assert!(text.contains("  - Maurten Gel 100 (Maurten)"));
        assert!(text.contains("Carbs: 16.67 g/h, total 25.00 g"));
        assert!(text.contains("Cost: 3.60"));
    }
}
