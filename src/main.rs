use clap::{Parser, Subcommand};
use std::error::Error;

mod commands;

use commands::catalog::catalog_command;
use commands::plan::{PlanArgs, plan_command};
use commands::profile::profile_command;

#[derive(Parser)]
#[command(name = "fuelplan", about = "Plan race nutrition along a GPX route")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Print the distance/elevation profile of a GPX track read from stdin")]
    Profile,
    #[command(about = "List the foods available for planning")]
    Catalog,
    #[command(
        about = "Place refuelling points on a GPX track read from stdin and summarise intake"
    )]
    Plan(PlanArgs),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Profile => profile_command(),
        Commands::Catalog => catalog_command(),
        Commands::Plan(args) => plan_command(&args),
    }
}
