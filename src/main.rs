mod buildings;
mod cli;
mod error;
mod fetch;
mod fmt;
mod loader;
mod models;
mod pipeline;
mod render;
mod roster;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Explore {
            campus,
            day,
            subject,
            schedule,
            roster,
            buildings,
        } => cli::explore::run(campus, day, subject, schedule, roster, buildings),
        Commands::CampusBuilding {
            day,
            campus,
            building,
            schedule,
        } => cli::campus_building::run(day, campus, building, schedule),
        Commands::SubjectCampus {
            day,
            subject,
            campus,
            schedule,
        } => cli::subject_campus::run(day, subject, campus, schedule),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
