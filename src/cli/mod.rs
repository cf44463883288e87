pub mod campus_building;
pub mod explore;
pub mod subject_campus;

use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Select};

use crate::error::{Result, SchedError};
use crate::models::Weekday;
use crate::pipeline::{DimOption, Selection, ALL_LABEL};

#[derive(Parser)]
#[command(name = "leosched", about = "Interactive explorer for LEO course-schedule data.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Explore one campus's schedule by day and subject. Ann Arbor rows are
    /// joined against the LEO roster.
    Explore {
        /// Campus: Ann Arbor, Dearborn, or Flint
        #[arg(long)]
        campus: Option<String>,
        /// Day of week (e.g. Monday)
        #[arg(long)]
        day: Option<String>,
        /// Subject code, or ALL
        #[arg(long)]
        subject: Option<String>,
        /// Schedule CSV (URL or local path; default per campus)
        #[arg(long)]
        schedule: Option<String>,
        /// Roster CSV (URL or local path)
        #[arg(long)]
        roster: Option<String>,
        /// Building dictionary JSON (URL or local path)
        #[arg(long)]
        buildings: Option<String>,
    },
    /// Browse the combined schedule by day, campus, and building.
    CampusBuilding {
        /// Day of week (e.g. Monday)
        #[arg(long)]
        day: Option<String>,
        /// Campus name
        #[arg(long)]
        campus: Option<String>,
        /// Building name, or ALL
        #[arg(long)]
        building: Option<String>,
        /// Schedule CSV (URL or local path)
        #[arg(long)]
        schedule: Option<String>,
    },
    /// Browse the combined schedule by day, subject, and campus, sorted by
    /// predicted building.
    SubjectCampus {
        /// Day of week (e.g. Monday)
        #[arg(long)]
        day: Option<String>,
        /// Subject code, or ALL
        #[arg(long)]
        subject: Option<String>,
        /// Campus name
        #[arg(long)]
        campus: Option<String>,
        /// Schedule CSV (URL or local path)
        #[arg(long)]
        schedule: Option<String>,
    },
}

fn prompt_error(e: dialoguer::Error) -> SchedError {
    SchedError::Other(format!("Prompt failed: {e}"))
}

/// Day-of-week selection: the fixed seven weekdays, no counts.
pub(crate) fn pick_day(preset: Option<&str>) -> Result<Weekday> {
    if let Some(label) = preset {
        return Weekday::from_label(label)
            .ok_or_else(|| SchedError::Other(format!("Unknown day of week: {label}")));
    }
    let labels: Vec<&str> = Weekday::ALL.iter().map(|d| d.label()).collect();
    let idx = Select::new()
        .with_prompt("Select a day of the week")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(Weekday::ALL[idx])
}

/// Categorical stage selection over the cascading option set. Options are
/// shown as "value (count)"; an ALL pseudo-option is prepended when the
/// stage allows it.
pub(crate) fn pick_value(
    prompt: &str,
    options: &[DimOption],
    allow_all: bool,
    preset: Option<&str>,
) -> Result<Selection> {
    if let Some(value) = preset {
        return Ok(Selection::from_label(value));
    }
    let mut labels: Vec<String> = Vec::new();
    if allow_all {
        labels.push(ALL_LABEL.to_string());
    }
    labels.extend(options.iter().map(|o| o.label()));
    if labels.is_empty() {
        return Ok(Selection::All);
    }
    let idx = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    if allow_all {
        if idx == 0 {
            return Ok(Selection::All);
        }
        return Ok(Selection::Value(options[idx - 1].value.clone()));
    }
    Ok(Selection::Value(options[idx].value.clone()))
}

pub(crate) fn another_round() -> bool {
    Confirm::new()
        .with_prompt("Change selections?")
        .default(false)
        .interact()
        .unwrap_or(false)
}

pub(crate) fn describe(selection: &Selection) -> String {
    match selection {
        Selection::All => ALL_LABEL.to_string(),
        Selection::Value(v) => v.clone(),
    }
}
