use colored::Colorize;
use dialoguer::Select;

use super::{another_round, describe, pick_day, pick_value};
use crate::buildings;
use crate::error::{Result, SchedError};
use crate::fetch::{Session, Source, ANN_ARBOR_SCHEDULE_URL, BUILDINGS_URL, MONTHLY_ROSTER_URL};
use crate::loader::SourceLayout;
use crate::pipeline::{Dimension, FilterPipeline};
use crate::render;
use crate::roster::{filter_by_title, LEO_TITLE_PREFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Campus {
    AnnArbor,
    Dearborn,
    Flint,
}

impl Campus {
    const ALL: [Campus; 3] = [Campus::AnnArbor, Campus::Dearborn, Campus::Flint];

    fn label(&self) -> &'static str {
        match self {
            Campus::AnnArbor => "Ann Arbor",
            Campus::Dearborn => "Dearborn",
            Campus::Flint => "Flint",
        }
    }

    fn layout(&self) -> SourceLayout {
        match self {
            Campus::AnnArbor => SourceLayout::AnnArbor,
            Campus::Dearborn => SourceLayout::Dearborn,
            Campus::Flint => SourceLayout::Flint,
        }
    }

    fn default_schedule(&self) -> Source {
        match self {
            Campus::AnnArbor => Source::Url(ANN_ARBOR_SCHEDULE_URL.to_string()),
            // Dearborn and Flint reports arrive as files, not published URLs.
            Campus::Dearborn => {
                Source::from_arg("DB LEO Term Class Schedule Report Summer II.csv")
            }
            Campus::Flint => Source::from_arg("Flint_S25.csv"),
        }
    }

    /// Only the Ann Arbor export carries the instructor id the roster join
    /// needs; the other campus reports are shown unjoined.
    fn joins_roster(&self) -> bool {
        matches!(self, Campus::AnnArbor)
    }
}

fn pick_campus(preset: Option<&str>) -> Result<Campus> {
    if let Some(label) = preset {
        return Campus::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .copied()
            .ok_or_else(|| SchedError::Other(format!("Unknown campus: {label}")));
    }
    let labels: Vec<&str> = Campus::ALL.iter().map(|c| c.label()).collect();
    let idx = Select::new()
        .with_prompt("Select a campus")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| SchedError::Other(format!("Prompt failed: {e}")))?;
    Ok(Campus::ALL[idx])
}

pub fn run(
    campus: Option<String>,
    mut day: Option<String>,
    mut subject: Option<String>,
    schedule: Option<String>,
    roster: Option<String>,
    buildings_src: Option<String>,
) -> Result<()> {
    let mut session = Session::new()?;
    let campus = pick_campus(campus.as_deref())?;
    let layout = campus.layout();

    let schedule_source = schedule
        .map(|s| Source::from_arg(&s))
        .unwrap_or_else(|| campus.default_schedule());
    let data = session.fetch_text(&schedule_source)?;
    let mut rows = layout.parse_str(&data)?;

    if !layout.pre_enriched() {
        let dict_source = buildings_src
            .map(|s| Source::from_arg(&s))
            .unwrap_or_else(|| Source::Url(BUILDINGS_URL.to_string()));
        buildings::annotate(&mut rows, session.buildings(&dict_source)?);
    }

    if campus.joins_roster() {
        let roster_source = roster
            .map(|s| Source::from_arg(&s))
            .unwrap_or_else(|| Source::Url(MONTHLY_ROSTER_URL.to_string()));
        rows = filter_by_title(rows, session.roster(&roster_source)?, LEO_TITLE_PREFIX);
    }

    println!("{}", format!("{} Schedule by Day and Subject", campus.label()).bold());

    let preseeded = day.is_some() && subject.is_some();
    loop {
        let sel_day = pick_day(day.take().as_deref())?;
        let mut pipeline = FilterPipeline::new(&rows);
        pipeline.select_day(sel_day);

        let subject_opts = pipeline.options(Dimension::Subject);
        let sel_subject =
            pick_value("Select a subject", &subject_opts, true, subject.take().as_deref())?;
        pipeline.select(Dimension::Subject, &sel_subject);

        println!(
            "\nShowing {} classes for {} on {}:",
            describe(&sel_subject),
            campus.label(),
            sel_day.label()
        );
        render::print_schedule(&pipeline.rows());

        if preseeded || !another_round() {
            break;
        }
    }
    Ok(())
}
