use super::{another_round, describe, pick_day, pick_value};
use crate::error::Result;
use crate::fetch::{Session, Source, COMBINED_SCHEDULE_URL};
use crate::loader::SourceLayout;
use crate::models::ScheduleRow;
use crate::pipeline::{Dimension, FilterPipeline};
use crate::render;

pub fn run(
    mut day: Option<String>,
    mut subject: Option<String>,
    mut campus: Option<String>,
    schedule: Option<String>,
) -> Result<()> {
    let session = Session::new()?;
    let source = schedule
        .map(|s| Source::from_arg(&s))
        .unwrap_or_else(|| Source::Url(COMBINED_SCHEDULE_URL.to_string()));
    let data = session.fetch_text(&source)?;
    let rows = SourceLayout::Combined.parse_str(&data)?;

    let preseeded = day.is_some() && subject.is_some() && campus.is_some();
    loop {
        let sel_day = pick_day(day.take().as_deref())?;
        let mut pipeline = FilterPipeline::new(&rows);
        pipeline.select_day(sel_day);

        let subject_opts = pipeline.options(Dimension::Subject);
        let sel_subject =
            pick_value("Select a subject", &subject_opts, true, subject.take().as_deref())?;
        pipeline.select(Dimension::Subject, &sel_subject);

        let campus_opts = pipeline.options(Dimension::Campus);
        let sel_campus = pick_value("Select a campus", &campus_opts, false, campus.take().as_deref())?;
        pipeline.select(Dimension::Campus, &sel_campus);

        let mut final_rows: Vec<&ScheduleRow> = pipeline.rows();
        final_rows.sort_by(|a, b| a.building_prediction.cmp(&b.building_prediction));

        println!(
            "\nShowing schedule for {} on {} campus for {}:",
            describe(&sel_subject),
            describe(&sel_campus),
            sel_day.label()
        );
        render::print_schedule(&final_rows);
        render::print_buildings_used(&pipeline.distinct(Dimension::Building));

        if preseeded || !another_round() {
            break;
        }
    }
    Ok(())
}
