use super::{another_round, describe, pick_day, pick_value};
use crate::error::Result;
use crate::fetch::{Session, Source, COMBINED_SCHEDULE_URL};
use crate::loader::SourceLayout;
use crate::pipeline::{Dimension, FilterPipeline};
use crate::render;

pub fn run(
    mut day: Option<String>,
    mut campus: Option<String>,
    mut building: Option<String>,
    schedule: Option<String>,
) -> Result<()> {
    let session = Session::new()?;
    let source = schedule
        .map(|s| Source::from_arg(&s))
        .unwrap_or_else(|| Source::Url(COMBINED_SCHEDULE_URL.to_string()));
    let data = session.fetch_text(&source)?;
    let rows = SourceLayout::Combined.parse_str(&data)?;

    let preseeded = day.is_some() && campus.is_some() && building.is_some();
    loop {
        let sel_day = pick_day(day.take().as_deref())?;
        let mut pipeline = FilterPipeline::new(&rows);
        pipeline.select_day(sel_day);

        let campus_opts = pipeline.options(Dimension::Campus);
        let sel_campus = pick_value("Select a campus", &campus_opts, false, campus.take().as_deref())?;
        pipeline.select(Dimension::Campus, &sel_campus);

        let building_opts = pipeline.options(Dimension::Building);
        let sel_building =
            pick_value("Select a building", &building_opts, true, building.take().as_deref())?;
        pipeline.select(Dimension::Building, &sel_building);

        println!(
            "\nShowing schedule for {} on {} campus for {}:",
            describe(&sel_building),
            describe(&sel_campus),
            sel_day.label()
        );
        render::print_schedule(&pipeline.rows());

        if preseeded || !another_round() {
            break;
        }
    }
    Ok(())
}
