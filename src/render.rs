use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::models::ScheduleRow;

/// Render the final filtered rows as a table plus the literal row count.
/// This is the whole presentation surface: no paging, no virtualization.
pub fn print_schedule(rows: &[&ScheduleRow]) {
    if rows.is_empty() {
        println!("{}", "No classes match the current selections.".yellow());
        return;
    }

    let with_roster = rows.iter().any(|r| r.roster.is_some());

    let mut table = Table::new();
    let mut header = vec![
        "Start", "End", "Room", "Building", "Campus", "Subject", "Catalog", "Section", "Course",
        "Instructor",
    ];
    if with_roster {
        header.push("Job Title");
        header.push("Dues");
    }
    table.set_header(header);

    for row in rows {
        let mut cells = vec![
            Cell::new(&row.meeting_start_time),
            Cell::new(&row.meeting_end_time),
            Cell::new(&row.room_prediction),
            Cell::new(&row.building_prediction),
            Cell::new(&row.campus_prediction),
            Cell::new(&row.subject),
            Cell::new(&row.catalog_number),
            Cell::new(&row.section),
            Cell::new(&row.course_description),
            Cell::new(&row.instructor_name),
        ];
        if with_roster {
            match &row.roster {
                Some(m) => {
                    cells.push(Cell::new(&m.job_title));
                    cells.push(Cell::new(if m.pays_dues { "Y" } else { "" }));
                }
                None => {
                    cells.push(Cell::new(""));
                    cells.push(Cell::new(""));
                }
            }
        }
        table.add_row(cells);
    }

    println!("{table}");
    println!("Total classes: {}", rows.len());
}

/// Footer for the subject-campus view: distinct predicted buildings in the
/// final table.
pub fn print_buildings_used(buildings: &[String]) {
    if !buildings.is_empty() {
        println!("Buildings used: {}", buildings.join(", "));
    }
}
