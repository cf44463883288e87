use std::io::Read;

use csv::StringRecord;

use crate::error::{Result, SchedError};
use crate::fmt::normalize_time;
use crate::models::ScheduleRow;
use crate::roster::parse_person_id;

// ---------------------------------------------------------------------------
// Header helpers
// ---------------------------------------------------------------------------

fn header_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn field<'a>(record: &'a StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

fn require(headers: &StringRecord, layout: SourceLayout, name: &str) -> Result<usize> {
    header_index(headers, name).ok_or_else(|| SchedError::SchemaMismatch {
        layout: layout.name().to_string(),
        column: name.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Source layouts — enum dispatch, one variant per campus file shape
// ---------------------------------------------------------------------------

/// A campus-specific CSV shape: which columns exist, what they are called,
/// how many junk rows precede the header, and what counts as a truthy
/// day-of-week marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    /// Ann Arbor schedule-of-classes export. Named columns, day flags `Y`.
    AnnArbor,
    /// Dearborn term class schedule report. Three junk rows, then an
    /// unusable header row; columns are positional. Day flags are the
    /// letter codes M/T/W/R/F/X.
    Dearborn,
    /// Flint export. Named columns, weekday flags `X`, Mon-Fri only.
    Flint,
    /// Published pre-enriched schedule carrying the prediction columns.
    Combined,
}

impl SourceLayout {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnnArbor => "Ann Arbor",
            Self::Dearborn => "Dearborn",
            Self::Flint => "Flint",
            Self::Combined => "combined",
        }
    }

    /// True when this layout already carries building/room/campus
    /// predictions and does not need the matcher pass.
    pub fn pre_enriched(&self) -> bool {
        matches!(self, Self::Combined)
    }

    pub fn parse_str(&self, data: &str) -> Result<Vec<ScheduleRow>> {
        self.parse(data.as_bytes())
    }

    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<ScheduleRow>> {
        match self {
            Self::AnnArbor => parse_named(reader, *self, &NAMED_DAYS_ABBREV, |v| v == "Y"),
            Self::Flint => parse_named(reader, *self, &NAMED_DAYS_ABBREV, |v| v == "X"),
            Self::Combined => parse_named(reader, *self, &NAMED_DAYS_ABBREV, |v| v == "Y"),
            Self::Dearborn => parse_dearborn(reader),
        }
    }
}

// ---------------------------------------------------------------------------
// Named-column layouts (Ann Arbor, Flint, Combined)
// ---------------------------------------------------------------------------

const NAMED_DAYS_ABBREV: [&str; 7] = ["Mon", "Tues", "Wed", "Thurs", "Fri", "Sat", "Sun"];

fn parse_named<R: Read>(
    reader: R,
    layout: SourceLayout,
    day_columns: &[&str; 7],
    day_truthy: fn(&str) -> bool,
) -> Result<Vec<ScheduleRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let idx_subject = require(&headers, layout, "Subject")?;
    // Only layouts that feed the roster join carry an instructor id.
    let idx_instr_id = match layout {
        SourceLayout::AnnArbor => Some(require(&headers, layout, "Class Instr ID")?),
        _ => header_index(&headers, "Class Instr ID"),
    };
    let (idx_bldg, idx_room, idx_campus) = if layout.pre_enriched() {
        (
            Some(require(&headers, layout, "BldgPrediction")?),
            header_index(&headers, "RoomPrediction"),
            Some(require(&headers, layout, "CampusPrediction")?),
        )
    } else {
        (None, None, None)
    };

    let idx_catalog = header_index(&headers, "Catalog Nbr");
    let idx_section = header_index(&headers, "Class Section");
    let idx_descr = header_index(&headers, "Crse Descr");
    let idx_instr_name = header_index(&headers, "Class Instr Name");
    let idx_start_time = header_index(&headers, "Meeting Time Start");
    let idx_end_time = header_index(&headers, "Meeting Time End");
    let idx_start_date = header_index(&headers, "Meeting Start Dt");
    let idx_end_date = header_index(&headers, "Meeting End Dt");
    let idx_facility = header_index(&headers, "Facility ID");
    let idx_mode = header_index(&headers, "Instruction Mode Descrshort");
    let idx_days: Vec<Option<usize>> = day_columns
        .iter()
        .map(|d| header_index(&headers, d))
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let Ok(record) = result else { continue };
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let mut days = [false; 7];
        for (slot, idx) in days.iter_mut().zip(&idx_days) {
            *slot = day_truthy(field(&record, *idx));
        }
        rows.push(ScheduleRow {
            subject: field(&record, Some(idx_subject)).to_string(),
            catalog_number: field(&record, idx_catalog).to_string(),
            section: field(&record, idx_section).to_string(),
            course_description: field(&record, idx_descr).to_string(),
            instructor_id: parse_person_id(field(&record, idx_instr_id)),
            instructor_name: field(&record, idx_instr_name).to_string(),
            meeting_start_time: normalize_time(field(&record, idx_start_time)),
            meeting_end_time: normalize_time(field(&record, idx_end_time)),
            meeting_start_date: field(&record, idx_start_date).to_string(),
            meeting_end_date: field(&record, idx_end_date).to_string(),
            days,
            facility_raw: field(&record, idx_facility).to_string(),
            instruction_mode: field(&record, idx_mode).to_string(),
            room_prediction: field(&record, idx_room).to_string(),
            building_prediction: field(&record, idx_bldg).to_string(),
            campus_prediction: field(&record, idx_campus).to_string(),
            roster: None,
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Dearborn layout — positional columns after skipped preamble
// ---------------------------------------------------------------------------

const DEARBORN_COLUMNS: usize = 22;
const DEARBORN_SKIP_ROWS: usize = 3;

const IDX_SUBJECT: usize = 2;
const IDX_COURSE_NUMBER: usize = 3;
const IDX_SEQ_NUMBER: usize = 4;
const IDX_INSTRUCTOR_ID: usize = 5;
const IDX_INSTRUCTOR_LAST: usize = 6;
const IDX_INSTRUCTOR_FIRST: usize = 7;
const IDX_ROOM_CODE: usize = 8;
const IDX_BUILDING_CODE: usize = 9;
const IDX_BEGIN_TIME: usize = 12;
const IDX_END_TIME: usize = 13;
const IDX_MONDAY: usize = 14;
const IDX_INSTRUCTIONAL_MODE: usize = 21;

fn dearborn_day_truthy(v: &str) -> bool {
    matches!(v, "M" | "T" | "W" | "R" | "F" | "X")
}

fn parse_dearborn<R: Read>(reader: R) -> Result<Vec<ScheduleRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut header_seen = false;
    for (i, result) in rdr.records().enumerate() {
        let Ok(record) = result else { continue };
        if i < DEARBORN_SKIP_ROWS {
            continue;
        }
        if !header_seen {
            // The first row past the preamble is the report's own header.
            if record.len() < DEARBORN_COLUMNS {
                return Err(SchedError::UnsupportedLayout(format!(
                    "Dearborn report header has {} columns, expected {}",
                    record.len(),
                    DEARBORN_COLUMNS
                )));
            }
            header_seen = true;
            continue;
        }
        if record.len() < DEARBORN_COLUMNS || record[IDX_SUBJECT].trim().is_empty() {
            continue;
        }
        let mut days = [false; 7];
        for (offset, slot) in days.iter_mut().enumerate() {
            *slot = dearborn_day_truthy(record[IDX_MONDAY + offset].trim());
        }
        let first = record[IDX_INSTRUCTOR_FIRST].trim();
        let last = record[IDX_INSTRUCTOR_LAST].trim();
        let building = record[IDX_BUILDING_CODE].trim();
        let room = record[IDX_ROOM_CODE].trim();
        rows.push(ScheduleRow {
            subject: record[IDX_SUBJECT].trim().to_string(),
            catalog_number: record[IDX_COURSE_NUMBER].trim().to_string(),
            section: record[IDX_SEQ_NUMBER].trim().to_string(),
            course_description: String::new(),
            instructor_id: parse_person_id(record[IDX_INSTRUCTOR_ID].trim()),
            instructor_name: format!("{first} {last}").trim().to_string(),
            meeting_start_time: normalize_time(record[IDX_BEGIN_TIME].trim()),
            meeting_end_time: normalize_time(record[IDX_END_TIME].trim()),
            meeting_start_date: String::new(),
            meeting_end_date: String::new(),
            days,
            facility_raw: format!("{building} {room}").trim().to_string(),
            instruction_mode: record[IDX_INSTRUCTIONAL_MODE].trim().to_string(),
            ..Default::default()
        });
    }

    if !header_seen {
        return Err(SchedError::UnsupportedLayout(
            "Dearborn report ended before its header row".to_string(),
        ));
    }
    Ok(rows)
}
