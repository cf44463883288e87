use std::collections::HashMap;
use std::io::Read;

use crate::error::Result;
use crate::models::{RosterMatch, RosterRecord, ScheduleRow};

/// Job-title prefix that marks the instructor class shown by every view.
pub const LEO_TITLE_PREFIX: &str = "LEO";

/// Substring of the payroll deduction field that marks a dues payer.
pub const DUES_MARKER: &str = "DUES";

/// Total parse of a person identifier. Source data is inconsistently typed:
/// plain integers, whitespace-padded strings, and float renderings like
/// "12345.0" all occur; anything else (names, "STAFF", blanks) is `None`
/// and the row is excluded from joins.
pub fn parse_person_id(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let (int_part, frac) = s.split_once('.')?;
    if frac.chars().all(|c| c == '0') && !frac.is_empty() {
        return int_part.parse::<i64>().ok();
    }
    None
}

/// Decode the monthly roster CSV. Records whose `UM ID` fails numeric
/// coercion are dropped, the same exclusion the join applies.
pub fn load_roster<R: Read>(reader: R) -> Result<Vec<RosterRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    for required in ["UM ID", "Job Title"] {
        if !headers.iter().any(|h| h.trim() == required) {
            return Err(crate::error::SchedError::SchemaMismatch {
                layout: "roster".to_string(),
                column: required.to_string(),
            });
        }
    }
    let mut records = Vec::new();
    for result in rdr.deserialize::<RosterRecord>() {
        let Ok(rec) = result else { continue };
        if parse_person_id(&rec.um_id).is_some() {
            records.push(rec);
        }
    }
    Ok(records)
}

/// Left-join schedule rows against the roster on instructor id, then keep
/// only rows whose job title starts with `title_prefix` (case-insensitive).
///
/// The join annotates; it never alters the schedule fields. Rows without a
/// parsed instructor id, without a roster match, or with a blank title all
/// fall out of the filtered result.
pub fn filter_by_title(
    rows: Vec<ScheduleRow>,
    roster: &[RosterRecord],
    title_prefix: &str,
) -> Vec<ScheduleRow> {
    let by_id: HashMap<i64, &RosterRecord> = roster
        .iter()
        .filter_map(|r| parse_person_id(&r.um_id).map(|id| (id, r)))
        .collect();
    let prefix = title_prefix.to_uppercase();

    rows.into_iter()
        .filter_map(|mut row| {
            let rec = row.instructor_id.and_then(|id| by_id.get(&id))?;
            let title = rec.job_title.as_deref().unwrap_or("").trim();
            if title.is_empty() || !title.to_uppercase().starts_with(&prefix) {
                return None;
            }
            row.roster = Some(RosterMatch {
                job_title: title.to_string(),
                pays_dues: rec.pays_dues(DUES_MARKER),
                appointment_start: rec.appointment_start.clone(),
                fte: rec.fte.clone(),
                department: rec.department.clone(),
            });
            Some(row)
        })
        .collect()
}
