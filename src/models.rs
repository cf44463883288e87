use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Position in a `[bool; 7]` day-flag array, Monday first.
    pub fn index(&self) -> usize {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    pub fn from_label(label: &str) -> Option<Weekday> {
        Weekday::ALL.iter().find(|d| d.label() == label).copied()
    }
}

/// One course-meeting record, normalized across the per-campus layouts.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRow {
    pub subject: String,
    pub catalog_number: String,
    pub section: String,
    pub course_description: String,
    pub instructor_id: Option<i64>,
    pub instructor_name: String,
    /// Normalized to %H:%M; empty when the source value was unparsable.
    pub meeting_start_time: String,
    pub meeting_end_time: String,
    pub meeting_start_date: String,
    pub meeting_end_date: String,
    /// Monday..Sunday presence flags, already normalized from the
    /// source-specific truthy markers.
    pub days: [bool; 7],
    pub facility_raw: String,
    pub instruction_mode: String,
    /// Prediction triple filled by the building matcher (or read straight
    /// from a pre-enriched source). Never null: an unmatched facility keeps
    /// the raw text as the building label and empty room/campus.
    pub room_prediction: String,
    pub building_prediction: String,
    pub campus_prediction: String,
    pub roster: Option<RosterMatch>,
}

impl ScheduleRow {
    pub fn meets_on(&self, day: Weekday) -> bool {
        self.days[day.index()]
    }
}

/// One payroll/appointment record from the monthly roster CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterRecord {
    #[serde(rename = "UM ID")]
    pub um_id: String,
    #[serde(rename = "Job Title", default)]
    pub job_title: Option<String>,
    #[serde(rename = "Deduction", default)]
    pub deduction: Option<String>,
    #[serde(rename = "Appointment Start Date", default)]
    pub appointment_start: String,
    #[serde(rename = "FTE", default)]
    pub fte: String,
    #[serde(rename = "Department Name", default)]
    pub department: String,
}

impl RosterRecord {
    /// True iff the deduction field references the given payroll code,
    /// case-insensitively. Absent/blank deductions never pay dues.
    pub fn pays_dues(&self, marker: &str) -> bool {
        self.deduction
            .as_deref()
            .map(|d| d.to_uppercase().contains(&marker.to_uppercase()))
            .unwrap_or(false)
    }
}

/// Roster fields carried onto a schedule row by the join.
#[derive(Debug, Clone)]
pub struct RosterMatch {
    pub job_title: String,
    pub pays_dues: bool,
    pub appointment_start: String,
    pub fte: String,
    pub department: String,
}
