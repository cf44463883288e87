use crate::error::Result;
use crate::models::ScheduleRow;

/// Reference dictionary of known buildings.
///
/// Parsed from a JSON object mapping building name to an attribute array
/// whose last element is the campus name. Entries keep the document's
/// iteration order: tied-length matches resolve to the first entry
/// encountered, so order is load-bearing for the matcher.
#[derive(Debug, Clone)]
pub struct BuildingDirectory {
    entries: Vec<(String, String)>,
}

/// Outcome of matching a facility string. Total: every facility string,
/// including blank and unmatched ones, produces a triple.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityMatch {
    pub building: String,
    pub room: String,
    pub campus: String,
}

impl BuildingDirectory {
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let mut entries = Vec::new();
        if let Some(map) = value.as_object() {
            for (name, attrs) in map {
                let campus = attrs
                    .as_array()
                    .and_then(|a| a.last())
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string();
                entries.push((name.clone(), campus));
            }
        }
        Ok(Self { entries })
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest-substring heuristic: a key matches when the facility text
    /// contains it or it contains the facility text. The longest key wins;
    /// ties go to the first entry in directory order, so a later entry must
    /// be strictly longer to displace the current best.
    fn longest_match(&self, facility: &str) -> Option<&(String, String)> {
        let mut best: Option<&(String, String)> = None;
        for entry in &self.entries {
            let name = &entry.0;
            if !(facility.contains(name.as_str()) || name.contains(facility)) {
                continue;
            }
            match best {
                Some((b, _)) if name.len() <= b.len() => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Resolve a raw facility string to a building/room/campus triple.
    ///
    /// No match is a normal outcome, not an error: the raw text becomes the
    /// building label so downstream grouping never sees a missing key.
    pub fn match_facility(&self, facility: &str) -> FacilityMatch {
        if facility.trim().is_empty() {
            return FacilityMatch {
                building: facility.to_string(),
                room: String::new(),
                campus: String::new(),
            };
        }
        match self.longest_match(facility) {
            Some((name, campus)) => FacilityMatch {
                room: facility.replacen(name.as_str(), "", 1).trim().to_string(),
                building: name.clone(),
                campus: campus.clone(),
            },
            None => FacilityMatch {
                building: facility.to_string(),
                room: String::new(),
                campus: String::new(),
            },
        }
    }
}

/// Fill the prediction triple on every row from its raw facility string.
/// Rows from pre-enriched sources already carry predictions and skip this.
pub fn annotate(rows: &mut [ScheduleRow], directory: &BuildingDirectory) {
    for row in rows {
        let m = directory.match_facility(&row.facility_raw);
        row.building_prediction = m.building;
        row.room_prediction = m.room;
        row.campus_prediction = m.campus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(names: &[(&str, &str)]) -> BuildingDirectory {
        BuildingDirectory::from_entries(
            names
                .iter()
                .map(|(n, c)| (n.to_string(), c.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_from_json_campus_is_last_element() {
        let dir = BuildingDirectory::from_json(
            r#"{"EECS": ["Electrical Engineering", "Ann Arbor"], "CASL": ["Dearborn"]}"#,
        )
        .unwrap();
        assert_eq!(dir.len(), 2);
        let m = dir.match_facility("EECS 1200");
        assert_eq!(m.campus, "Ann Arbor");
        let m = dir.match_facility("CASL 119");
        assert_eq!(m.campus, "Dearborn");
    }

    #[test]
    fn test_single_matching_key() {
        let dir = directory(&[("EECS", "Ann Arbor"), ("NIB", "Ann Arbor")]);
        let m = dir.match_facility("EECS 1200");
        assert_eq!(m.building, "EECS");
        assert_eq!(m.room, "1200");
        assert_eq!(m.campus, "Ann Arbor");
    }

    #[test]
    fn test_key_containing_facility_matches() {
        // The substring relation runs both ways, but removal only strips
        // the key when it occurs in the facility text; here it does not,
        // so the residual keeps the raw text.
        let dir = directory(&[("EECS BUILDING", "Ann Arbor")]);
        let m = dir.match_facility("EECS");
        assert_eq!(m.building, "EECS BUILDING");
        assert_eq!(m.room, "EECS");
        assert_eq!(m.campus, "Ann Arbor");
    }

    #[test]
    fn test_longest_match_wins_regardless_of_order() {
        let m1 = directory(&[("EECS", "Ann Arbor"), ("EECS ANNEX", "Ann Arbor")])
            .match_facility("EECS ANNEX 42");
        let m2 = directory(&[("EECS ANNEX", "Ann Arbor"), ("EECS", "Ann Arbor")])
            .match_facility("EECS ANNEX 42");
        assert_eq!(m1.building, "EECS ANNEX");
        assert_eq!(m2.building, "EECS ANNEX");
        assert_eq!(m1.room, "42");
    }

    #[test]
    fn test_tied_length_takes_first_in_directory_order() {
        let m = directory(&[("AB", "Flint"), ("CD", "Dearborn")]).match_facility("AB CD");
        assert_eq!(m.building, "AB");
        assert_eq!(m.campus, "Flint");
        // Reversed directory order flips the winner: the tie-break follows
        // entry order, not key content.
        let m = directory(&[("CD", "Dearborn"), ("AB", "Flint")]).match_facility("AB CD");
        assert_eq!(m.building, "CD");
        assert_eq!(m.campus, "Dearborn");
    }

    #[test]
    fn test_no_match_keeps_raw_text() {
        let dir = directory(&[("EECS", "Ann Arbor")]);
        let m = dir.match_facility("Room 42 ZZZ");
        assert_eq!(m.building, "Room 42 ZZZ");
        assert_eq!(m.room, "");
        assert_eq!(m.campus, "");
    }

    #[test]
    fn test_blank_facility_never_attempts_match() {
        let dir = directory(&[("", "Nowhere"), ("EECS", "Ann Arbor")]);
        for raw in ["", "   "] {
            let m = dir.match_facility(raw);
            assert_eq!(m.building, raw);
            assert_eq!(m.room, "");
            assert_eq!(m.campus, "");
        }
    }

    #[test]
    fn test_residual_removed_once_and_trimmed() {
        let dir = directory(&[("NQ", "Ann Arbor")]);
        let m = dir.match_facility("NQ 1255 NQ");
        assert_eq!(m.building, "NQ");
        assert_eq!(m.room, "1255 NQ");
    }

    #[test]
    fn test_annotate_fills_every_row() {
        let dir = directory(&[("EECS", "Ann Arbor")]);
        let mut rows = vec![
            ScheduleRow {
                facility_raw: "EECS 1200".into(),
                ..Default::default()
            },
            ScheduleRow {
                facility_raw: "Room 42 ZZZ".into(),
                ..Default::default()
            },
            ScheduleRow::default(),
        ];
        annotate(&mut rows, &dir);
        assert_eq!(rows[0].building_prediction, "EECS");
        assert_eq!(rows[0].room_prediction, "1200");
        assert_eq!(rows[0].campus_prediction, "Ann Arbor");
        assert_eq!(rows[1].building_prediction, "Room 42 ZZZ");
        assert_eq!(rows[1].room_prediction, "");
        assert_eq!(rows[2].building_prediction, "");
        assert_eq!(rows[2].campus_prediction, "");
    }
}
