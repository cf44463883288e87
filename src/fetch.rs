use std::path::PathBuf;
use std::time::Duration;

use crate::buildings::BuildingDirectory;
use crate::error::{Result, SchedError};
use crate::models::RosterRecord;
use crate::roster;

/// Published reference dictionary: building name -> attribute array whose
/// last element is the campus.
pub const BUILDINGS_URL: &str =
    "https://raw.githubusercontent.com/umsi-amadaman/LEOcourseschedules/main/UMICHbuildings_dict.json";

/// Pre-enriched combined schedule used by the campus-building and
/// subject-campus views.
pub const COMBINED_SCHEDULE_URL: &str =
    "https://github.com/umsi-amadaman/LEOcourseschedules/raw/main/LEOAug24Schedule.csv";

/// Monthly LEO payroll roster.
pub const MONTHLY_ROSTER_URL: &str =
    "https://github.com/umsi-amadaman/LEOcourseschedules/raw/main/W25/LEOmonthly_Jan25.csv";

/// Ann Arbor schedule-of-classes export.
pub const ANN_ARBOR_SCHEDULE_URL: &str =
    "https://github.com/umsi-amadaman/LEOcourseschedules/raw/main/W25/A2SchedW25.csv";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a tabular or JSON source lives. CSVs are accepted from either a
/// remote URL or a local path; the reference dictionary is normally remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    pub fn from_arg(arg: &str) -> Source {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Source::Url(arg.to_string())
        } else {
            Source::Path(PathBuf::from(arg))
        }
    }
}

/// Per-session source access with load-once caches.
///
/// The building directory and roster are fetched at most once per session
/// and never mutated after population; schedule CSVs are fetched fresh per
/// view invocation. A failed fetch surfaces as `SourceUnreachable` naming
/// the source; nothing is retried.
pub struct Session {
    client: reqwest::blocking::Client,
    buildings: Option<BuildingDirectory>,
    roster: Option<Vec<RosterRecord>>,
}

impl Session {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            buildings: None,
            roster: None,
        })
    }

    pub fn fetch_text(&self, source: &Source) -> Result<String> {
        match source {
            Source::Url(url) => {
                let resp = self
                    .client
                    .get(url)
                    .send()
                    .map_err(|e| SchedError::SourceUnreachable(format!("{url}: {e}")))?;
                if !resp.status().is_success() {
                    return Err(SchedError::SourceUnreachable(format!(
                        "{url}: HTTP {}",
                        resp.status()
                    )));
                }
                resp.text()
                    .map_err(|e| SchedError::SourceUnreachable(format!("{url}: {e}")))
            }
            Source::Path(path) => std::fs::read_to_string(path).map_err(|e| {
                SchedError::SourceUnreachable(format!("{}: {e}", path.display()))
            }),
        }
    }

    /// Building directory, fetched on first use and cached for the session.
    pub fn buildings(&mut self, source: &Source) -> Result<&BuildingDirectory> {
        if self.buildings.is_none() {
            let text = self.fetch_text(source)?;
            self.buildings = Some(BuildingDirectory::from_json(&text)?);
        }
        Ok(self.buildings.as_ref().unwrap())
    }

    /// Monthly roster, fetched on first use and cached for the session.
    pub fn roster(&mut self, source: &Source) -> Result<&[RosterRecord]> {
        if self.roster.is_none() {
            let text = self.fetch_text(source)?;
            self.roster = Some(roster::load_roster(text.as_bytes())?);
        }
        Ok(self.roster.as_deref().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_source_from_arg() {
        assert_eq!(
            Source::from_arg("https://example.com/x.csv"),
            Source::Url("https://example.com/x.csv".to_string())
        );
        assert_eq!(
            Source::from_arg("data/x.csv"),
            Source::Path(PathBuf::from("data/x.csv"))
        );
    }

    #[test]
    fn test_fetch_text_local_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "Subject,Mon").unwrap();
        let session = Session::new().unwrap();
        let text = session
            .fetch_text(&Source::Path(f.path().to_path_buf()))
            .unwrap();
        assert!(text.starts_with("Subject,Mon"));
    }

    #[test]
    fn test_missing_local_path_is_source_unreachable() {
        let session = Session::new().unwrap();
        let err = session
            .fetch_text(&Source::Path(PathBuf::from("/no/such/file.csv")))
            .unwrap_err();
        assert!(matches!(err, SchedError::SourceUnreachable(_)));
    }

    #[test]
    fn test_buildings_cached_after_first_load() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"EECS": ["x", "Ann Arbor"]}}"#).unwrap();
        let path = f.path().to_path_buf();
        let mut session = Session::new().unwrap();
        assert_eq!(session.buildings(&Source::Path(path.clone())).unwrap().len(), 1);
        // Source gone; the cache answers anyway.
        drop(f);
        assert_eq!(session.buildings(&Source::Path(path)).unwrap().len(), 1);
    }

    #[test]
    fn test_roster_cached_after_first_load() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "UM ID,Job Title\n12345,LEOLecturerI").unwrap();
        let path = f.path().to_path_buf();
        let mut session = Session::new().unwrap();
        assert_eq!(session.roster(&Source::Path(path.clone())).unwrap().len(), 1);
        drop(f);
        assert_eq!(session.roster(&Source::Path(path)).unwrap().len(), 1);
    }
}
