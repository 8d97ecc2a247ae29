use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Session directory name -> qualifying point files found inside it.
///
/// Only sessions whose list holds exactly one file are eligible for
/// aggregation; the others stay here so callers can see why they were left out.
pub type SessionFiles = IndexMap<String, Vec<String>>;

/// Returns the single qualifying file of a session, or `None` when the session
/// has no qualifying file or is ambiguous.
pub fn eligible_file(files: &[String]) -> Option<&str> {
    match files {
        [file] => Some(file.as_str()),
        _ => None,
    }
}

/// Outcome of parsing one point file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub points: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    pub dropped_records: usize,
    pub duplicate_ids: usize,
}

impl ParseReport {
    pub fn summary(&self) -> String {
        format!(
            "{} points ({} comments, {} blank, {} dropped, {} duplicates)",
            self.points,
            self.comment_lines,
            self.blank_lines,
            self.dropped_records,
            self.duplicate_ids
        )
    }
}
