use crate::error::{ConversionError, Result};
use crate::models::{eligible_file, SessionFiles};
use crate::utils::constants::{
    HEIGHT_FRAME_MARKER, PLANAR_FRAME_MARKER, POINT_FILE_EXTENSION, SESSION_MARKER,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Lists the sessions of a campaign root. Each session directory should hold
/// exactly one point file:
/// ```text
/// campaign/
///   session_01/
///     session_01_MN95_RAN95.txt
///     raw/
///   session_02/
///     session_02_MN95_RAN95.txt
/// ```
#[derive(Debug)]
pub struct SessionDiscovery {
    root: PathBuf,
}

impl SessionDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map every session directory to its qualifying point files.
    ///
    /// Sessions are listed by directory name so the order is the same on every
    /// platform. A session with zero or several qualifying files is still listed.
    pub fn discover_sessions(&self) -> Result<SessionFiles> {
        if !self.root.is_dir() {
            return Err(ConversionError::MissingRoot {
                path: self.root.clone(),
            });
        }

        debug!("Searching for sessions in: {}", self.root.display());

        let mut sessions = SessionFiles::new();
        for name in sorted_entry_names(&self.root)? {
            if !name.contains(SESSION_MARKER) {
                continue;
            }

            let session_path = self.root.join(&name);
            if !session_path.is_dir() {
                continue;
            }

            let files = self.discover_session_files(&session_path)?;
            match files.len() {
                1 => {}
                0 => warn!("Session {} has no qualifying point file", name),
                n => warn!(
                    "Session {} has {} qualifying point files and is ambiguous: {}",
                    name,
                    n,
                    files.join(", ")
                ),
            }
            sessions.insert(name, files);
        }

        debug!(
            "Found {} sessions, {} eligible",
            sessions.len(),
            sessions.values().filter(|f| eligible_file(f).is_some()).count()
        );

        Ok(sessions)
    }

    /// Qualifying point files directly inside a session directory
    fn discover_session_files(&self, session_path: &Path) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for name in sorted_entry_names(session_path)? {
            if session_path.join(&name).is_file() && is_point_file_name(&name) {
                files.push(name);
            }
        }
        Ok(files)
    }
}

/// Entry names of a directory, sorted; names that are not valid UTF-8 are skipped.
fn sorted_entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!("Skipping non UTF-8 entry {:?} in {}", raw, dir.display()),
        }
    }
    names.sort();
    Ok(names)
}

/// Check if a file name matches `*session*MN95*RAN95*.txt` (all markers, any order)
pub fn is_point_file_name(name: &str) -> bool {
    name.contains(SESSION_MARKER)
        && name.contains(PLANAR_FRAME_MARKER)
        && name.contains(HEIGHT_FRAME_MARKER)
        && name.ends_with(POINT_FILE_EXTENSION)
}
