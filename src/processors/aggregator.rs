use crate::config::{ConversionOptions, InvalidCoordinatePolicy};
use crate::error::Result;
use crate::models::{eligible_file, CoordinateTable, ParseReport, PointMap, SessionFiles};
use crate::readers::{CoordinateReader, FixedPointReader, SessionDiscovery};
use crate::utils::progress::ProgressReporter;
use crate::utils::{Environment, SystemEnvironment};
use crate::writers::{KooWriter, MesWriter};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything one conversion run discovered, parsed and wrote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationResult {
    /// Every session directory with its qualifying files, eligible or not
    pub sessions: SessionFiles,
    /// Points of each eligible session that parsed successfully
    pub coordinates: CoordinateTable,
    /// Sessions left out because a coordinate was not numeric
    pub skipped_sessions: Vec<String>,
    pub reports: IndexMap<String, ParseReport>,
    /// Output files in the order they were written
    pub written: Vec<PathBuf>,
}

impl AggregationResult {
    /// Sessions holding more than one qualifying point file
    pub fn ambiguous_sessions(&self) -> Vec<&str> {
        self.sessions_where(|files| files.len() > 1)
    }

    /// Sessions holding no qualifying point file
    pub fn empty_sessions(&self) -> Vec<&str> {
        self.sessions_where(|files| files.is_empty())
    }

    fn sessions_where(&self, predicate: impl Fn(&[String]) -> bool) -> Vec<&str> {
        self.sessions
            .iter()
            .filter(|(_, files)| predicate(files.as_slice()))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn point_count(&self) -> usize {
        self.coordinates.values().map(|points| points.len()).sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} sessions found, {} converted ({} points), {} ambiguous, \
             {} without point file, {} skipped",
            self.sessions.len(),
            self.coordinates.len(),
            self.point_count(),
            self.ambiguous_sessions().len(),
            self.empty_sessions().len(),
            self.skipped_sessions.len()
        )
    }
}

/// Drives discovery, parsing and the two LTOP writers for one campaign root.
pub struct CoordinateAggregator {
    options: ConversionOptions,
    environment: Box<dyn Environment>,
}

impl CoordinateAggregator {
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            options,
            environment: Box::new(SystemEnvironment),
        }
    }

    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Run the whole conversion. The observation file is written before the
    /// coordinate file; a failure leaves earlier outputs in place.
    pub fn run(
        &self,
        root: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<AggregationResult> {
        let sessions = SessionDiscovery::new(root).discover_sessions()?;
        info!(
            "Discovered {} sessions in {}",
            sessions.len(),
            root.display()
        );

        let mut result = self.read_coordinate_table(root, sessions, progress)?;

        if self.options.mes {
            let path = self.options.mes_path(root);
            MesWriter::new().write_file(&path, &result.coordinates, self.environment.as_ref())?;
            result.written.push(path);
        }

        if self.options.koo {
            let path = self.options.koo_path(root);
            let fixed_points = self.resolve_fixed_points()?;
            KooWriter::new().write_file(
                &path,
                &result.coordinates,
                fixed_points.as_ref(),
                self.environment.as_ref(),
            )?;
            result.written.push(path);
        }

        info!("{}", result.summary());
        Ok(result)
    }

    /// Parse the single point file of every eligible session.
    pub fn read_coordinate_table(
        &self,
        root: &Path,
        sessions: SessionFiles,
        progress: Option<&ProgressReporter>,
    ) -> Result<AggregationResult> {
        let reader = CoordinateReader::with_separator(self.options.separator.as_str());
        let mut result = AggregationResult::default();

        for (session, files) in &sessions {
            if let Some(p) = progress {
                p.set_message(&format!("Reading {}", session));
            }

            // Ambiguous or empty sessions are left out of the table
            let Some(file) = eligible_file(files) else {
                continue;
            };

            let path = root.join(session).join(file);
            match reader.read_points_with_report(&path) {
                Ok((points, report)) => {
                    info!("Session {}: {}", session, report.summary());
                    result.coordinates.insert(session.clone(), points);
                    result.reports.insert(session.clone(), report);
                }
                Err(e)
                    if e.is_invalid_coordinate()
                        && self.options.on_invalid_coordinate
                            == InvalidCoordinatePolicy::SkipSession =>
                {
                    warn!("Skipping session {}: {}", session, e);
                    result.skipped_sessions.push(session.clone());
                }
                Err(e) => return Err(e),
            }
        }

        result.sessions = sessions;
        Ok(result)
    }

    /// Fixed points from the configured file, overridden by inline entries.
    pub fn resolve_fixed_points(&self) -> Result<Option<PointMap>> {
        let reader = FixedPointReader::new(self.options.separator.as_str());
        let from_file = match &self.options.points_fixes_file {
            Some(path) => Some(reader.read_fixed_points(path)?),
            None => None,
        };

        Ok(match (from_file, &self.options.points_fixes) {
            (Some(mut points), Some(inline)) => {
                for (id, point) in inline {
                    points.insert(id.clone(), *point);
                }
                Some(points)
            }
            (Some(points), None) => Some(points),
            (None, inline) => inline.clone(),
        })
    }
}
