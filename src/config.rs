use crate::error::{ConversionError, Result};
use crate::models::PointMap;
use crate::utils::constants::{DEFAULT_SEPARATOR, KOO_FILE, MES_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to do when a coordinate field of a point file is not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidCoordinatePolicy {
    /// Stop the whole conversion with the parse error.
    #[default]
    Abort,
    /// Leave the offending session out of the coordinate table and carry on.
    SkipSession,
}

/// Options of one conversion run.
///
/// Field names follow the historical keys (`MES`, `path_MES`, `KOO`,
/// `path_KOO`, `points_fixes`); lowercase spellings are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Write the observation file
    #[serde(alias = "MES")]
    pub mes: bool,

    /// Observation file path, `<root>/GNSS.MES` when unset
    #[serde(alias = "path_MES")]
    pub path_mes: Option<PathBuf>,

    /// Write the coordinate file
    #[serde(alias = "KOO")]
    pub koo: bool,

    /// Coordinate file path, `<root>/GNSS.KOO` when unset
    #[serde(alias = "path_KOO")]
    pub path_koo: Option<PathBuf>,

    /// Authoritative coordinates that win over every session value
    pub points_fixes: Option<PointMap>,

    /// File to load fixed points from, merged under `points_fixes`
    pub points_fixes_file: Option<PathBuf>,

    /// Field separator of the session point files
    pub separator: String,

    pub on_invalid_coordinate: InvalidCoordinatePolicy,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            mes: true,
            path_mes: None,
            koo: true,
            path_koo: None,
            points_fixes: None,
            points_fixes_file: None,
            separator: DEFAULT_SEPARATOR.to_string(),
            on_invalid_coordinate: InvalidCoordinatePolicy::Abort,
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML, JSON or YAML file. Missing keys keep their
    /// defaults and unknown keys are ignored.
    ///
    /// Inline `points_fixes` tables are rejected: the loader lowercases every
    /// key, point ids included, so fixed points have to come through
    /// `points_fixes_file`.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading conversion options from {}", path.display());
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()?;

        if settings.get::<::config::Value>("points_fixes").is_ok() {
            return Err(ConversionError::Config(::config::ConfigError::Message(format!(
                "inline points_fixes in {} would lose the case of point ids; \
                 list them in a file referenced by points_fixes_file instead",
                path.display()
            ))));
        }

        Ok(settings.try_deserialize::<Self>()?)
    }

    pub fn with_mes(mut self, enabled: bool) -> Self {
        self.mes = enabled;
        self
    }

    pub fn with_mes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_mes = Some(path.into());
        self
    }

    pub fn with_koo(mut self, enabled: bool) -> Self {
        self.koo = enabled;
        self
    }

    pub fn with_koo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_koo = Some(path.into());
        self
    }

    pub fn with_fixed_points(mut self, points: PointMap) -> Self {
        self.points_fixes = Some(points);
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_invalid_coordinate_policy(mut self, policy: InvalidCoordinatePolicy) -> Self {
        self.on_invalid_coordinate = policy;
        self
    }

    pub fn mes_path(&self, root: &Path) -> PathBuf {
        self.path_mes
            .clone()
            .unwrap_or_else(|| root.join(MES_FILE))
    }

    /// Resolves to `path_koo` when set; `path_mes` never takes its place.
    pub fn koo_path(&self, root: &Path) -> PathBuf {
        self.path_koo
            .clone()
            .unwrap_or_else(|| root.join(KOO_FILE))
    }
}
