/// Substring marking session directories and session point files
pub const SESSION_MARKER: &str = "session";

/// Reference frame markers required in a qualifying point file name
pub const PLANAR_FRAME_MARKER: &str = "MN95";
pub const HEIGHT_FRAME_MARKER: &str = "RAN95";

/// Extension of a qualifying point file
pub const POINT_FILE_EXTENSION: &str = ".txt";

/// Input parsing
pub const DEFAULT_SEPARATOR: &str = "\t";
pub const COMMENT_MARKERS: [char; 4] = ['#', '?', '*', '%'];
pub const MIN_RECORD_FIELDS: usize = 4;

/// Default output file names, created in the session root
pub const MES_FILE: &str = "GNSS.MES";
pub const KOO_FILE: &str = "GNSS.KOO";

/// Section markers
pub const MES_MARKER: &str = "$$ME";
pub const KOO_MARKER: &str = "$$PK";

/// Header comment
pub const HEADER_PREFIX: &str = "**File created ";
pub const HEADER_TIME_FORMAT: &str = "%d.%m.%y %H:%M:%S";

/// Observation standard deviations
pub const PLANAR_UNCERTAINTY: f64 = 2.0;
pub const HEIGHT_UNCERTAINTY_FACTOR: f64 = 3.0;

/// Observation line layout
pub const SESSION_ID_WIDTH: usize = 20;
pub const POINT_ID_WIDTH: usize = 18;
pub const OBSERVATION_VALUE_WIDTH: usize = 16;
pub const UNCERTAINTY_WIDTH: usize = 6;
pub const SESSION_SEPARATOR_WIDTH: usize = 50;

/// Coordinate line layout
pub const KOO_ID_WIDTH: usize = 10;
pub const KOO_PLANAR_WIDTH: usize = 12;
pub const KOO_HEIGHT_WIDTH: usize = 10;
pub const KOO_HEIGHT_TAG: &str = "LV";

/// Written into the coordinate file when no fixed points were supplied
pub const MISSING_FIXED_POINTS_WARNING: &str =
    "**ATTENTION aux coordonnées des points fixes !! Elles ne sont pas renseignées !!";

/// Fallback login name when none can be read from the environment
pub const UNKNOWN_USER: &str = "unknown";

/// Read buffer for point files
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 8; // 64KB
