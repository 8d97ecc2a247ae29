use crate::error::Result;
use crate::models::{CoordinateTable, Point, PointMap};
use crate::utils::constants::{
    KOO_HEIGHT_TAG, KOO_HEIGHT_WIDTH, KOO_ID_WIDTH, KOO_MARKER, KOO_PLANAR_WIDTH,
    MISSING_FIXED_POINTS_WARNING,
};
use crate::utils::Environment;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Writes the LTOP coordinate file (`$$PK`), one line per unique point.
pub struct KooWriter;

impl KooWriter {
    pub fn new() -> Self {
        Self
    }

    /// Create (or truncate) `path` and write the merged registry
    pub fn write_file(
        &self,
        path: &Path,
        table: &CoordinateTable,
        fixed_points: Option<&PointMap>,
        env: &dyn Environment,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_registry(&mut writer, table, fixed_points, env)?;
        writer.flush()?;

        info!("FILE CREATED : {}", path.display());
        Ok(())
    }

    pub fn write_registry<W: Write>(
        &self,
        writer: &mut W,
        table: &CoordinateTable,
        fixed_points: Option<&PointMap>,
        env: &dyn Environment,
    ) -> Result<()> {
        let registry = merge_registry(table, fixed_points);

        writeln!(writer, "{}", env.header_line())?;
        writeln!(writer, "{}", KOO_MARKER)?;
        if fixed_points.map_or(true, |points| points.is_empty()) {
            warn!("No fixed points supplied, coordinate file carries approximate values only");
            writeln!(writer, "{}", MISSING_FIXED_POINTS_WARNING)?;
        }

        for (id, point) in &registry {
            writeln!(writer, "{}", self.format_point_line(id, point))?;
        }

        Ok(())
    }

    /// Point id (10 columns) + 22 blank columns + E, N (12 columns, 4 decimals)
    /// + 4 blanks + H (10 columns, 4 decimals) + 4 blanks + `LV`
    pub fn format_point_line(&self, id: &str, point: &Point) -> String {
        format!(
            "{:<id_width$}{:22}{:>planar_width$.4}{:>planar_width$.4}{:4}{:>height_width$.4}{:4}{}",
            id,
            "",
            point.easting,
            point.northing,
            "",
            point.height,
            "",
            KOO_HEIGHT_TAG,
            id_width = KOO_ID_WIDTH,
            planar_width = KOO_PLANAR_WIDTH,
            height_width = KOO_HEIGHT_WIDTH
        )
    }
}

impl Default for KooWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge fixed points and session points into one registry.
///
/// Fixed points are inserted first and always keep their value. Session points
/// follow in table order; an id already present is never overwritten, so the
/// first session to report a point wins.
pub fn merge_registry(table: &CoordinateTable, fixed_points: Option<&PointMap>) -> PointMap {
    let mut registry = fixed_points.cloned().unwrap_or_default();

    for (session, points) in table {
        for (id, point) in points {
            if !registry.contains_key(id) {
                registry.insert(id.clone(), *point);
            } else {
                debug!("Point {} from {} already registered", id, session);
            }
        }
    }

    registry
}
