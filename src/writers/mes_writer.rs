use crate::error::Result;
use crate::models::CoordinateTable;
use crate::utils::constants::{
    HEIGHT_UNCERTAINTY_FACTOR, MES_MARKER, OBSERVATION_VALUE_WIDTH, PLANAR_UNCERTAINTY,
    POINT_ID_WIDTH, SESSION_ID_WIDTH, SESSION_SEPARATOR_WIDTH, UNCERTAINTY_WIDTH,
};
use crate::utils::Environment;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Observation types of one point in a session block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationKind {
    Easting,
    Northing,
    Height,
}

impl ObservationKind {
    pub fn code(&self) -> &'static str {
        match self {
            ObservationKind::Easting => "LY",
            ObservationKind::Northing => "LX",
            ObservationKind::Height => "LZ",
        }
    }
}

/// Writes the LTOP observation file (`$$ME`), one `SL` block per session.
pub struct MesWriter {
    planar_uncertainty: f64,
}

impl MesWriter {
    pub fn new() -> Self {
        Self {
            planar_uncertainty: PLANAR_UNCERTAINTY,
        }
    }

    pub fn with_planar_uncertainty(mut self, uncertainty: f64) -> Self {
        self.planar_uncertainty = uncertainty;
        self
    }

    /// Height uncertainty is always three times the planar one.
    pub fn height_uncertainty(&self) -> f64 {
        self.planar_uncertainty * HEIGHT_UNCERTAINTY_FACTOR
    }

    /// Create (or truncate) `path` and write the observation file
    pub fn write_file(
        &self,
        path: &Path,
        table: &CoordinateTable,
        env: &dyn Environment,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_observations(&mut writer, table, env)?;
        writer.flush()?;

        info!("FILE CREATED : {}", path.display());
        Ok(())
    }

    pub fn write_observations<W: Write>(
        &self,
        writer: &mut W,
        table: &CoordinateTable,
        env: &dyn Environment,
    ) -> Result<()> {
        writeln!(writer, "{}", env.header_line())?;
        writeln!(writer, "{}", MES_MARKER)?;

        for (session, points) in table {
            writeln!(writer, "{}", self.format_session_line(session))?;
            for (id, point) in points {
                let observations = [
                    (ObservationKind::Easting, point.easting),
                    (ObservationKind::Northing, point.northing),
                    (ObservationKind::Height, point.height),
                ];
                for (kind, value) in observations {
                    writeln!(writer, "{}", self.format_observation_line(kind, id, value))?;
                }
            }
            writeln!(writer, "{}", "*".repeat(SESSION_SEPARATOR_WIDTH))?;
        }

        Ok(())
    }

    /// `SL` + session id (uppercased, 20 columns) + 18 blank columns + `-------`
    pub fn format_session_line(&self, session: &str) -> String {
        format!(
            "SL{:<width$}{:18}-------",
            session.to_uppercase(),
            "",
            width = SESSION_ID_WIDTH
        )
    }

    /// Code + point id (18 columns) + value (16 columns, 4 decimals) +
    /// uncertainty (6 columns, 3 decimals)
    pub fn format_observation_line(&self, kind: ObservationKind, id: &str, value: f64) -> String {
        let uncertainty = match kind {
            ObservationKind::Height => self.height_uncertainty(),
            _ => self.planar_uncertainty,
        };
        format!(
            "{}{:<id_width$}{:>value_width$.4}{:>unc_width$.3}",
            kind.code(),
            id,
            value,
            uncertainty,
            id_width = POINT_ID_WIDTH,
            value_width = OBSERVATION_VALUE_WIDTH,
            unc_width = UNCERTAINTY_WIDTH
        )
    }
}

impl Default for MesWriter {
    fn default() -> Self {
        Self::new()
    }
}
