use crate::error::{ConversionError, Result};
use crate::models::PointMap;
use crate::readers::CoordinateReader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Loads a fixed point set, either as JSON (`{"ID": {"E": .., "N": .., "H": ..}}`)
/// or as a delimited point file in the session format.
pub struct FixedPointReader {
    separator: String,
}

impl FixedPointReader {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn read_fixed_points(&self, path: &Path) -> Result<PointMap> {
        if !path.is_file() {
            return Err(ConversionError::FixedPoints(format!(
                "fixed point file not found: {}",
                path.display()
            )));
        }

        let points = if is_json(path) {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader::<_, PointMap>(reader)?
        } else {
            CoordinateReader::with_separator(self.separator.as_str()).read_points(path)?
        };

        info!("Loaded {} fixed points from {}", points.len(), path.display());
        Ok(points)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
