use crate::error::{ConversionError, Result};
use crate::models::{ParseReport, Point, PointMap};
use crate::utils::constants::{
    COMMENT_MARKERS, DEFAULT_BUFFER_SIZE, DEFAULT_SEPARATOR, MIN_RECORD_FIELDS,
};
use crate::utils::encoding::{decode_line, trim_line_ending};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Reads `<id><sep><E><sep><N><sep><H>` point files.
pub struct CoordinateReader {
    separator: String,
}

enum LineKind {
    Blank,
    Comment,
    Record,
}

impl CoordinateReader {
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    pub fn with_separator(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        Self {
            separator: if separator.is_empty() {
                DEFAULT_SEPARATOR.to_string()
            } else {
                separator
            },
        }
    }

    /// Read all points of a file, later duplicates overwriting earlier ones.
    pub fn read_points(&self, path: &Path) -> Result<PointMap> {
        self.read_points_with_report(path).map(|(points, _)| points)
    }

    /// Read all points of a file along with line statistics.
    ///
    /// A non-numeric coordinate aborts the whole read; short records are dropped.
    pub fn read_points_with_report(&self, path: &Path) -> Result<(PointMap, ParseReport)> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut points = PointMap::new();
        let mut report = ParseReport::default();
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let line = decode_line(trim_line_ending(&buffer));
            match classify_line(&line) {
                LineKind::Blank => report.blank_lines += 1,
                LineKind::Comment => report.comment_lines += 1,
                LineKind::Record => match self.parse_point_line(&line, path, line_number)? {
                    // A repeated id keeps its first position but takes the new value
                    Some((id, point)) => {
                        if points.insert(id, point).is_some() {
                            report.duplicate_ids += 1;
                        }
                    }
                    None => {
                        debug!(
                            "Dropping short record at {}:{}",
                            path.display(),
                            line_number
                        );
                        report.dropped_records += 1;
                    }
                },
            }
        }

        report.points = points.len();
        debug!("Read {} from {}", report.summary(), path.display());

        Ok((points, report))
    }

    /// Parse a single data line. `Ok(None)` means too few fields.
    fn parse_point_line(
        &self,
        line: &str,
        path: &Path,
        line_number: usize,
    ) -> Result<Option<(String, Point)>> {
        let parts: Vec<&str> = line.trim().split(self.separator.as_str()).collect();

        if parts.len() < MIN_RECORD_FIELDS {
            return Ok(None);
        }

        let parse = |field: &'static str, value: &str| -> Result<f64> {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| ConversionError::InvalidCoordinate {
                    path: path.to_path_buf(),
                    line: line_number,
                    field,
                    value: value.to_string(),
                })
        };

        let easting = parse("E", parts[1])?;
        let northing = parse("N", parts[2])?;
        let height = parse("H", parts[3])?;

        Ok(Some((
            parts[0].to_string(),
            Point::new(easting, northing, height),
        )))
    }
}

impl Default for CoordinateReader {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_line(line: &str) -> LineKind {
    match line.chars().next() {
        None => LineKind::Blank,
        Some(first) if is_comment_marker(first) => LineKind::Comment,
        Some(_) if line.trim().is_empty() => LineKind::Blank,
        Some(_) => LineKind::Record,
    }
}

/// True when `c` is any one of the comment markers.
pub fn is_comment_marker(c: char) -> bool {
    COMMENT_MARKERS.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_points(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_every_comment_marker_is_skipped() {
        for marker in ['#', '?', '*', '%'] {
            assert!(is_comment_marker(marker), "{} should be a marker", marker);
        }
        assert!(!is_comment_marker('P'));
        assert!(!is_comment_marker(' '));

        let temp_file = write_points(&[
            "#P1\t1\t1\t1",
            "?P2\t2\t2\t2",
            "*P3\t3\t3\t3",
            "%P4\t4\t4\t4",
            "P5\t5\t5\t5",
        ]);
        let points = CoordinateReader::new().read_points(temp_file.path()).unwrap();

        assert_eq!(points.len(), 1);
        assert!(points.contains_key("P5"));
        assert!(!points.contains_key("%P4"));
    }

    #[test]
    fn test_read_points_file() -> Result<()> {
        let temp_file = write_points(&[
            "# exported by survey controller",
            "* MN95 / RAN95",
            "P0\t1.0\t2.0",
            "",
            "P1\t100.0\t200.0\t300.0",
            "P2\t150.5\t250.5\t350.5\tGNSS\textra",
        ]);

        let (points, report) = CoordinateReader::new().read_points_with_report(temp_file.path())?;

        assert_eq!(points.len(), 2);
        assert_eq!(points["P1"], Point::new(100.0, 200.0, 300.0));
        assert_eq!(points["P2"], Point::new(150.5, 250.5, 350.5));
        assert!(!points.contains_key("P0"));
        assert_eq!(report.comment_lines, 2);
        assert_eq!(report.blank_lines, 1);
        assert_eq!(report.dropped_records, 1);
        assert_eq!(report.points, 2);

        Ok(())
    }

    #[test]
    fn test_duplicate_id_last_wins() -> Result<()> {
        let temp_file = write_points(&[
            "P1\t1.0\t1.0\t1.0",
            "P2\t2.0\t2.0\t2.0",
            "P1\t9.0\t9.0\t9.0",
        ]);

        let (points, report) = CoordinateReader::new().read_points_with_report(temp_file.path())?;

        assert_eq!(points.len(), 2);
        assert_eq!(points["P1"], Point::new(9.0, 9.0, 9.0));
        assert_eq!(report.duplicate_ids, 1);

        let ids: Vec<&str> = points.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["P1", "P2"]);

        Ok(())
    }

    #[test]
    fn test_non_numeric_coordinate_is_fatal() {
        let temp_file = write_points(&["P1\t1.0\t1.0\t1.0", "P2\t2.0\tabc\t2.0"]);

        let result = CoordinateReader::new().read_points(temp_file.path());

        match result {
            Err(ConversionError::InvalidCoordinate {
                line, field, value, ..
            }) => {
                assert_eq!(line, 2);
                assert_eq!(field, "N");
                assert_eq!(value, "abc");
            }
            other => panic!("Expected InvalidCoordinate, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_separator_and_crlf() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "P1;1.5;2.5;3.5\r\nP2; 4.0 ;5.0;6.0\r\n")?;

        let points = CoordinateReader::with_separator(";").read_points(temp_file.path())?;

        assert_eq!(points["P1"], Point::new(1.5, 2.5, 3.5));
        assert_eq!(points["P2"], Point::new(4.0, 5.0, 6.0));

        Ok(())
    }

    #[test]
    fn test_identifier_case_is_preserved() -> Result<()> {
        let temp_file = write_points(&["pt_a\t1.0\t2.0\t3.0"]);

        let points = CoordinateReader::new().read_points(temp_file.path())?;

        assert!(points.contains_key("pt_a"));
        assert!(!points.contains_key("PT_A"));

        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CoordinateReader::new().read_points(Path::new("/nonexistent/points.txt"));
        assert!(matches!(result, Err(ConversionError::Io(_))));
    }
}
