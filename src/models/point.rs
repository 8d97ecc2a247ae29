use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Point identifier -> coordinates, iterated in insertion order.
///
/// The registry merge relies on this order: the first insertion of an
/// identifier decides its position and, for discovered points, its value.
pub type PointMap = IndexMap<String, Point>;

/// Session identifier -> points parsed from that session's file, in
/// discovery order. Built once per aggregation run.
pub type CoordinateTable = IndexMap<String, PointMap>;

/// A surveyed point in MN95 (planar) / RAN95 (height).
///
/// The identifier is the key of the map holding the point; it is kept exactly
/// as read from the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "E", alias = "E_MN95", alias = "e")]
    pub easting: f64,

    #[serde(rename = "N", alias = "N_MN95", alias = "n")]
    pub northing: f64,

    #[serde(rename = "H", alias = "H_RAN95", alias = "h")]
    pub height: f64,
}

impl Point {
    pub fn new(easting: f64, northing: f64, height: f64) -> Self {
        Self {
            easting,
            northing,
            height,
        }
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((easting, northing, height): (f64, f64, f64)) -> Self {
        Self::new(easting, northing, height)
    }
}
