pub mod point;
pub mod session;

pub use point::{CoordinateTable, Point, PointMap};
pub use session::{eligible_file, ParseReport, SessionFiles};
