pub mod coordinate_reader;
pub mod fixed_point_reader;
pub mod session_discovery;

pub use coordinate_reader::CoordinateReader;
pub use fixed_point_reader::FixedPointReader;
pub use session_discovery::SessionDiscovery;
