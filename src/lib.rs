pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use crate::config::{ConversionOptions, InvalidCoordinatePolicy};
pub use error::{ConversionError, Result};
pub use models::{CoordinateTable, Point, PointMap, SessionFiles};
pub use processors::{AggregationResult, CoordinateAggregator};
