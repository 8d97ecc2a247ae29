pub mod aggregator;

pub use aggregator::{AggregationResult, CoordinateAggregator};
