pub mod constants;
pub mod encoding;
pub mod environment;
pub mod progress;

pub use constants::*;
pub use environment::{Environment, FixedEnvironment, SystemEnvironment};
pub use progress::ProgressReporter;
