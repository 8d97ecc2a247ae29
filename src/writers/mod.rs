pub mod koo_writer;
pub mod mes_writer;

pub use koo_writer::{merge_registry, KooWriter};
pub use mes_writer::{MesWriter, ObservationKind};
