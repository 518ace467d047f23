//! Core modules

pub use chrono;
pub mod event_data;

/// IO Traits
pub mod io;

pub use event_data::object_centric::{ObjectCentricEventLog, OCEL};
