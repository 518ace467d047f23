//! Event Data
//!
//! Object-centric event data structs and their import
pub mod object_centric;
pub mod timestamp_utils;
#[cfg(test)]
mod tests;

#[doc(inline)]
pub use object_centric::{ObjectCentricEventLog, OCEL};
