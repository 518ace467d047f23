/// Event-object relation graph
pub mod event_graph;
/// Import errors and [`crate::Importable`]/[`crate::Exportable`] implementations
pub mod io;
/// Full import into an [`ocel_import::OCEL`]
pub mod ocel_import;
pub mod ocel_json;
/// Parsed object-centric event log structs
pub mod ocel_struct;
pub mod parameters;
/// Tabular projection
pub mod table;

#[doc(inline)]
pub use ocel_import::OCEL;
#[doc(inline)]
pub use ocel_struct::ObjectCentricEventLog;
