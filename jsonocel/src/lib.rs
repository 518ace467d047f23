#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![doc = include_str!("../README.md")]

pub mod core;

#[doc(inline)]
pub use crate::core::io::{Exportable, Importable};

#[doc(inline)]
pub use crate::core::event_data::object_centric::ocel_struct::{
    AttributeType, AttributeValue, Attributes, Event, EventId, Events, MetaObjectCentricData, Obj,
    ObjectCentricEventLog, ObjectEventMapping, Objects, RawObjectCentricData,
};

#[doc(inline)]
pub use crate::core::event_data::object_centric::io::{
    FileFormatError, OCELImportError, RecordError,
};

#[doc(inline)]
pub use crate::core::event_data::object_centric::parameters::{
    EventParams, JsonParseParameters, LogParams, OCELImportOptions, ObjectParams,
    TableParameterOverrides, TableParameters,
};

#[doc(inline)]
pub use crate::core::event_data::object_centric::ocel_import::{apply, OCEL};

#[doc(inline)]
pub use crate::core::event_data::object_centric::ocel_json::{
    import_jsonocel_from_path, import_jsonocel_from_reader, import_jsonocel_from_slice,
    parse_json,
};

#[doc(inline)]
pub use crate::core::event_data::object_centric::ocel_json::export::{
    export_jsonocel_path, export_jsonocel_to_vec, ocel_to_json_value,
};

#[doc(inline)]
pub use crate::core::event_data::object_centric::table::{EventTable, ObjectAttributeTable};

#[doc(inline)]
pub use crate::core::event_data::object_centric::event_graph::EventGraph;

#[doc(inline)]
pub use crate::core::event_data::timestamp_utils::{parse_timestamp, TimestampParseError};
