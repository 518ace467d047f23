//! Full JSON-OCEL ingestion: parsing, tabular projection and event graph

use std::path::Path;

use tracing::debug;

use crate::core::event_data::object_centric::{
    event_graph::EventGraph,
    io::OCELImportError,
    ocel_json::import_jsonocel_from_path,
    ocel_struct::ObjectCentricEventLog,
    parameters::{OCELImportOptions, TableParameterOverrides, TableParameters},
    table::{EventTable, ObjectAttributeTable},
};

///
/// Object-centric event log, ready for analysis
///
/// Composes the parsed log with its derived views: the row-per-event [`EventTable`]
/// and the [`EventGraph`], together with the [`TableParameters`] used to build the table.
///
#[derive(Debug, Clone)]
pub struct OCEL {
    /// Row-per-event table
    pub log: EventTable,
    /// Parsed events, objects and metadata
    pub obj: ObjectCentricEventLog,
    /// Event-object relation graph
    pub graph: EventGraph,
    /// Resolved table configuration
    pub parameters: TableParameters,
}

impl OCEL {
    /// Derive table and graph from a parsed [`ObjectCentricEventLog`]
    ///
    /// Table parameters are computed from the log metadata, then `overrides` are applied.
    pub fn from_log(
        obj: ObjectCentricEventLog,
        overrides: &TableParameterOverrides,
        object_attributes: Option<ObjectAttributeTable>,
    ) -> Self {
        let parameters =
            TableParameters::with_defaults(&obj.meta.obj_types, &obj.meta.attr_events)
                .merge(overrides);
        let log = EventTable::from_log(&obj, parameters.clone(), object_attributes);
        let graph = EventGraph::from_table(&log);
        Self {
            log,
            obj,
            graph,
            parameters,
        }
    }
}

///
/// Import a JSON-OCEL file into an [`OCEL`]
///
/// Optionally attaches an object attribute table (CSV, see [`ObjectAttributeTable`]).
/// Any error aborts the import; no partial log is returned.
///
pub fn apply<P: AsRef<Path>>(
    path: P,
    options: &OCELImportOptions,
    object_attribute_table: Option<&Path>,
) -> Result<OCEL, OCELImportError> {
    let obj = import_jsonocel_from_path(path, &options.parse)?;
    let object_attributes = object_attribute_table
        .map(ObjectAttributeTable::from_path)
        .transpose()?;
    let ocel = OCEL::from_log(obj, &options.table, object_attributes);
    debug!(
        "Imported OCEL with {} events, {} objects and {} graph edges",
        ocel.log.len(),
        ocel.obj.raw.objects.len(),
        ocel.graph.edge_count()
    );
    Ok(ocel)
}
