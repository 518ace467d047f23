//! Row-per-event tabular projection of an [`ObjectCentricEventLog`]

use std::{collections::HashMap, io::Write};

use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::core::event_data::object_centric::{
    ocel_struct::{AttributeValue, EventId, ObjectCentricEventLog},
    parameters::{TableParameters, EVENT_ATTRIBUTE_COLUMN_PREFIX},
};

/// Supplementary object attribute tables
pub mod object_attributes;

pub use object_attributes::ObjectAttributeTable;

/// Name of the event id column
pub const EVENT_ID_COLUMN: &str = "event_id";

/// A single event row of an [`EventTable`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRow {
    /// Event identity
    pub event_id: EventId,
    /// Activity
    pub activity: String,
    /// Event timestamp
    pub timestamp: DateTime<FixedOffset>,
    /// Related objects, one entry per object type column ([`TableParameters::obj_names`])
    pub objects: Vec<Vec<String>>,
    /// Values, one entry per attribute column ([`TableParameters::val_names`])
    pub values: Vec<Option<AttributeValue>>,
}

/// Attribute read by an attribute column (`event_<attribute>`)
fn attribute_of_column(column: &str) -> &str {
    column
        .strip_prefix(EVENT_ATTRIBUTE_COLUMN_PREFIX)
        .unwrap_or(column)
}

///
/// Row-per-event table, rows in chronological order
///
/// Columns: event id, activity ([`TableParameters::act_name`]), timestamp ([`TableParameters::time_name`]),
/// one column per object type and one column per event attribute.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventTable {
    parameters: TableParameters,
    rows: Vec<EventRow>,
    object_attributes: Option<ObjectAttributeTable>,
}

impl EventTable {
    /// Project the events of `log` into a table
    ///
    /// Objects whose type is unknown (i.e., not declared in the objects section) or not part of
    /// [`TableParameters::obj_names`] do not appear in any object column.
    pub fn from_log(
        log: &ObjectCentricEventLog,
        parameters: TableParameters,
        object_attributes: Option<ObjectAttributeTable>,
    ) -> Self {
        let mut type_columns: HashMap<&str, usize> = HashMap::new();
        for (i, ot) in parameters.obj_names.iter().enumerate() {
            // A repeated type name keeps its first column
            type_columns.entry(ot.as_str()).or_insert(i);
        }
        let objects = &log.raw.objects;

        let rows: Vec<EventRow> = log
            .raw
            .events
            .iter()
            .map(|ev| {
                let mut ev_objects = vec![Vec::new(); parameters.obj_names.len()];
                for oid in &ev.omap {
                    if let Some(col) = objects
                        .get(oid)
                        .and_then(|o| type_columns.get(o.object_type.as_str()))
                    {
                        ev_objects[*col].push(oid.clone());
                    }
                }
                let values = parameters
                    .val_names
                    .iter()
                    .map(|col| ev.vmap.get(attribute_of_column(col)).cloned())
                    .collect();
                EventRow {
                    event_id: ev.id,
                    activity: ev.act.clone(),
                    timestamp: ev.time,
                    objects: ev_objects,
                    values,
                }
            })
            .collect();
        debug!(
            "Projected {} events into a table with {} columns",
            rows.len(),
            3 + parameters.obj_names.len() + parameters.val_names.len()
        );
        Self {
            parameters,
            rows,
            object_attributes,
        }
    }

    /// The resolved [`TableParameters`] of this table
    pub fn parameters(&self) -> &TableParameters {
        &self.parameters
    }

    /// All rows (chronological)
    pub fn rows(&self) -> &[EventRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Attached object attribute table (if any)
    pub fn object_attributes(&self) -> Option<&ObjectAttributeTable> {
        self.object_attributes.as_ref()
    }

    /// Column names in table order
    pub fn columns(&self) -> Vec<String> {
        let p = &self.parameters;
        [
            EVENT_ID_COLUMN.to_string(),
            p.act_name.clone(),
            p.time_name.clone(),
        ]
        .into_iter()
        .chain(p.obj_names.iter().cloned())
        .chain(p.val_names.iter().cloned())
        .collect()
    }

    /// Objects of the given type related to the event of `row`
    pub fn objects_of<'a>(&self, row: &'a EventRow, object_type: &str) -> Option<&'a [String]> {
        let col = self
            .parameters
            .obj_names
            .iter()
            .position(|ot| ot == object_type)?;
        row.objects.get(col).map(Vec::as_slice)
    }

    /// Value of an attribute column for `row`
    pub fn value<'a>(&self, row: &'a EventRow, column: &str) -> Option<&'a AttributeValue> {
        let col = self
            .parameters
            .val_names
            .iter()
            .position(|c| c == column)?;
        row.values.get(col)?.as_ref()
    }

    /// Write the table as CSV (with header)
    ///
    /// Object columns list all object identifiers joined by [`TableParameters::sep`].
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.columns())?;
        for row in &self.rows {
            let record = [
                row.event_id.to_string(),
                row.activity.clone(),
                row.timestamp.to_rfc3339(),
            ]
            .into_iter()
            .chain(row.objects.iter().map(|obs| obs.iter().join(&self.parameters.sep)))
            .chain(
                row.values
                    .iter()
                    .map(|v| v.as_ref().map(|v| v.to_string()).unwrap_or_default()),
            );
            csv_writer.write_record(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
