//! Field-name and table configuration for JSON-OCEL import
//!
//! All option sets are closed: unknown keys are rejected when the
//! configuration is deserialized (e.g., from a JSON config file).

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Field names on the log level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogParams {
    /// Key of the events section
    pub events: String,
    /// Key of the objects section
    pub objects: String,
    /// Key of the log-level metadata block
    pub meta: String,
    /// Key of the attribute name list (inside the metadata block)
    pub attr_names: String,
    /// Key of the object type list (inside the metadata block)
    pub obj_types: String,
}

impl Default for LogParams {
    fn default() -> Self {
        Self {
            events: "ocel:events".to_string(),
            objects: "ocel:objects".to_string(),
            meta: "ocel:global-log".to_string(),
            attr_names: "ocel:attribute-names".to_string(),
            obj_types: "ocel:object-types".to_string(),
        }
    }
}

/// Field names of an event record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventParams {
    /// Activity
    pub act: String,
    /// Object map (list of object identifiers)
    pub omap: String,
    /// Value map (attribute values)
    pub vmap: String,
    /// Timestamp
    pub time: String,
}

impl Default for EventParams {
    fn default() -> Self {
        Self {
            act: "ocel:activity".to_string(),
            omap: "ocel:omap".to_string(),
            vmap: "ocel:vmap".to_string(),
            time: "ocel:timestamp".to_string(),
        }
    }
}

/// Field names of an object record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObjectParams {
    /// Object type
    #[serde(rename = "type")]
    pub object_type: String,
    /// Object value map (attribute values)
    pub ovmap: String,
}

impl Default for ObjectParams {
    fn default() -> Self {
        Self {
            object_type: "ocel:type".to_string(),
            ovmap: "ocel:ovmap".to_string(),
        }
    }
}

/// Options for parsing a JSON-OCEL document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JsonParseParameters {
    /// Log-level field names
    pub log_params: LogParams,
    /// Event-level field names
    pub event_params: EventParams,
    /// Object-level field names
    pub obj_params: ObjectParams,
    /// Reject events referencing objects that are not declared in the objects section
    ///
    /// Disabled by default: undeclared references are kept in the object-event mapping.
    pub strict_object_references: bool,
}

/// Column prefix of event attribute columns in the tabular projection
pub const EVENT_ATTRIBUTE_COLUMN_PREFIX: &str = "event_";

/// Default name of the activity column
pub const DEFAULT_ACTIVITY_COLUMN: &str = "event_activity";

/// Default name of the timestamp column
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "event_timestamp";

/// Default separator of multi-valued (object list) cells
pub const DEFAULT_SEPARATOR: &str = ",";

/// Resolved configuration of the tabular projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableParameters {
    /// Object types, one column each
    pub obj_names: Vec<String>,
    /// Event attribute columns (`event_<attribute>`)
    pub val_names: Vec<String>,
    /// Name of the activity column
    pub act_name: String,
    /// Name of the timestamp column
    pub time_name: String,
    /// Separator used to join multiple values (e.g., object ids) in a single cell
    pub sep: String,
}

impl TableParameters {
    /// Computed defaults for the given object types and observed event attribute names
    pub fn with_defaults(obj_types: &[String], attr_events: &[String]) -> Self {
        Self {
            obj_names: obj_types.to_vec(),
            val_names: attr_events
                .iter()
                .map(|name| format!("{EVENT_ATTRIBUTE_COLUMN_PREFIX}{name}"))
                .collect(),
            act_name: DEFAULT_ACTIVITY_COLUMN.to_string(),
            time_name: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            sep: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Apply caller-supplied overrides (only the fields that are set)
    ///
    /// Repeated object types in [`TableParameterOverrides::obj_names`] are kept once.
    pub fn merge(mut self, overrides: &TableParameterOverrides) -> Self {
        if let Some(obj_names) = &overrides.obj_names {
            self.obj_names = obj_names.iter().unique().cloned().collect();
        }
        if let Some(val_names) = &overrides.val_names {
            self.val_names = val_names.clone();
        }
        if let Some(act_name) = &overrides.act_name {
            self.act_name = act_name.clone();
        }
        if let Some(time_name) = &overrides.time_name {
            self.time_name = time_name.clone();
        }
        if let Some(sep) = &overrides.sep {
            self.sep = sep.clone();
        }
        self
    }
}

/// Caller-supplied overrides for [`TableParameters`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableParameterOverrides {
    /// See [`TableParameters::obj_names`]
    pub obj_names: Option<Vec<String>>,
    /// See [`TableParameters::val_names`]
    pub val_names: Option<Vec<String>>,
    /// See [`TableParameters::act_name`]
    pub act_name: Option<String>,
    /// See [`TableParameters::time_name`]
    pub time_name: Option<String>,
    /// See [`TableParameters::sep`]
    pub sep: Option<String>,
}

/// Options for a full JSON-OCEL import (see [`crate::apply`])
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OCELImportOptions {
    /// Field names used to parse the document
    pub parse: JsonParseParameters,
    /// Overrides for the tabular projection
    pub table: TableParameterOverrides,
}
