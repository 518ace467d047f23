//! JSON-OCEL Import/Export
//!
//! The document is fully materialized as a [`serde_json::Value`] before any structure is derived
//! (see [`read_json_document`]); [`parse_json`] only works on that in-memory tree.
use std::{fs::File, io::Read, path::Path};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::event_data::object_centric::{
    io::{read_json_document, FileFormatError, OCELImportError, RecordError},
    ocel_struct::{Events, ObjectCentricEventLog, Objects, RawObjectCentricData},
    parameters::{JsonParseParameters, LogParams},
};
use crate::core::io::Importable;

/// Event parsing
pub mod events;
/// Export to the JSON-OCEL layout
pub mod export;
/// Attribute and type inference
pub mod metadata;
/// Object parsing
pub mod objects;

use events::parse_events;
use metadata::infer_metadata;
use objects::parse_objects;

///
/// Parse an [`ObjectCentricEventLog`] from an in-memory JSON-OCEL document
///
/// Fails on the first malformed event or object record.
///
pub fn parse_json(
    data: &Value,
    cfg: &JsonParseParameters,
) -> Result<ObjectCentricEventLog, OCELImportError> {
    let log_params = &cfg.log_params;
    let events_section = get_section(data, &log_params.events)?;
    let (events, obj_event_mapping) = parse_events(events_section, &cfg.event_params)?;
    let objects = parse_objects(get_section(data, &log_params.objects)?, &cfg.obj_params)?;
    check_object_references(
        events_section,
        &events,
        &objects,
        cfg.strict_object_references,
    )?;

    let (attr_names, obj_types) = parse_global_log(data, log_params)?;
    let meta = infer_metadata(&events, &objects, attr_names, obj_types);
    debug!(
        "Parsed JSON-OCEL with {} events, {} objects and {} event attributes",
        events.len(),
        objects.len(),
        meta.attr_events.len()
    );
    Ok(ObjectCentricEventLog {
        meta,
        raw: RawObjectCentricData {
            events,
            objects,
            obj_event_mapping,
        },
    })
}

///
/// Import an [`ObjectCentricEventLog`] from a JSON-OCEL file given by a filepath
///
/// Gzipped files (`.json.gz`, `.jsonocel.gz`) are supported.
///
/// See also [`import_jsonocel_from_slice`].
///
pub fn import_jsonocel_from_path<P: AsRef<Path>>(
    path: P,
    cfg: &JsonParseParameters,
) -> Result<ObjectCentricEventLog, OCELImportError> {
    let path = path.as_ref();
    let format = <ObjectCentricEventLog as Importable>::infer_format(path)
        .unwrap_or_else(|| "json".to_string());
    debug!("Importing JSON-OCEL from {} ({format})", path.display());
    import_jsonocel_from_reader(File::open(path)?, &format, cfg)
}

///
/// Import an [`ObjectCentricEventLog`] from a JSON-OCEL byte slice
///
/// See also [`import_jsonocel_from_path`].
///
pub fn import_jsonocel_from_slice(
    slice: &[u8],
    cfg: &JsonParseParameters,
) -> Result<ObjectCentricEventLog, OCELImportError> {
    let data: Value = serde_json::from_slice(slice)?;
    parse_json(&data, cfg)
}

/// Import an [`ObjectCentricEventLog`] from a reader in the given format (`json`, `json.gz`, ...)
pub fn import_jsonocel_from_reader<R: Read>(
    reader: R,
    format: &str,
    cfg: &JsonParseParameters,
) -> Result<ObjectCentricEventLog, OCELImportError> {
    let data = read_json_document(reader, format)?;
    parse_json(&data, cfg)
}

fn get_section<'a>(
    data: &'a Value,
    key: &str,
) -> Result<&'a Map<String, Value>, OCELImportError> {
    data.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| FileFormatError::MissingSection(key.to_string()).into())
}

/// Declared attribute names and object types
///
/// An absent metadata block (or absent list) is treated as empty,
/// a block that is not a JSON object is rejected.
fn parse_global_log(
    data: &Value,
    log_params: &LogParams,
) -> Result<(Vec<String>, Vec<String>), OCELImportError> {
    let Some(meta) = data.get(&log_params.meta) else {
        debug!("No '{}' block found, using empty metadata", log_params.meta);
        return Ok((Vec::new(), Vec::new()));
    };
    let meta = meta
        .as_object()
        .ok_or_else(|| FileFormatError::MissingSection(log_params.meta.clone()))?;
    let list = |key: &str| -> Result<Vec<String>, OCELImportError> {
        match meta.get(key) {
            None => Ok(Vec::new()),
            Some(value) => string_list(value).ok_or_else(|| {
                FileFormatError::MissingSection(format!("{}/{key}", log_params.meta)).into()
            }),
        }
    };
    Ok((list(&log_params.attr_names)?, list(&log_params.obj_types)?))
}

/// Event ids index into `events_section` (both follow input order)
fn check_object_references(
    events_section: &Map<String, Value>,
    events: &Events,
    objects: &Objects,
    strict: bool,
) -> Result<(), OCELImportError> {
    let mut undeclared = 0;
    for (key, ev) in events_section.keys().zip(events.iter_by_id()) {
        for oid in ev.omap.iter().filter(|oid| !objects.contains(oid)) {
            if strict {
                return Err(OCELImportError::MalformedEvent {
                    event: key.clone(),
                    reason: RecordError::UnknownObject(oid.clone()),
                });
            }
            undeclared += 1;
        }
    }
    if undeclared > 0 {
        warn!("{undeclared} object references point to objects not declared in the log");
    }
    Ok(())
}

/// Get a required field of a record
pub(crate) fn get_field<'a>(
    record: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Value, RecordError> {
    record
        .get(field)
        .ok_or_else(|| RecordError::MissingField(field.to_string()))
}

pub(crate) fn get_str<'a>(
    record: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, RecordError> {
    get_field(record, field)?
        .as_str()
        .ok_or_else(|| RecordError::InvalidField {
            field: field.to_string(),
            expected: "a string",
        })
}

pub(crate) fn get_object<'a>(
    record: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Map<String, Value>, RecordError> {
    get_field(record, field)?
        .as_object()
        .ok_or_else(|| RecordError::InvalidField {
            field: field.to_string(),
            expected: "a JSON object",
        })
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

pub(crate) fn get_string_list(
    record: &Map<String, Value>,
    field: &str,
) -> Result<Vec<String>, RecordError> {
    string_list(get_field(record, field)?).ok_or_else(|| RecordError::InvalidField {
        field: field.to_string(),
        expected: "a list of strings",
    })
}
