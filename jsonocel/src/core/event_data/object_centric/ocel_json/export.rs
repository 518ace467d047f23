use std::{fs::File, path::Path};

use serde_json::{Map, Value};

use crate::core::event_data::object_centric::{
    io::{write_json_document, OCELImportError},
    ocel_struct::ObjectCentricEventLog,
    parameters::JsonParseParameters,
};
use crate::core::io::Exportable;

fn string_array<'a>(values: impl IntoIterator<Item = &'a String>) -> Value {
    Value::Array(values.into_iter().cloned().map(Value::String).collect())
}

///
/// Convert an [`ObjectCentricEventLog`] back into a JSON-OCEL document using the given field names
///
/// Events are written in identity order, keyed by their identity, so that importing the result
/// again reproduces the same identities, object-event mapping and inferred metadata.
///
pub fn ocel_to_json_value(log: &ObjectCentricEventLog, cfg: &JsonParseParameters) -> Value {
    let ev_cfg = &cfg.event_params;
    let events: Map<String, Value> = log
        .raw
        .events
        .iter_by_id()
        .map(|ev| {
            let mut record = Map::new();
            record.insert(ev_cfg.act.clone(), Value::String(ev.act.clone()));
            record.insert(ev_cfg.omap.clone(), string_array(&ev.omap));
            record.insert(ev_cfg.vmap.clone(), Value::Object((&ev.vmap).into()));
            record.insert(ev_cfg.time.clone(), Value::String(ev.time.to_rfc3339()));
            (ev.id.to_string(), Value::Object(record))
        })
        .collect();

    let ob_cfg = &cfg.obj_params;
    let objects: Map<String, Value> = log
        .raw
        .objects
        .iter()
        .map(|o| {
            let mut record = Map::new();
            record.insert(
                ob_cfg.object_type.clone(),
                Value::String(o.object_type.clone()),
            );
            record.insert(ob_cfg.ovmap.clone(), Value::Object((&o.ovmap).into()));
            (o.id.clone(), Value::Object(record))
        })
        .collect();

    let log_cfg = &cfg.log_params;
    let mut meta = Map::new();
    meta.insert(log_cfg.attr_names.clone(), string_array(&log.meta.attr_names));
    meta.insert(log_cfg.obj_types.clone(), string_array(&log.meta.obj_types));

    let mut document = Map::new();
    document.insert(log_cfg.meta.clone(), Value::Object(meta));
    document.insert(log_cfg.events.clone(), Value::Object(events));
    document.insert(log_cfg.objects.clone(), Value::Object(objects));
    Value::Object(document)
}

///
/// Export an [`ObjectCentricEventLog`] to a JSON-OCEL file at the specified path
///
/// Paths ending in `.gz` are gzip-compressed.
///
pub fn export_jsonocel_path<P: AsRef<Path>>(
    log: &ObjectCentricEventLog,
    path: P,
    cfg: &JsonParseParameters,
) -> Result<(), OCELImportError> {
    let path = path.as_ref();
    let format = <ObjectCentricEventLog as Exportable>::infer_format(path)
        .unwrap_or_else(|| "json".to_string());
    write_json_document(File::create(path)?, &ocel_to_json_value(log, cfg), &format)
}

/// Export an [`ObjectCentricEventLog`] to JSON-OCEL in a byte array ([`Vec<u8>`])
pub fn export_jsonocel_to_vec(
    log: &ObjectCentricEventLog,
    cfg: &JsonParseParameters,
) -> Result<Vec<u8>, OCELImportError> {
    Ok(serde_json::to_vec(&ocel_to_json_value(log, cfg))?)
}
