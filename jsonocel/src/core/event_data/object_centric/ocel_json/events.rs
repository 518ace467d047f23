use std::collections::HashMap;

use serde_json::{Map, Value};

use super::{get_object, get_str, get_string_list};
use crate::core::event_data::{
    object_centric::{
        io::{OCELImportError, RecordError},
        ocel_struct::{
            AttributeValue, Attributes, Event, EventId, Events, ObjectEventMapping,
            START_TIMESTAMP_KEY,
        },
        parameters::EventParams,
    },
    timestamp_utils::parse_timestamp,
};

///
/// Parse the events section of a JSON-OCEL document
///
/// Event ids are assigned in the iteration order of `data`, which is also the order in which
/// event ids are appended to the returned [`ObjectEventMapping`].
/// The returned [`Events`] iterate chronologically.
///
pub fn parse_events(
    data: &Map<String, Value>,
    cfg: &EventParams,
) -> Result<(Events, ObjectEventMapping), OCELImportError> {
    let mut events = Vec::with_capacity(data.len());
    let mut obj_event_mapping: ObjectEventMapping = HashMap::new();
    for (eid, (key, record)) in data.iter().enumerate() {
        let event = parse_event(EventId::from(eid), key, record, cfg)?;
        for oid in &event.omap {
            obj_event_mapping
                .entry(oid.clone())
                .or_default()
                .push(event.id);
        }
        events.push(event);
    }
    Ok((Events::from_input_order(events), obj_event_mapping))
}

fn parse_event(
    id: EventId,
    key: &str,
    record: &Value,
    cfg: &EventParams,
) -> Result<Event, OCELImportError> {
    let malformed = |reason: RecordError| OCELImportError::MalformedEvent {
        event: key.to_string(),
        reason,
    };
    let record = record
        .as_object()
        .ok_or_else(|| malformed(RecordError::NotAnObject))?;

    let act = get_str(record, &cfg.act).map_err(malformed)?;
    let omap = get_string_list(record, &cfg.omap).map_err(malformed)?;
    let mut vmap = Attributes::from(get_object(record, &cfg.vmap).map_err(malformed)?);
    let time_str = get_str(record, &cfg.time).map_err(malformed)?;
    let time = parse_timestamp(time_str).map_err(|source| OCELImportError::Timestamp {
        event: key.to_string(),
        field: cfg.time.clone(),
        source,
    })?;

    let start_time = match vmap.get(START_TIMESTAMP_KEY) {
        None => time,
        Some(AttributeValue::String(s)) => {
            parse_timestamp(s).map_err(|source| OCELImportError::Timestamp {
                event: key.to_string(),
                field: START_TIMESTAMP_KEY.to_string(),
                source,
            })?
        }
        Some(_) => {
            return Err(malformed(RecordError::InvalidField {
                field: START_TIMESTAMP_KEY.to_string(),
                expected: "a timestamp string",
            }))
        }
    };
    vmap.insert(START_TIMESTAMP_KEY, AttributeValue::Time(start_time));

    Ok(Event {
        id,
        act: act.to_string(),
        omap,
        vmap,
        time,
    })
}
