use std::time::Instant;

use crate::{
    export_jsonocel_to_vec, import_jsonocel_from_path, import_jsonocel_from_slice, parse_json,
    parse_timestamp, AttributeType, AttributeValue, EventId, Exportable, FileFormatError,
    Importable, JsonParseParameters, OCELImportError, ObjectCentricEventLog, RecordError,
};

use super::test_data_path;

fn ids(ids: &[usize]) -> Vec<EventId> {
    ids.iter().copied().map(EventId::from).collect()
}

#[test]
fn test_two_events() {
    let log_bytes = include_bytes!("test_data/two-events.jsonocel");
    let log = import_jsonocel_from_slice(log_bytes, &JsonParseParameters::default()).unwrap();
    let events = &log.raw.events;

    assert_eq!(events.get(EventId::from(0)).unwrap().act, "A");
    assert_eq!(events.get(EventId::from(1)).unwrap().act, "B");
    assert_eq!(events.chronological_ids(), ids(&[1, 0]));

    let mapping = &log.raw.obj_event_mapping;
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["o1"], ids(&[0, 1]));
    assert_eq!(mapping["o2"], ids(&[1]));

    // Identity 1 is visited last
    assert_eq!(log.meta.attr_typ["cost"], AttributeType::String);
    assert_eq!(log.meta.act_attr["A"], vec!["cost", "start_timestamp"]);
    assert_eq!(log.meta.act_attr["B"], vec!["cost", "start_timestamp"]);
    assert_eq!(log.meta.attr_names, vec!["cost"]);
    assert_eq!(log.meta.obj_types, vec!["order"]);
}

#[test]
fn test_order_management_import() {
    let now = Instant::now();
    let log_bytes = include_bytes!("test_data/order-management-small.jsonocel");
    let log = import_jsonocel_from_slice(log_bytes, &JsonParseParameters::default()).unwrap();
    println!(
        "Imported OCEL with {} objects and {} events in {:#?}",
        log.raw.objects.len(),
        log.raw.events.len(),
        now.elapsed()
    );
    assert_eq!(log.raw.events.len(), 5);
    assert_eq!(log.raw.objects.len(), 5);

    let acts: Vec<_> = log.raw.events.iter_by_id().map(|e| e.act.as_str()).collect();
    assert_eq!(
        acts,
        vec!["place order", "pay order", "place order", "pick item", "send package"]
    );
    // place_o2 happens at 11:00 UTC; pay_o1 and pick_i1 share a timestamp
    assert_eq!(log.raw.events.chronological_ids(), ids(&[0, 2, 1, 3, 4]));

    let mapping = &log.raw.obj_event_mapping;
    assert_eq!(mapping["o1"], ids(&[0, 1]));
    assert_eq!(mapping["i1"], ids(&[0, 3, 4]));
    assert_eq!(mapping["i2"], ids(&[0, 4]));
    assert_eq!(mapping["i3"], ids(&[2, 4]));
    // Undeclared object is still recorded
    assert_eq!(mapping["p1"], ids(&[4]));
    assert!(!log.raw.objects.contains("p1"));

    let pick = log.raw.events.get(EventId::from(3)).unwrap();
    assert_eq!(
        pick.vmap.get("start_timestamp"),
        Some(&AttributeValue::Time(
            parse_timestamp("2023-03-02T09:30:00").unwrap()
        ))
    );
    let send = log.raw.events.get(EventId::from(4)).unwrap();
    assert_eq!(
        send.vmap.get("start_timestamp"),
        Some(&AttributeValue::Time(send.time))
    );

    let meta = &log.meta;
    assert_eq!(meta.attr_events, vec!["customer", "price", "start_timestamp"]);
    assert_eq!(meta.attr_typ["customer"], AttributeType::String);
    // Object attribute "price" overrides the event attribute
    assert_eq!(meta.attr_typ["price"], AttributeType::String);
    assert_eq!(meta.attr_typ["weight"], AttributeType::Float);
    assert_eq!(meta.attr_typ["start_timestamp"], AttributeType::Time);
    assert_eq!(
        meta.attr_types,
        vec![
            AttributeType::String,
            AttributeType::Time,
            AttributeType::Integer,
            AttributeType::Float
        ]
    );
    assert_eq!(
        meta.act_attr["place order"],
        vec!["customer", "price", "start_timestamp"]
    );
    assert_eq!(meta.act_attr["pay order"], vec!["price", "start_timestamp"]);
    assert_eq!(meta.act_attr["send package"], vec!["start_timestamp"]);
    assert_eq!(meta.obj_types, vec!["order", "item", "package"]);
}

#[test]
fn test_empty_log() {
    let log_bytes = include_bytes!("test_data/empty.jsonocel");
    let log = import_jsonocel_from_slice(log_bytes, &JsonParseParameters::default()).unwrap();
    assert_eq!(log, ObjectCentricEventLog::default());

    // Without any metadata block
    let log = import_jsonocel_from_slice(
        br#"{"ocel:events": {}, "ocel:objects": {}}"#,
        &JsonParseParameters::default(),
    )
    .unwrap();
    assert!(log.meta.attr_names.is_empty());
    assert!(log.raw.events.is_empty());
}

#[test]
fn test_round_trip() {
    let log_bytes = include_bytes!("test_data/order-management-small.jsonocel");
    let cfg = JsonParseParameters::default();
    let log = import_jsonocel_from_slice(log_bytes, &cfg).unwrap();
    let exported = export_jsonocel_to_vec(&log, &cfg).unwrap();
    let reimported = import_jsonocel_from_slice(&exported, &cfg).unwrap();

    assert_eq!(reimported.meta, log.meta);
    assert_eq!(reimported.raw.obj_event_mapping, log.raw.obj_event_mapping);
    assert_eq!(
        reimported.raw.events.chronological_ids(),
        log.raw.events.chronological_ids()
    );
    assert_eq!(reimported, log);
}

#[test]
fn test_round_trip_custom_field_names() {
    let cfg: JsonParseParameters = serde_json::from_str(
        r#"{
            "log_params": {"events": "events", "objects": "objects", "meta": "meta"},
            "event_params": {"act": "activity", "omap": "objects", "vmap": "values", "time": "time"},
            "obj_params": {"type": "type", "ovmap": "values"}
        }"#,
    )
    .unwrap();
    let log_bytes = include_bytes!("test_data/order-management-small.jsonocel");
    let log = import_jsonocel_from_slice(log_bytes, &JsonParseParameters::default()).unwrap();
    let exported = export_jsonocel_to_vec(&log, &cfg).unwrap();

    let document: serde_json::Value = serde_json::from_slice(&exported).unwrap();
    assert!(document["events"]["0"]["activity"].is_string());
    assert!(document.get("ocel:events").is_none());

    let reimported = import_jsonocel_from_slice(&exported, &cfg).unwrap();
    assert_eq!(reimported, log);
    // Default field names do not match this layout
    assert!(matches!(
        parse_json(&document, &JsonParseParameters::default()),
        Err(OCELImportError::FileFormat(FileFormatError::MissingSection(_)))
    ));
}

#[test]
fn test_gz_round_trip() {
    let log_bytes = include_bytes!("test_data/order-management-small.jsonocel");
    let log = ObjectCentricEventLog::import_from_bytes(log_bytes, "jsonocel").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order-management.jsonocel.gz");
    log.export_to_path(&path).unwrap();

    let reimported = ObjectCentricEventLog::import_from_path(&path).unwrap();
    assert_eq!(reimported, log);
    let reimported =
        import_jsonocel_from_path(&path, &JsonParseParameters::default()).unwrap();
    assert_eq!(reimported.raw.events.len(), 5);
}

#[test]
fn test_strict_object_references() {
    let log_bytes = include_bytes!("test_data/order-management-small.jsonocel");
    let cfg = JsonParseParameters {
        strict_object_references: true,
        ..Default::default()
    };
    match import_jsonocel_from_slice(log_bytes, &cfg) {
        Err(OCELImportError::MalformedEvent { event, reason }) => {
            assert_eq!(event, "send_p1");
            assert_eq!(reason, RecordError::UnknownObject("p1".to_string()));
        }
        res => panic!("Expected unknown object error, got {res:?}"),
    }
}

#[test]
fn test_malformed_input() {
    let cfg = JsonParseParameters::default();
    assert!(matches!(
        import_jsonocel_from_slice(b"{\"ocel:events\": ", &cfg),
        Err(OCELImportError::FileFormat(FileFormatError::Json(_)))
    ));
    assert!(matches!(
        import_jsonocel_from_slice(br#"{"ocel:objects": {}}"#, &cfg),
        Err(OCELImportError::FileFormat(FileFormatError::MissingSection(ref s))) if s == "ocel:events"
    ));
    assert!(matches!(
        import_jsonocel_from_slice(
            br#"{"ocel:events": {"e0": 5}, "ocel:objects": {}}"#,
            &cfg
        ),
        Err(OCELImportError::MalformedEvent {
            reason: RecordError::NotAnObject,
            ..
        })
    ));
    assert!(matches!(
        import_jsonocel_from_slice(
            br#"{"ocel:events": {}, "ocel:objects": {"o1": {"ocel:ovmap": {}}}}"#,
            &cfg
        ),
        Err(OCELImportError::MalformedObject { .. })
    ));
    let log = import_jsonocel_from_slice(
        br#"{"ocel:events": {"e0": {"ocel:activity": "A", "ocel:omap": [], "ocel:vmap": {}, "ocel:timestamp": "2024-01-02T10:00"}}, "ocel:objects": {}}"#,
        &cfg,
    )
    .unwrap();
    assert_eq!(log.raw.events.len(), 1);
    assert!(matches!(
        import_jsonocel_from_slice(
            br#"{"ocel:global-log": {"ocel:object-types": "order"}, "ocel:events": {}, "ocel:objects": {}}"#,
            &cfg
        ),
        Err(OCELImportError::FileFormat(FileFormatError::MissingSection(_)))
    ));
    assert!(matches!(
        import_jsonocel_from_slice(
            br#"{"ocel:global-log": 5, "ocel:events": {}, "ocel:objects": {}}"#,
            &cfg
        ),
        Err(OCELImportError::FileFormat(FileFormatError::MissingSection(ref s))) if s == "ocel:global-log"
    ));
    assert!(matches!(
        ObjectCentricEventLog::import_from_bytes(b"<log/>", "xml"),
        Err(OCELImportError::FileFormat(FileFormatError::UnsupportedFormat(_)))
    ));
    assert!(matches!(
        import_jsonocel_from_path(test_data_path("missing.jsonocel"), &cfg),
        Err(OCELImportError::FileFormat(FileFormatError::Io(_)))
    ));
}
