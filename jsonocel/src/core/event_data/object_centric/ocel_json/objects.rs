use serde_json::{Map, Value};

use super::{get_object, get_str};
use crate::core::event_data::object_centric::{
    io::{OCELImportError, RecordError},
    ocel_struct::{Attributes, Obj, Objects},
    parameters::ObjectParams,
};

/// Parse the objects section of a JSON-OCEL document
///
/// Object identifiers are taken verbatim from the keys of `data`; input order is kept.
pub fn parse_objects(
    data: &Map<String, Value>,
    cfg: &ObjectParams,
) -> Result<Objects, OCELImportError> {
    data.iter()
        .map(|(oid, record)| {
            parse_object(oid, record, cfg).map_err(|reason| OCELImportError::MalformedObject {
                object: oid.clone(),
                reason,
            })
        })
        .collect()
}

fn parse_object(oid: &str, record: &Value, cfg: &ObjectParams) -> Result<Obj, RecordError> {
    let record = record.as_object().ok_or(RecordError::NotAnObject)?;
    Ok(Obj {
        id: oid.to_string(),
        object_type: get_str(record, &cfg.object_type)?.to_string(),
        ovmap: Attributes::from(get_object(record, &cfg.ovmap)?),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_objects_keeps_order() {
        let data = json!({
            "o2": {"ocel:type": "item", "ocel:ovmap": {"weight": 1.5}},
            "o1": {"ocel:type": "order", "ocel:ovmap": {}},
        });
        let objects = parse_objects(data.as_object().unwrap(), &ObjectParams::default()).unwrap();
        let ids: Vec<_> = objects.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o2", "o1"]);
        assert_eq!(objects.get("o1").unwrap().object_type, "order");
        assert!(!objects.contains("o3"));
    }

    #[test]
    fn test_missing_ovmap() {
        let data = json!({
            "o1": {"ocel:type": "order"},
        });
        let err = parse_objects(data.as_object().unwrap(), &ObjectParams::default()).unwrap_err();
        assert!(matches!(
            err,
            OCELImportError::MalformedObject { ref object, reason: RecordError::MissingField(ref f) }
                if object == "o1" && f == "ocel:ovmap"
        ));
    }

    #[test]
    fn test_wrong_type_shape() {
        let data = json!({
            "o1": {"ocel:type": ["order"], "ocel:ovmap": {}},
        });
        assert!(matches!(
            parse_objects(data.as_object().unwrap(), &ObjectParams::default()),
            Err(OCELImportError::MalformedObject {
                reason: RecordError::InvalidField { .. },
                ..
            })
        ));
    }
}
