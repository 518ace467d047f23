use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::event_data::object_centric::ocel_struct::{
    AttributeType, Attributes, Events, MetaObjectCentricData, Objects,
};

/// Attribute names (in order of first occurrence) with the type of the last observed value
///
/// Note: if an attribute carries values of different types, the last one visited wins.
pub fn last_observed_types<'a>(
    value_maps: impl IntoIterator<Item = &'a Attributes>,
) -> Vec<(String, AttributeType)> {
    let mut types: Vec<(String, AttributeType)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for vmap in value_maps {
        for (name, value) in vmap.iter() {
            match index.get(name.as_str()) {
                Some(i) => types[*i].1 = value.get_type(),
                None => {
                    index.insert(name.as_str(), types.len());
                    types.push((name.clone(), value.get_type()));
                }
            }
        }
    }
    types
}

/// Attribute names ever observed on events of each activity (sorted)
pub fn attributes_per_activity(events: &Events) -> BTreeMap<String, Vec<String>> {
    let mut act_attr: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for ev in events.iter_by_id() {
        act_attr
            .entry(ev.act.as_str())
            .or_default()
            .extend(ev.vmap.keys().map(String::as_str));
    }
    act_attr
        .into_iter()
        .map(|(act, attrs)| {
            (
                act.to_string(),
                attrs.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}

///
/// Infer [`MetaObjectCentricData`] from parsed events and objects
///
/// Events are visited in identity (input) order, objects in input order.
/// Declared attribute names and object types are passed through verbatim.
///
pub fn infer_metadata(
    events: &Events,
    objects: &Objects,
    attr_names: Vec<String>,
    obj_types: Vec<String>,
) -> MetaObjectCentricData {
    let attr_events = last_observed_types(events.iter_by_id().map(|ev| &ev.vmap));
    let attr_objects = last_observed_types(objects.iter().map(|o| &o.ovmap));

    let attr_types: BTreeSet<AttributeType> = attr_events
        .iter()
        .chain(attr_objects.iter())
        .map(|(_, t)| *t)
        .collect();
    // Object attributes override event attributes of the same name
    let attr_typ: BTreeMap<String, AttributeType> = attr_events
        .iter()
        .chain(attr_objects.iter())
        .cloned()
        .collect();

    MetaObjectCentricData {
        attr_names,
        obj_types,
        attr_types: attr_types.into_iter().collect(),
        attr_typ,
        act_attr: attributes_per_activity(events),
        attr_events: attr_events.into_iter().map(|(name, _)| name).collect(),
    }
}
