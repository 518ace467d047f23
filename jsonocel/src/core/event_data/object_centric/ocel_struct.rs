use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize, Serializer};

/// Attribute key under which every event carries its (start) timestamp
pub const START_TIMESTAMP_KEY: &str = "start_timestamp";

///
/// An Event Identity
///
/// Assigned in the iteration order of the input document (starting at `0`)
/// and never reassigned, in particular not by the chronological ordering of [`Events`].
///
#[derive(
    PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(usize);

impl From<usize> for EventId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl EventId {
    /// Retrieve inner id value
    pub fn into_inner(self) -> usize {
        self.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
/// Attribute Values of events and objects
pub enum AttributeValue {
    /// String
    String(String),
    /// DateTime
    Time(DateTime<FixedOffset>),
    /// Integer
    Integer(i64),
    /// Float
    Float(f64),
    /// Boolean
    Boolean(bool),
    /// List of values
    List(Vec<AttributeValue>),
    /// Nested key-value map
    Map(Attributes),
    /// Explicit `null`
    Null,
}

/// Type label of an [`AttributeValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// String
    String,
    /// DateTime
    Time,
    /// Integer
    Integer,
    /// Float
    Float,
    /// Boolean
    Boolean,
    /// List of values
    List,
    /// Nested key-value map
    Map,
    /// Explicit `null`
    Null,
}

impl Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AttributeType::String => "string",
            AttributeType::Time => "time",
            AttributeType::Integer => "integer",
            AttributeType::Float => "float",
            AttributeType::Boolean => "boolean",
            AttributeType::List => "list",
            AttributeType::Map => "map",
            AttributeType::Null => "null",
        };
        write!(f, "{label}")
    }
}

impl AttributeValue {
    /// Get the [`AttributeType`] label of this value
    pub fn get_type(&self) -> AttributeType {
        match self {
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Time(_) => AttributeType::Time,
            AttributeValue::Integer(_) => AttributeType::Integer,
            AttributeValue::Float(_) => AttributeType::Float,
            AttributeValue::Boolean(_) => AttributeType::Boolean,
            AttributeValue::List(_) => AttributeType::List,
            AttributeValue::Map(_) => AttributeType::Map,
            AttributeValue::Null => AttributeType::Null,
        }
    }

    /// Try to get the inner string value
    pub fn try_as_string(&self) -> Option<&String> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner timestamp value
    pub fn try_as_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            AttributeValue::Time(t) => Some(t),
            _ => None,
        }
    }
}

impl From<&serde_json::Value> for AttributeValue {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => AttributeValue::Null,
            serde_json::Value::Bool(b) => AttributeValue::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Integer(i),
                None => AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => AttributeValue::String(s.clone()),
            serde_json::Value::Array(values) => {
                AttributeValue::List(values.iter().map(AttributeValue::from).collect())
            }
            serde_json::Value::Object(map) => AttributeValue::Map(Attributes::from(map)),
        }
    }
}

impl From<&AttributeValue> for serde_json::Value {
    fn from(v: &AttributeValue) -> Self {
        match v {
            AttributeValue::String(s) => serde_json::Value::String(s.clone()),
            AttributeValue::Time(t) => serde_json::Value::String(t.to_rfc3339()),
            AttributeValue::Integer(i) => serde_json::Value::from(*i),
            // Non-finite floats have no JSON representation and end up as `null`
            AttributeValue::Float(f) => serde_json::Value::from(*f),
            AttributeValue::Boolean(b) => serde_json::Value::Bool(*b),
            AttributeValue::List(values) => {
                serde_json::Value::Array(values.iter().map(serde_json::Value::from).collect())
            }
            AttributeValue::Map(attributes) => serde_json::Value::Object(attributes.into()),
            AttributeValue::Null => serde_json::Value::Null,
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Time(t) => write!(f, "{}", t.to_rfc3339()),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Float(x) => write!(f, "{x}"),
            AttributeValue::Boolean(b) => write!(f, "{b}"),
            AttributeValue::List(_) | AttributeValue::Map(_) => {
                write!(f, "{}", serde_json::Value::from(self))
            }
            AttributeValue::Null => Ok(()),
        }
    }
}

///
/// Insertion-ordered attribute map with unique keys
///
/// Used as the value map of events and objects.
/// Serialized as a JSON object.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an attribute by its key
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check whether an attribute with the given key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert an attribute
    ///
    /// An existing value for the same key is replaced in place (keeping its position);
    /// the replaced value is returned.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: AttributeValue,
    ) -> Option<AttributeValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Iterate over all key-value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterate over all keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attributes are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&serde_json::Map<String, serde_json::Value>> for Attributes {
    fn from(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            entries: map
                .iter()
                .map(|(k, v)| (k.clone(), AttributeValue::from(v)))
                .collect(),
        }
    }
}

impl From<&Attributes> for serde_json::Map<String, serde_json::Value> {
    fn from(attributes: &Attributes) -> Self {
        attributes
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
            .collect()
    }
}

impl FromIterator<(String, AttributeValue)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, AttributeValue)>>(iter: T) -> Self {
        let mut attributes = Attributes::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Event of an object-centric event log
pub struct Event {
    /// Event identity (input order)
    pub id: EventId,
    /// Activity name
    pub act: String,
    /// Identifiers of participating objects, in input order
    pub omap: Vec<String>,
    /// Attribute values
    ///
    /// Always contains [`START_TIMESTAMP_KEY`] holding an [`AttributeValue::Time`]
    pub vmap: Attributes,
    /// DateTime when event occured
    pub time: DateTime<FixedOffset>,
}

///
/// Events of a log
///
/// Iteration ([`Events::iter`]) is chronological (stable w.r.t. input order for equal timestamps),
/// while lookup by [`EventId`] and [`Events::iter_by_id`] use the identities assigned in input order.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Events {
    /// Events sorted chronologically
    events: Vec<Event>,
    /// Position in `events` for each event id
    positions: Vec<usize>,
}

impl Events {
    /// Construct from events given in identity order (`events[i].id == i`)
    pub(crate) fn from_input_order(mut events: Vec<Event>) -> Self {
        debug_assert!(events
            .iter()
            .enumerate()
            .all(|(i, ev)| ev.id.into_inner() == i));
        // Stable sort: ties keep input order
        events.sort_by_key(|ev| ev.time);
        let mut positions = vec![0; events.len()];
        for (pos, ev) in events.iter().enumerate() {
            positions[ev.id.into_inner()] = pos;
        }
        Self { events, positions }
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether there are no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get an event by its identity
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.positions
            .get(id.into_inner())
            .map(|pos| &self.events[*pos])
    }

    /// Iterate over events in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Iterate over events in identity (i.e., input) order
    pub fn iter_by_id(&self) -> impl Iterator<Item = &Event> {
        self.positions.iter().map(|pos| &self.events[*pos])
    }

    /// Event identities in chronological order
    pub fn chronological_ids(&self) -> Vec<EventId> {
        self.events.iter().map(|ev| ev.id).collect()
    }
}

impl Serialize for Events {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Object of an object-centric event log
pub struct Obj {
    /// Object identifier (verbatim from input)
    pub id: String,
    /// Object Type
    #[serde(rename = "type")]
    pub object_type: String,
    /// Object attribute values
    pub ovmap: Attributes,
}

///
/// Objects of a log, in input order
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objects {
    objects: Vec<Obj>,
    object_ids_to_index: HashMap<String, usize>,
}

impl Objects {
    /// Add an object
    ///
    /// A later object with an already present identifier replaces the earlier one (keeping its position).
    pub(crate) fn push(&mut self, object: Obj) {
        match self.object_ids_to_index.get(&object.id) {
            Some(index) => self.objects[*index] = object,
            None => {
                self.object_ids_to_index
                    .insert(object.id.clone(), self.objects.len());
                self.objects.push(object);
            }
        }
    }

    /// Get an object by its identifier
    pub fn get(&self, id: &str) -> Option<&Obj> {
        self.object_ids_to_index
            .get(id)
            .map(|index| &self.objects[*index])
    }

    /// Check if an object with the given identifier exists
    pub fn contains(&self, id: &str) -> bool {
        self.object_ids_to_index.contains_key(id)
    }

    /// Iterate over all objects in input order
    pub fn iter(&self) -> impl Iterator<Item = &Obj> {
        self.objects.iter()
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether there are no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl FromIterator<Obj> for Objects {
    fn from_iter<T: IntoIterator<Item = Obj>>(iter: T) -> Self {
        let mut objects = Objects::default();
        for o in iter {
            objects.push(o);
        }
        objects
    }
}

impl Serialize for Objects {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

///
/// Object-event incidence map
///
/// For each referenced object identifier, the ids of all events referencing it (in input order).
/// Includes identifiers that do not appear in the objects section.
///
pub type ObjectEventMapping = HashMap<String, Vec<EventId>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Metadata of an [`ObjectCentricEventLog`]
pub struct MetaObjectCentricData {
    /// Attribute names as declared in the log-level metadata
    pub attr_names: Vec<String>,
    /// Object types as declared in the log-level metadata
    pub obj_types: Vec<String>,
    /// Distinct type labels used by any event or object attribute
    pub attr_types: Vec<AttributeType>,
    /// Inferred type per attribute name (object attributes take precedence over event attributes)
    pub attr_typ: BTreeMap<String, AttributeType>,
    /// Attribute names observed per activity
    pub act_attr: BTreeMap<String, Vec<String>>,
    /// Attribute names observed on events, in order of first occurrence
    pub attr_events: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Raw event and object data of an [`ObjectCentricEventLog`]
pub struct RawObjectCentricData {
    /// Events
    pub events: Events,
    /// Objects
    pub objects: Objects,
    /// Object-event incidence map
    pub obj_event_mapping: ObjectEventMapping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
///
/// Parsed object-centric event log
///
/// Consists of inferred [`MetaObjectCentricData`] and the [`RawObjectCentricData`].
///
pub struct ObjectCentricEventLog {
    /// Metadata
    pub meta: MetaObjectCentricData,
    /// Raw event/object data
    pub raw: RawObjectCentricData,
}
