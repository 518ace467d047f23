//! Supplementary object attribute tables (CSV)

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use serde::Serialize;
use tracing::debug;

use crate::core::event_data::{
    object_centric::{
        io::{FileFormatError, OCELImportError},
        ocel_struct::{AttributeValue, Attributes},
    },
    timestamp_utils::parse_timestamp,
};

/// Parse a CSV cell into a typed attribute value
///
/// Tries to interpret the string in the following order:
/// empty (null) > bool > int > float > time > string
fn parse_value(s: &str) -> AttributeValue {
    let s = s.trim();
    if s.is_empty() {
        return AttributeValue::Null;
    }
    if s.eq_ignore_ascii_case("true") {
        return AttributeValue::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return AttributeValue::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return AttributeValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return AttributeValue::Float(f);
    }
    if let Ok(ts) = parse_timestamp(s) {
        return AttributeValue::Time(ts);
    }
    AttributeValue::String(s.to_string())
}

///
/// Additional per-object attribute values, loaded from a delimited table
///
/// The first column holds the object identifier, all other columns are attributes.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectAttributeTable {
    /// Name of the object identifier column
    pub id_column: String,
    /// Names of the attribute columns
    pub columns: Vec<String>,
    rows: Vec<(String, Vec<AttributeValue>)>,
    #[serde(skip)]
    object_ids_to_row: HashMap<String, usize>,
}

impl ObjectAttributeTable {
    /// Read a comma-separated table with a header row
    ///
    /// Rows shorter than the header are padded with [`AttributeValue::Null`],
    /// longer rows are rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, OCELImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut headers = headers.iter().map(str::to_string);
        let id_column = headers
            .next()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| FileFormatError::MissingColumn("object id".to_string()))?;
        let mut table = Self {
            id_column,
            columns: headers.collect(),
            ..Default::default()
        };

        for record in csv_reader.records() {
            let record = record?;
            let mut cells = record.iter();
            let object_id = cells.next().unwrap_or_default().trim().to_string();
            if record.len() > table.columns.len() + 1 {
                return Err(FileFormatError::ExtraCells {
                    object: object_id,
                    expected: table.columns.len() + 1,
                    found: record.len(),
                }
                .into());
            }
            // Missing trailing cells are null
            let mut values: Vec<AttributeValue> = cells.map(parse_value).collect();
            values.resize(table.columns.len(), AttributeValue::Null);
            match table.object_ids_to_row.get(&object_id) {
                Some(row) => table.rows[*row].1 = values,
                None => {
                    table
                        .object_ids_to_row
                        .insert(object_id.clone(), table.rows.len());
                    table.rows.push((object_id, values));
                }
            }
        }
        Ok(table)
    }

    /// Read a table from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, OCELImportError> {
        let path = path.as_ref();
        let table = Self::from_reader(File::open(path)?)?;
        debug!(
            "Loaded attributes of {} objects ({} columns) from {}",
            table.len(),
            table.columns.len(),
            path.display()
        );
        Ok(table)
    }

    /// Get the value of an attribute of an object
    ///
    /// Empty cells are [`AttributeValue::Null`].
    pub fn get(&self, object_id: &str, attribute: &str) -> Option<&AttributeValue> {
        let row = self.object_ids_to_row.get(object_id)?;
        let col = self.columns.iter().position(|c| c == attribute)?;
        self.rows[*row].1.get(col)
    }

    /// All attribute values of an object
    pub fn attributes_of(&self, object_id: &str) -> Option<Attributes> {
        let row = self.object_ids_to_row.get(object_id)?;
        Some(
            self.columns
                .iter()
                .cloned()
                .zip(self.rows[*row].1.iter().cloned())
                .collect(),
        )
    }

    /// Object identifiers in table order
    pub fn object_ids(&self) -> impl Iterator<Item = &String> {
        self.rows.iter().map(|(id, _)| id)
    }

    /// Number of objects (rows)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_cells() {
        let csv = "object_id,price,express,note,delivered\n\
                   o1,12.5,true,fragile,2024-01-02T10:00:00\n\
                   o2,3,false,,\n";
        let table = ObjectAttributeTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.id_column, "object_id");
        assert_eq!(table.columns, vec!["price", "express", "note", "delivered"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("o1", "price"), Some(&AttributeValue::Float(12.5)));
        assert_eq!(table.get("o2", "price"), Some(&AttributeValue::Integer(3)));
        assert_eq!(
            table.get("o1", "express"),
            Some(&AttributeValue::Boolean(true))
        );
        assert_eq!(
            table.get("o1", "note"),
            Some(&AttributeValue::String("fragile".to_string()))
        );
        assert_eq!(table.get("o2", "note"), Some(&AttributeValue::Null));
        assert!(table.get("o1", "delivered").unwrap().try_as_time().is_some());
        assert_eq!(table.get("o3", "price"), None);
        assert_eq!(table.attributes_of("o2").unwrap().len(), 4);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let csv = "object_id,segment,priority\no1,retail,1\no2,wholesale\n";
        let table = ObjectAttributeTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("o2", "segment").and_then(AttributeValue::try_as_string),
            Some(&"wholesale".to_string())
        );
        assert_eq!(table.get("o2", "priority"), Some(&AttributeValue::Null));
        assert_eq!(table.attributes_of("o2").unwrap().len(), 2);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let csv = "object_id,price\no1,1,2\n";
        assert!(matches!(
            ObjectAttributeTable::from_reader(csv.as_bytes()),
            Err(OCELImportError::FileFormat(FileFormatError::ExtraCells {
                ref object,
                expected: 2,
                found: 3
            })) if object == "o1"
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ObjectAttributeTable::from_path("does/not/exist.csv"),
            Err(OCELImportError::FileFormat(FileFormatError::Io(_)))
        ));
    }
}
