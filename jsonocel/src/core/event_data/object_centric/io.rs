//! Errors and IO implementations for object-centric event logs

use std::io::{BufReader, BufWriter, Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use thiserror::Error;

use crate::core::event_data::object_centric::ocel_json::{export::ocel_to_json_value, parse_json};
use crate::core::event_data::object_centric::ocel_struct::ObjectCentricEventLog;
use crate::core::event_data::object_centric::parameters::JsonParseParameters;
use crate::core::event_data::timestamp_utils::TimestampParseError;
use crate::core::io::{Exportable, Importable};

/// The input (or a supplementary table) could not be read or is not structured as a log
#[derive(Debug, Error)]
pub enum FileFormatError {
    /// IO Error
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON Parsing Error
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV Parsing Error (object attribute tables)
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    /// A top-level section is missing or is not a JSON object
    #[error("Missing or invalid log section '{0}'")]
    MissingSection(String),
    /// A required table column is missing
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    /// A table row has more cells than the header
    #[error("Row of object '{object}' has {found} cells, header has {expected}")]
    ExtraCells {
        /// Object identifier of the row
        object: String,
        /// Number of header columns
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },
    /// Unsupported Format
    #[error("Unsupported Format: {0}")]
    UnsupportedFormat(String),
}

/// Reason why a single event or object record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record itself is not a JSON object
    #[error("record is not a JSON object")]
    NotAnObject,
    /// A required field is absent
    #[error("missing field '{0}'")]
    MissingField(String),
    /// A field has the wrong JSON shape
    #[error("field '{field}' is not {expected}")]
    InvalidField {
        /// Name of the field
        field: String,
        /// Expected shape (e.g., "a string")
        expected: &'static str,
    },
    /// The record references an object not declared in the objects section (strict mode only)
    #[error("references undeclared object '{0}'")]
    UnknownObject(String),
}

/// Error type for JSON-OCEL import
#[derive(Debug, Error)]
pub enum OCELImportError {
    /// Input could not be read or parsed
    #[error(transparent)]
    FileFormat(#[from] FileFormatError),
    /// An event record is malformed
    #[error("Malformed event '{event}': {reason}")]
    MalformedEvent {
        /// Key of the event in the input document
        event: String,
        /// What is wrong with it
        #[source]
        reason: RecordError,
    },
    /// An object record is malformed
    #[error("Malformed object '{object}': {reason}")]
    MalformedObject {
        /// Key of the object in the input document
        object: String,
        /// What is wrong with it
        #[source]
        reason: RecordError,
    },
    /// A timestamp string is not valid ISO 8601
    #[error("Invalid timestamp in field '{field}' of event '{event}': {source}")]
    Timestamp {
        /// Key of the event in the input document
        event: String,
        /// Name of the offending field
        field: String,
        /// Underlying parse error
        source: TimestampParseError,
    },
}

impl From<std::io::Error> for OCELImportError {
    fn from(e: std::io::Error) -> Self {
        OCELImportError::FileFormat(FileFormatError::Io(e))
    }
}

impl From<serde_json::Error> for OCELImportError {
    fn from(e: serde_json::Error) -> Self {
        OCELImportError::FileFormat(FileFormatError::Json(e))
    }
}

impl From<csv::Error> for OCELImportError {
    fn from(e: csv::Error) -> Self {
        OCELImportError::FileFormat(FileFormatError::Csv(e))
    }
}

fn is_json_format(format: &str) -> bool {
    format == "json" || format.ends_with(".json") || format.ends_with("jsonocel")
}

fn is_gz_json_format(format: &str) -> bool {
    format
        .strip_suffix(".gz")
        .map(is_json_format)
        .unwrap_or(false)
}

/// Read a complete JSON document in the given format (`json`, `jsonocel`, or gzipped variants)
///
/// The whole document is materialized in memory.
pub fn read_json_document<R: Read>(
    reader: R,
    format: &str,
) -> Result<serde_json::Value, OCELImportError> {
    let format = format.trim_start_matches('.').to_lowercase();
    if is_json_format(&format) {
        Ok(serde_json::from_reader(BufReader::new(reader))?)
    } else if is_gz_json_format(&format) {
        let decoder = GzDecoder::new(reader);
        Ok(serde_json::from_reader(BufReader::new(decoder))?)
    } else {
        Err(FileFormatError::UnsupportedFormat(format).into())
    }
}

/// Write a JSON document in the given format (`json`, `jsonocel`, or gzipped variants)
pub fn write_json_document<W: Write>(
    writer: W,
    value: &serde_json::Value,
    format: &str,
) -> Result<(), OCELImportError> {
    let format = format.trim_start_matches('.').to_lowercase();
    if is_json_format(&format) {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
        Ok(())
    } else if is_gz_json_format(&format) {
        let mut encoder = GzEncoder::new(BufWriter::new(writer), Compression::default());
        serde_json::to_writer(&mut encoder, value)?;
        encoder.finish()?.flush()?;
        Ok(())
    } else {
        Err(FileFormatError::UnsupportedFormat(format).into())
    }
}

/// Uses the default [`JsonParseParameters`]
impl Importable for ObjectCentricEventLog {
    type Error = OCELImportError;

    fn import_from_reader<R: Read>(reader: R, format: &str) -> Result<Self, Self::Error> {
        let data = read_json_document(reader, format)?;
        parse_json(&data, &JsonParseParameters::default())
    }
}

/// Uses the default [`JsonParseParameters`]
impl Exportable for ObjectCentricEventLog {
    type Error = OCELImportError;

    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error> {
        let value = ocel_to_json_value(self, &JsonParseParameters::default());
        write_json_document(writer, &value, format)
    }
}
