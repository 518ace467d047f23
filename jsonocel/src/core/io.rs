use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

///
/// Trait for importing types from a file path or reader
///
/// Formats are lowercase file extensions. Gzipped files carry the inner extension
/// followed by `.gz` (e.g., `jsonocel.gz`).
///
pub trait Importable: Sized {
    /// The error type returned by import operations
    type Error: std::error::Error + Send + Sync + 'static + From<std::io::Error>;

    /// Import from a reader, specifying the format.
    fn import_from_reader<R: Read>(reader: R, format: &str) -> Result<Self, Self::Error>;

    /// Import from a file path.
    /// The format is inferred from the file extension.
    fn import_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let path = path.as_ref();
        let format = required_format(path, Self::infer_format(path))?;
        let file = File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Self::import_from_reader(reader, &format)
    }

    /// Import from a byte slice, specifying the format.
    fn import_from_bytes(bytes: &[u8], format: &str) -> Result<Self, Self::Error> {
        Self::import_from_reader(std::io::Cursor::new(bytes), format)
    }

    /// Infer format from path
    fn infer_format(path: &Path) -> Option<String> {
        infer_format_with_gz(path)
    }
}

/// Trait for exporting types to a file path or writer
pub trait Exportable {
    /// The error type returned by export operations
    type Error: std::error::Error + Send + Sync + 'static + From<std::io::Error>;

    /// Export to a writer, specifying the format.
    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error>;

    /// Export to a file path.
    /// The format is inferred from the file extension.
    fn export_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Self::Error> {
        let path = path.as_ref();
        let format = required_format(path, Self::infer_format(path))?;
        let file = File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        Self::export_to_writer(self, writer, &format)
    }

    /// Infer format from path (see [`Importable`] for the naming of formats)
    fn infer_format(path: &Path) -> Option<String> {
        infer_format_with_gz(path)
    }
}

fn required_format(path: &Path, format: Option<String>) -> std::io::Result<String> {
    format.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Could not infer format from path {}", path.display()),
        )
    })
}

/// File extension, keeping a preceding extension for gzipped files (e.g., `json.gz`)
fn infer_format_with_gz(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if ext == "gz" {
        let inner = path
            .file_stem()
            .map(Path::new)
            .and_then(|stem| stem.extension())
            .and_then(|e| e.to_str())?;
        return Some(format!("{}.gz", inner.to_lowercase()));
    }
    Some(ext)
}
